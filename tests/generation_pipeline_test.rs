//! End-to-end generation against a fake chat-completion endpoint

mod common;

use std::sync::Arc;

use casegen::domain::models::{Config, PipelineMode};
use casegen::infrastructure::llm::HttpChatClientFactory;
use casegen::infrastructure::prompts::PromptStore;
use casegen::services::{CaseSource, FallbackGenerator, TestCaseGenerator};
use casegen::{GenerateRequest, TestCaseApi};
use common::{completion_body, ready_config, setup_test_logging};
use mockito::Matcher;

const PRD: &str = "Feature: account registration flow\nFeature: password reset by email";
const DECOMPOSITION_OUTPUT: &str = "decomposition-output-7f3a";
const PLAN_OUTPUT: &str = "coverage-plan-output-9c1e";

const CASES_JSON: &str = r#"```json
[
  {"title": "Register with valid data", "precondition": "Logged out", "steps": ["Open sign-up", "Submit form"], "expectedResult": "Account created"},
  {"title": "Reset password", "precondition": "Account exists", "steps": "Request reset link", "expectedResult": "Email sent"} // second
]
```"#;

fn generator(config: &Config) -> TestCaseGenerator {
    TestCaseGenerator::from_config(config, &PromptStore::builtin(), Arc::new(HttpChatClientFactory))
}

fn fallback(config: &Config) -> Vec<casegen::TestCase> {
    FallbackGenerator::new(config.fallback.clone()).generate(PRD)
}

#[tokio::test]
async fn test_three_stage_chain_decodes_final_output() {
    setup_test_logging();
    let mut server = mockito::Server::new_async().await;

    let stage_one = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-api-key")
        .match_body(Matcher::Regex("account registration flow".to_string()))
        .with_status(200)
        .with_body(completion_body(DECOMPOSITION_OUTPUT))
        .expect(1)
        .create_async()
        .await;
    let stage_two = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex(DECOMPOSITION_OUTPUT.to_string()))
        .with_status(200)
        .with_body(completion_body(PLAN_OUTPUT))
        .expect(1)
        .create_async()
        .await;
    let stage_three = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex(PLAN_OUTPUT.to_string()))
        .with_status(200)
        .with_body(completion_body(CASES_JSON))
        .expect(1)
        .create_async()
        .await;

    let outcome = generator(&ready_config(&server.url()))
        .generate_with_source(PRD)
        .await;

    assert_eq!(outcome.source, CaseSource::Model);
    assert_eq!(outcome.cases.len(), 2);
    assert_eq!(outcome.cases[0].title, "Register with valid data");
    assert_eq!(outcome.cases[0].steps.len(), 2);
    assert_eq!(outcome.cases[1].expected_result, "Email sent");

    stage_one.assert_async().await;
    stage_two.assert_async().await;
    stage_three.assert_async().await;
}

#[tokio::test]
async fn test_stage_two_server_error_yields_fallback() {
    let mut server = mockito::Server::new_async().await;
    let _stage_one = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("account registration flow".to_string()))
        .with_status(200)
        .with_body(completion_body(DECOMPOSITION_OUTPUT))
        .create_async()
        .await;
    let _stage_two = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex(DECOMPOSITION_OUTPUT.to_string()))
        .with_status(500)
        .with_body(r#"{"error": {"message": "internal error"}}"#)
        .create_async()
        .await;
    let stage_three = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex(PLAN_OUTPUT.to_string()))
        .expect(0)
        .create_async()
        .await;

    let config = ready_config(&server.url());
    let outcome = generator(&config).generate_with_source(PRD).await;

    assert_eq!(outcome.cases, fallback(&config));
    assert_eq!(outcome.cases.len(), 6);
    match outcome.source {
        CaseSource::Fallback { reason } => assert!(reason.contains("coverage_planning")),
        CaseSource::Model => panic!("expected fallback"),
    }
    stage_three.assert_async().await;
}

#[tokio::test]
async fn test_disabled_config_makes_no_requests() {
    let mut server = mockito::Server::new_async().await;
    let any_call = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut config = ready_config(&server.url());
    config.llm.enabled = false;

    let cases = generator(&config).generate(PRD).await;

    assert_eq!(cases, fallback(&config));
    any_call.assert_async().await;
}

#[tokio::test]
async fn test_missing_api_key_makes_no_requests() {
    let mut server = mockito::Server::new_async().await;
    let any_call = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut config = ready_config(&server.url());
    config.llm.api_key = None;

    assert_eq!(generator(&config).generate(PRD).await, fallback(&config));
    any_call.assert_async().await;
}

#[tokio::test]
async fn test_prose_final_output_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _calls = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(completion_body("Sorry, I cannot produce test cases for this."))
        .expect(3)
        .create_async()
        .await;

    let config = ready_config(&server.url());
    assert_eq!(generator(&config).generate(PRD).await, fallback(&config));
}

#[tokio::test]
async fn test_single_call_request_shape() {
    let mut server = mockito::Server::new_async().await;
    let call = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-api-key")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "test-model",
            "temperature": 0.2,
            "max_tokens": 32000,
            "thinking": {"type": "disabled"}
        })))
        .with_status(200)
        .with_body(completion_body(
            r#"[{"title": "Only case", "steps": "do it", "expectedResult": "done"}]"#,
        ))
        .expect(1)
        .create_async()
        .await;

    let mut config = ready_config(&server.url());
    config.generation.pipeline = PipelineMode::SingleCall;

    let cases = generator(&config).generate(PRD).await;

    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].title, "Only case");
    call.assert_async().await;
}

#[tokio::test]
async fn test_prompt_override_reaches_request() {
    let prompt_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        prompt_dir.path().join("single_call.txt"),
        "CUSTOM-SINGLE-CALL-INSTRUCTIONS",
    )
    .unwrap();

    let mut server = mockito::Server::new_async().await;
    let call = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("CUSTOM-SINGLE-CALL-INSTRUCTIONS".to_string()))
        .with_status(200)
        .with_body(completion_body(r#"[{"title": "Custom", "steps": []}]"#))
        .expect(1)
        .create_async()
        .await;

    let mut config = ready_config(&server.url());
    config.generation.pipeline = PipelineMode::SingleCall;
    let prompts = PromptStore::load(Some(prompt_dir.path())).unwrap();
    let generator =
        TestCaseGenerator::from_config(&config, &prompts, Arc::new(HttpChatClientFactory));

    let outcome = generator.generate_with_source(PRD).await;

    assert_eq!(outcome.source, CaseSource::Model);
    call.assert_async().await;
}

#[tokio::test]
async fn test_api_envelope_over_http() {
    let mut server = mockito::Server::new_async().await;
    let _calls = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error": "invalid api_key: sk-abcdefghijklmnop"}"#)
        .create_async()
        .await;

    let config = ready_config(&server.url());
    let api = TestCaseApi::from_config(
        &config,
        &PromptStore::builtin(),
        Arc::new(HttpChatClientFactory),
        Arc::new(casegen::infrastructure::documents::LarkDocumentFetcher::new(
            config.document.clone(),
        )),
    );

    let response = api
        .generate(GenerateRequest {
            prd: PRD.to_string(),
        })
        .await;

    assert!(response.success);
    assert_eq!(response.test_cases, Some(fallback(&config)));

    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(body["source"]["kind"], "fallback");
    assert!(!body.to_string().contains("sk-abcdefghijklmnop"));
}
