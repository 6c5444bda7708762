//! Rule-based test case generator
//!
//! Used whenever the model path is unavailable or fails. It never calls out,
//! never fails, and always returns at least one case.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::domain::models::{FallbackConfig, StepList, TestCase};

/// Feature heading: a feature/requirement/characteristic/module keyword and a colon
static HEADING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:功能|需求|特性|模块|\b(?:feature|requirement|characteristic|module))[:：]")
        .expect("heading pattern is valid")
});

/// Labeled inline step phrase, ending at a sentence or clause break
///
/// English labels require a colon; the Chinese ones may omit it.
static STEP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:(?:步骤|操作)[:：]?|\b(?:steps?|operations?)[:：])\s*([^。；;\n]+)")
        .expect("step pattern is valid")
});

const FEATURE_NAME_CHARS: usize = 30;
const MAX_INLINE_STEPS: usize = 3;
const MIN_STEP_CHARS: usize = 5;
const MAX_STEP_CHARS: usize = 100;

const NORMAL_STEPS: [&str; 4] = [
    "Open the feature page",
    "Enter valid data",
    "Click the submit/confirm button",
    "Verify the operation result",
];

const EXCEPTION_STEPS: [&str; 4] = [
    "Open the feature page",
    "Enter invalid data (empty values, special characters, etc.)",
    "Click the submit/confirm button",
    "Verify the error message",
];

const BOUNDARY_STEPS: [&str; 3] = [
    "Enter boundary value data",
    "Perform the feature operation",
    "Observe the system response",
];

/// Deterministic generator driven by headings and paragraphs in the text
#[derive(Debug, Clone, Default)]
pub struct FallbackGenerator {
    config: FallbackConfig,
}

impl FallbackGenerator {
    /// Create a generator with the given extraction limits
    pub fn new(config: FallbackConfig) -> Self {
        Self { config }
    }

    /// Generate test cases for `prd`
    ///
    /// Three cases per extracted feature (normal, exception, boundary), or the
    /// three generic cases when nothing can be extracted.
    pub fn generate(&self, prd: &str) -> Vec<TestCase> {
        let features = self.extract_features(prd);

        let cases = if features.is_empty() {
            default_cases()
        } else {
            features
                .iter()
                .flat_map(|feature| cases_for_feature(feature))
                .collect()
        };

        info!(
            prd_length = prd.chars().count(),
            feature_count = features.len(),
            case_count = cases.len(),
            "Generated rule-based test cases"
        );
        cases
    }

    /// Feature texts in document order, capped at `max_features`
    pub fn extract_features(&self, prd: &str) -> Vec<String> {
        let mut features = self.heading_features(prd);
        if features.is_empty() {
            debug!("No feature headings found, falling back to paragraphs");
            features = self.paragraph_features(prd);
        }
        features.truncate(self.config.max_features);
        features
    }

    fn heading_features(&self, prd: &str) -> Vec<String> {
        let headings: Vec<_> = HEADING_PATTERN.find_iter(prd).collect();

        headings
            .iter()
            .enumerate()
            .filter_map(|(idx, heading)| {
                let start = heading.end();
                let rest = &prd[start..];
                let line_end = rest.find('\n').map_or(prd.len(), |pos| start + pos);
                let next_heading = headings.get(idx + 1).map_or(prd.len(), |h| h.start());
                let end = line_end.min(next_heading);

                let text = prd[start..end].trim();
                (text.chars().count() > self.config.min_feature_chars).then(|| text.to_string())
            })
            .collect()
    }

    fn paragraph_features(&self, prd: &str) -> Vec<String> {
        prd.split("\n\n")
            .map(str::trim)
            .filter(|para| {
                let len = para.chars().count();
                len > self.config.min_paragraph_chars && len < self.config.max_paragraph_chars
            })
            .map(str::to_string)
            .collect()
    }
}

/// First 30 characters, with an ellipsis when truncated
pub fn feature_name(feature: &str) -> String {
    let mut name: String = feature.chars().take(FEATURE_NAME_CHARS).collect();
    if feature.chars().count() > FEATURE_NAME_CHARS {
        name.push_str("...");
    }
    name
}

/// Step phrases found in the feature text, at most three
pub fn inline_steps(feature: &str) -> Vec<String> {
    STEP_PATTERN
        .captures_iter(feature)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|step| {
            let len = step.chars().count();
            len > MIN_STEP_CHARS && len < MAX_STEP_CHARS
        })
        .take(MAX_INLINE_STEPS)
        .map(str::to_string)
        .collect()
}

fn template_steps(template: &[&str], feature: &str) -> StepList {
    let mut steps: Vec<String> = template.iter().map(|s| (*s).to_string()).collect();
    for (idx, step) in inline_steps(feature).into_iter().enumerate() {
        steps[idx] = step;
    }
    StepList::Sequence(steps)
}

fn cases_for_feature(feature: &str) -> [TestCase; 3] {
    let name = feature_name(feature);
    [
        TestCase::new(
            format!("Verify {name} normal flow"),
            "User is logged in with the required permissions",
            template_steps(&NORMAL_STEPS, feature),
            "The feature executes normally and the result matches expectations",
        ),
        TestCase::new(
            format!("Verify {name} exception handling"),
            "User is logged in",
            template_steps(&EXCEPTION_STEPS, feature),
            "The system shows a correct error message and the operation is not executed",
        ),
        TestCase::new(
            format!("Verify {name} boundary values"),
            "User is logged in and boundary value data is prepared",
            StepList::Sequence(BOUNDARY_STEPS.iter().map(|s| (*s).to_string()).collect()),
            "The system handles boundary values correctly without errors",
        ),
    ]
}

fn default_cases() -> Vec<TestCase> {
    let steps = |items: [&str; 3]| -> StepList {
        StepList::Sequence(items.iter().map(|s| (*s).to_string()).collect())
    };

    vec![
        TestCase::new(
            "Basic function verification",
            "System is running and the user is logged in",
            steps([
                "Open the feature page",
                "Perform the basic operation",
                "Verify the result",
            ]),
            "The feature executes normally",
        ),
        TestCase::new(
            "Data input validation",
            "System is running",
            steps([
                "Enter data of various types",
                "Submit the data",
                "Verify the system response",
            ]),
            "The system validates the data format correctly",
        ),
        TestCase::new(
            "Permission check",
            "Accounts with different permission levels are available",
            steps([
                "Try to access the feature",
                "Perform the operation",
                "Verify the permission control",
            ]),
            "Permission control takes effect correctly",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> FallbackGenerator {
        FallbackGenerator::default()
    }

    #[test]
    fn test_heading_features_in_order() {
        let prd = "功能：用户登录与会话管理\n需求: password reset by email\nFeature: export monthly reports";
        let features = generator().extract_features(prd);
        assert_eq!(
            features,
            vec![
                "用户登录与会话管理".to_string(),
                "password reset by email".to_string(),
                "export monthly reports".to_string(),
            ]
        );
    }

    #[test]
    fn test_heading_text_stops_at_next_heading_on_same_line() {
        let prd = "模块：订单创建流程管理 功能：订单取消与退款处理";
        let features = generator().extract_features(prd);
        assert_eq!(features, vec!["订单创建流程管理", "订单取消与退款处理"]);
    }

    #[test]
    fn test_short_heading_text_is_ignored() {
        // "登录" is only 2 characters
        let prd = "功能：登录\n\nThis paragraph is definitely longer than twenty characters.";
        let features = generator().extract_features(prd);
        assert_eq!(
            features,
            vec!["This paragraph is definitely longer than twenty characters."]
        );
    }

    #[test]
    fn test_paragraph_bounds_are_exclusive() {
        let exactly_twenty = "a".repeat(20);
        let twenty_one = "b".repeat(21);
        let prd = format!("{exactly_twenty}\n\n{twenty_one}\n\n{}", "c".repeat(500));
        let features = generator().extract_features(&prd);
        assert_eq!(features, vec![twenty_one]);
    }

    #[test]
    fn test_features_capped() {
        let prd: String = (0..15)
            .map(|i| format!("Feature: capability number {i}\n"))
            .collect();
        let features = generator().extract_features(&prd);
        assert_eq!(features.len(), 10);
        assert_eq!(features[0], "capability number 0");
        assert_eq!(features[9], "capability number 9");
    }

    #[test]
    fn test_three_cases_per_feature() {
        let cases = generator().generate("功能：用户登录与会话管理\n功能：购物车结算流程");
        assert_eq!(cases.len(), 6);
        assert!(cases[0].title.ends_with("normal flow"));
        assert!(cases[1].title.ends_with("exception handling"));
        assert!(cases[2].title.ends_with("boundary values"));
        assert!(cases[3].title.contains("购物车结算流程"));
        assert_eq!(cases[2].steps.len(), 3);
        assert_eq!(cases[0].steps.len(), 4);
    }

    #[test]
    fn test_default_cases_when_nothing_extracted() {
        let cases = generator().generate("too short");
        let titles: Vec<_> = cases.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Basic function verification", "Data input validation", "Permission check"]
        );
    }

    #[test]
    fn test_feature_name_truncation() {
        assert_eq!(feature_name("short"), "short");
        let long = "x".repeat(31);
        assert_eq!(feature_name(&long), format!("{}...", "x".repeat(30)));
        assert_eq!(feature_name(&"y".repeat(30)), "y".repeat(30));
    }

    #[test]
    fn test_inline_steps_replace_leading_template_steps() {
        let feature = "订单导出 步骤：进入订单列表页面；操作：选择导出格式为CSV。";
        let cases = generator().generate(&format!("功能：{feature}"));
        let steps: Vec<_> = cases[0].steps.iter().collect();
        assert_eq!(steps[0], "进入订单列表页面");
        assert_eq!(steps[1], "选择导出格式为CSV");
        assert_eq!(steps[2], NORMAL_STEPS[2]);
        assert_eq!(steps[3], NORMAL_STEPS[3]);

        let exception_steps: Vec<_> = cases[1].steps.iter().collect();
        assert_eq!(exception_steps[0], "进入订单列表页面");
        assert_eq!(exception_steps[3], EXCEPTION_STEPS[3]);
    }

    #[test]
    fn test_inline_steps_length_filter_and_cap() {
        assert!(inline_steps("step: ok").is_empty());
        let text = "Step: first long step; Step: second long step; Step: third long step; Step: fourth long step";
        assert_eq!(inline_steps(text).len(), 3);
    }

    #[test]
    fn test_unlabeled_english_keyword_keeps_template_steps() {
        let cases = generator().generate("Feature: bulk operation support for admin users");
        let steps: Vec<_> = cases[0].steps.iter().collect();
        assert_eq!(steps, NORMAL_STEPS);
        assert!(inline_steps("these steps describe the checkout flow").is_empty());

        let labeled = inline_steps("Operation: select every pending order");
        assert_eq!(labeled, vec!["select every pending order"]);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let prd = "Requirement: users can upload avatars up to 2MB\n\nmore text here that is long enough";
        assert_eq!(generator().generate(prd), generator().generate(prd));
    }
}
