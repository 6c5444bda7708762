//! `casegen fetch`

use anyhow::Result;
use clap::Args;

use crate::application::{FetchDocumentRequest, FetchDocumentResponse, TestCaseApi};
use crate::cli::output::{output, CommandOutput};

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Document URL
    #[arg(long)]
    pub url: String,
}

impl CommandOutput for FetchDocumentResponse {
    fn to_human(&self) -> String {
        match (&self.content, self.success) {
            (Some(content), true) => content.clone(),
            _ => self.message.clone(),
        }
    }
}

pub async fn execute(args: FetchArgs, api: &TestCaseApi, json_mode: bool) -> Result<()> {
    let response = api
        .fetch_document(FetchDocumentRequest { url: args.url })
        .await;
    output(&response, json_mode);
    Ok(())
}
