//! Analysis contract: one completions call per submission, behind a trait so
//! the orchestrator and handlers never depend on the HTTP client directly.
//!
//! Every failure (transport, non-2xx, missing choice, unparseable content)
//! is logged with its cause and surfaced only as [`AnalysisFailed`].

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use crate::analysis::prompts::{build_analysis_prompt, ANALYSIS_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::analysis::{AnalysisRequest, AnalysisResult};

/// The only error an end user ever sees from an analysis call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Failed to analyze resume. Please try again.")]
pub struct AnalysisFailed;

/// Carried in `AppState` as `Arc<dyn ResumeAnalyzer>`.
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisFailed>;
}

/// Default analyzer backed by OpenRouter.
pub struct OpenRouterAnalyzer {
    llm: LlmClient,
}

impl OpenRouterAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeAnalyzer for OpenRouterAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisFailed> {
        let prompt = build_analysis_prompt(&request.resume_text, &request.job_description);

        info!(
            model = %request.model_id,
            resume_chars = request.resume_text.len(),
            "Requesting resume analysis"
        );

        self.llm
            .call_json::<AnalysisResult>(&request.model_id, ANALYSIS_SYSTEM, &prompt)
            .await
            .map_err(|e| {
                error!(model = %request.model_id, "OpenRouter API error: {e}");
                AnalysisFailed
            })
    }
}
