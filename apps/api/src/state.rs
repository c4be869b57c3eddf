use std::sync::Arc;

use crate::analysis::service::ResumeAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing in it is mutable; each submission gets its own workbench.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable analyzer. Default: OpenRouterAnalyzer.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
}
