pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::intake::resume::MAX_FILE_SIZE;
use crate::state::AppState;

/// Room for a maximum-size resume plus the text fields and multipart framing.
/// Anything larger is reported as an oversized file.
pub const MAX_BODY_SIZE: usize = MAX_FILE_SIZE + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Page
        .route("/", get(handlers::handle_index))
        .route("/analyze", post(handlers::handle_analyze_form))
        // JSON API
        .route("/api/v1/models", get(handlers::handle_list_models))
        .route("/api/v1/analyses", post(handlers::handle_create_analysis))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(state)
}
