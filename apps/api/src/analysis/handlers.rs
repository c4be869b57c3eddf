//! Axum route handlers for the analysis form and the JSON API.

use askama::Template;
use axum::{
    extract::{Multipart, State},
    response::Html,
    Json,
};

use crate::errors::AppError;
use crate::intake::form::{read_analysis_form, AnalysisForm};
use crate::models::analysis::AnalysisResult;
use crate::models::catalog::{ModelInfo, AI_MODELS};
use crate::session::{InputError, SessionEvent, SubmitError, Workbench};
use crate::state::AppState;
use crate::ui::IndexPage;

/// GET /
pub async fn handle_index() -> Result<Html<String>, AppError> {
    let bench = Workbench::new();
    Ok(Html(IndexPage::from_workbench(&bench, None).render()?))
}

/// POST /analyze
///
/// Form submission from the page. Always answers with the page: the report on
/// success, inline or banner errors otherwise. Input errors skip the analysis call.
pub async fn handle_analyze_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let form = read_analysis_form(multipart).await?;

    let mut bench = Workbench::new();
    let input_errors = apply_form(&mut bench, form);

    if input_errors.is_empty() {
        // Outcome is recorded on the workbench and rendered below
        let _ = bench.submit(state.analyzer.as_ref()).await;
    }

    // Resume and job description errors render inline next to their inputs
    let banner = input_errors
        .iter()
        .find(|e| matches!(e, InputError::UnknownModel(_)))
        .map(|e| e.to_string());

    let page = IndexPage::from_workbench(&bench, banner.as_deref());
    Ok(Html(page.render()?))
}

/// POST /api/v1/analyses
///
/// Same multipart form as the page; returns the raw analysis JSON.
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let form = read_analysis_form(multipart).await?;

    let mut bench = Workbench::new();
    if let Some(err) = apply_form(&mut bench, form).into_iter().next() {
        return Err(AppError::Validation(err.to_string()));
    }

    let result = bench
        .submit(state.analyzer.as_ref())
        .await
        .map_err(submit_error)?;

    Ok(Json(result.clone()))
}

/// GET /api/v1/models
pub async fn handle_list_models() -> Json<&'static [ModelInfo]> {
    Json(AI_MODELS)
}

/// Replays the submitted form as workbench events, collecting input errors.
fn apply_form(bench: &mut Workbench, form: AnalysisForm) -> Vec<InputError> {
    let mut events = Vec::new();
    if let Some(reason) = form.upload_error {
        events.push(SessionEvent::ResumeRejected(reason));
    }
    if let Some(file) = form.resume {
        events.push(SessionEvent::ResumeDropped(file));
    }
    events.push(SessionEvent::JobDescriptionEdited(form.job_description));
    if let Some(model) = form.model {
        events.push(SessionEvent::ModelPicked(model));
    }

    events
        .into_iter()
        .filter_map(|event| bench.handle(event).err())
        .collect()
}

fn submit_error(err: SubmitError) -> AppError {
    match err {
        SubmitError::Analysis(failed) => AppError::Analysis(failed),
        other => AppError::Validation(other.to_string()),
    }
}
