use askama::Template;

use crate::intake::job_description::MAX_CHARACTERS;
use crate::intake::resume::ALLOWED_FILE_TYPES;
use crate::models::catalog::{ModelInfo, AI_MODELS};
use crate::report::{build_report, ReportView};
use crate::session::{InputError, SessionState, Workbench};

/// The single page: form on the left, report (or placeholder) on the right.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    pub models: Vec<ModelInfo>,
    pub selected_model: &'a str,
    pub job_description: &'a str,
    pub character_count: usize,
    pub word_count: usize,
    pub max_characters: usize,
    pub at_limit: bool,
    pub job_description_error: Option<String>,
    pub uploaded_file: Option<&'a str>,
    pub resume_error: Option<&'a str>,
    pub accept: String,
    pub can_submit: bool,
    pub analyzing: bool,
    pub error: Option<&'a str>,
    pub report: Option<ReportView>,
}

impl<'a> IndexPage<'a> {
    /// `form_error` covers input problems that have no inline slot, such as an
    /// unknown model id; it takes precedence over the workbench error.
    pub fn from_workbench(bench: &'a Workbench, form_error: Option<&'a str>) -> Self {
        let job_description = bench.job_description();
        let state = bench.state();

        let (report, error) = match state {
            SessionState::Idle | SessionState::Ready => (None, None),
            SessionState::Done(result) => (Some(result), None),
            // A previous result stays on screen while a new attempt runs or fails
            SessionState::Analyzing => (bench.result(), None),
            SessionState::Failed(message) => (bench.result(), Some(message)),
        };

        IndexPage {
            models: AI_MODELS.to_vec(),
            selected_model: bench.model().id,
            job_description: job_description.text(),
            character_count: job_description.character_count(),
            word_count: job_description.word_count(),
            max_characters: MAX_CHARACTERS,
            at_limit: job_description.at_limit(),
            job_description_error: bench
                .job_description_rejected()
                .then(|| InputError::JobDescriptionTooLong.to_string()),
            uploaded_file: bench.resume().map(|r| r.file_name()),
            resume_error: bench.resume_error(),
            accept: ALLOWED_FILE_TYPES.join(","),
            can_submit: bench.can_submit(),
            analyzing: state == SessionState::Analyzing,
            error: form_error.or(error),
            report: report.map(build_report),
        }
    }
}
