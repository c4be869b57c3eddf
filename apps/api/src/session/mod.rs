//! Workbench: the orchestrator behind the analysis form.
//!
//! Holds the resume, job description and model choice, and drives one
//! submission at a time through validation, text extraction, the analysis
//! call and storage of the result.
//!
//! A new upload or text edit clears neither the last result nor the last
//! error. Only a new submission clears the error, and a previous result stays
//! visible until a successful one replaces it.

use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::service::{AnalysisFailed, ResumeAnalyzer};
use crate::intake::job_description::{EditOutcome, JobDescriptionInput};
use crate::intake::resume::{ResumeIntake, UploadedFile, UploadedResume};
use crate::models::analysis::{AnalysisRequest, AnalysisResult};
use crate::models::catalog::{default_model, find_model, ModelInfo};

#[derive(Debug)]
pub enum SessionEvent {
    ResumeDropped(UploadedFile),
    /// The upload never arrived intact (e.g. request body over the limit).
    ResumeRejected(String),
    JobDescriptionEdited(String),
    ModelPicked(String),
}

/// What the page shows. Derived from the workbench on every read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState<'a> {
    Idle,
    Ready,
    Analyzing,
    Done(&'a AnalysisResult),
    Failed(&'a str),
}

/// Input rejected at the point of entry. The previous value is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0}")]
    Resume(String),

    #[error("Job description is limited to 5000 characters")]
    JobDescriptionTooLong,

    #[error("Unknown model '{0}'")]
    UnknownModel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please upload a resume")]
    MissingResume,

    #[error("Please enter a job description")]
    MissingJobDescription,

    #[error("An analysis is already in progress")]
    InFlight,

    #[error(transparent)]
    Analysis(#[from] AnalysisFailed),
}

#[derive(Debug)]
pub struct Workbench {
    resume_intake: ResumeIntake,
    resume: Option<UploadedResume>,
    job_description: JobDescriptionInput,
    job_description_rejected: bool,
    model: &'static ModelInfo,
    in_flight: bool,
    result: Option<AnalysisResult>,
    error: Option<String>,
}

impl Default for Workbench {
    fn default() -> Self {
        Self {
            resume_intake: ResumeIntake::new(),
            resume: None,
            job_description: JobDescriptionInput::new(),
            job_description_rejected: false,
            model: default_model(),
            in_flight: false,
            result: None,
            error: None,
        }
    }
}

impl Workbench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: SessionEvent) -> Result<(), InputError> {
        match event {
            SessionEvent::ResumeDropped(file) => match self.resume_intake.accept(file) {
                // A new file replaces the old one outright
                Some(resume) => {
                    info!(file = resume.file_name(), bytes = resume.size(), "Resume accepted");
                    self.resume = Some(resume);
                    Ok(())
                }
                None => Err(InputError::Resume(
                    self.resume_intake.error().unwrap_or_default().to_string(),
                )),
            },
            SessionEvent::ResumeRejected(reason) => {
                self.resume_intake.reject(reason.clone());
                Err(InputError::Resume(reason))
            }
            SessionEvent::JobDescriptionEdited(text) => match self.job_description.edit(&text) {
                EditOutcome::Accepted => {
                    self.job_description_rejected = false;
                    Ok(())
                }
                EditOutcome::Rejected => {
                    self.job_description_rejected = true;
                    Err(InputError::JobDescriptionTooLong)
                }
            },
            SessionEvent::ModelPicked(id) => {
                let model = find_model(&id).ok_or(InputError::UnknownModel(id))?;
                self.model = model;
                Ok(())
            }
        }
    }

    pub fn state(&self) -> SessionState<'_> {
        if self.in_flight {
            SessionState::Analyzing
        } else if let Some(error) = &self.error {
            SessionState::Failed(error)
        } else if let Some(result) = &self.result {
            SessionState::Done(result)
        } else if self.can_submit() {
            SessionState::Ready
        } else {
            SessionState::Idle
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.in_flight && self.resume.is_some() && !self.job_description.is_blank()
    }

    /// Runs one submission to completion.
    pub async fn submit(
        &mut self,
        analyzer: &dyn ResumeAnalyzer,
    ) -> Result<&AnalysisResult, SubmitError> {
        let request = self.begin_submit()?;
        let outcome = analyzer.analyze(&request).await;
        self.finish_submit(outcome)
    }

    /// Checks the guards, clears the previous error, marks the request as in
    /// flight and reads the resume as text.
    pub fn begin_submit(&mut self) -> Result<AnalysisRequest, SubmitError> {
        if self.in_flight {
            return Err(SubmitError::InFlight);
        }

        let guard = match &self.resume {
            None => Err(SubmitError::MissingResume),
            Some(_) if self.job_description.is_blank() => Err(SubmitError::MissingJobDescription),
            Some(resume) => Ok(resume.text()),
        };

        let resume_text = match guard {
            Ok(text) => text,
            Err(e) => {
                warn!("Submission blocked: {e}");
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        self.error = None;
        self.in_flight = true;

        Ok(AnalysisRequest {
            resume_text,
            job_description: self.job_description.text().to_string(),
            model_id: self.model.id.to_string(),
        })
    }

    /// Records the outcome of the request started by [`Workbench::begin_submit`].
    pub fn finish_submit(
        &mut self,
        outcome: Result<AnalysisResult, AnalysisFailed>,
    ) -> Result<&AnalysisResult, SubmitError> {
        self.in_flight = false;

        match outcome {
            Ok(result) => {
                info!(match_score = ?result.match_score, "Analysis completed");
                Ok(self.result.insert(result))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(SubmitError::Analysis(e))
            }
        }
    }

    pub fn resume(&self) -> Option<&UploadedResume> {
        self.resume.as_ref()
    }

    pub fn resume_error(&self) -> Option<&str> {
        self.resume_intake.error()
    }

    pub fn job_description(&self) -> &JobDescriptionInput {
        &self.job_description
    }

    pub fn job_description_rejected(&self) -> bool {
        self.job_description_rejected
    }

    pub fn model(&self) -> &'static ModelInfo {
        self.model
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
