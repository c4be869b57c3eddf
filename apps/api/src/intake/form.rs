//! Reads the analysis form (`resume`, `job_description`, `model`) out of a multipart body.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;

use crate::errors::AppError;
use crate::intake::resume::{UploadedFile, FILE_TOO_LARGE};

#[derive(Debug, Default)]
pub struct AnalysisForm {
    pub resume: Option<UploadedFile>,
    /// Set when the body was cut off by the request size limit.
    pub upload_error: Option<String>,
    pub job_description: String,
    pub model: Option<String>,
}

pub async fn read_analysis_form(mut multipart: Multipart) -> Result<AnalysisForm, AppError> {
    let mut form = AnalysisForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) if is_too_large(&e) => {
                form.upload_error = Some(FILE_TOO_LARGE.to_string());
                break;
            }
            Err(e) => return Err(malformed(e)),
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) if is_too_large(&e) => {
                        form.upload_error = Some(FILE_TOO_LARGE.to_string());
                        break;
                    }
                    Err(e) => return Err(malformed(e)),
                };
                // Browsers send an empty part when no file was picked.
                if !file_name.is_empty() {
                    form.resume = Some(UploadedFile { file_name, bytes });
                }
            }
            "job_description" => {
                // Browsers submit textarea newlines as CRLF but count them as one
                let text = field.text().await.map_err(malformed)?;
                form.job_description = text.replace("\r\n", "\n");
            }
            "model" => {
                let model = field.text().await.map_err(malformed)?;
                form.model = Some(model).filter(|m| !m.trim().is_empty());
            }
            other => tracing::debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(form)
}

fn is_too_large(err: &MultipartError) -> bool {
    err.status() == StatusCode::PAYLOAD_TOO_LARGE
}

fn malformed(err: MultipartError) -> AppError {
    AppError::Validation(format!("Malformed form data: {}", err.body_text()))
}
