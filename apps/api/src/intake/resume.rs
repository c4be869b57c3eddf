//! Resume intake: accepts one uploaded file and checks its extension and size.
//!
//! The intake never looks inside the file. Turning the bytes into prompt text
//! happens later, when the workbench submits.

use bytes::Bytes;

pub const ALLOWED_FILE_TYPES: &[&str] = &[".pdf", ".docx", ".doc"];
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

pub const FILE_TOO_LARGE: &str = "File is too large. Maximum size is 5MB.";

/// A file the user selected, as received from the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// A file that passed intake validation.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedResume {
    file_name: String,
    bytes: Bytes,
}

impl UploadedResume {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Reads the content as text. Binary formats are forwarded verbatim;
    /// invalid UTF-8 sequences become U+FFFD.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Holds the inline error shown under the drop zone.
#[derive(Debug, Default)]
pub struct ResumeIntake {
    error: Option<String>,
}

impl ResumeIntake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validates a dropped file. Returns the accepted resume, or `None` after
    /// recording the reason in [`ResumeIntake::error`].
    pub fn accept(&mut self, file: UploadedFile) -> Option<UploadedResume> {
        if let Err(reason) = validate_file(&file.file_name, file.bytes.len()) {
            self.error = Some(reason);
            return None;
        }

        self.error = None;
        Some(UploadedResume {
            file_name: file.file_name,
            bytes: file.bytes,
        })
    }

    /// Records an upload that could not be received at all, e.g. a body over the
    /// server's size limit.
    pub fn reject(&mut self, reason: impl Into<String>) {
        self.error = Some(reason.into());
    }
}

/// Checks the extension first, then the size.
pub fn validate_file(file_name: &str, size: usize) -> Result<(), String> {
    let extension = file_extension(file_name);
    if !ALLOWED_FILE_TYPES.contains(&extension.as_str()) {
        return Err(format!(
            "Invalid file type. Allowed types: {}",
            ALLOWED_FILE_TYPES.join(", ")
        ));
    }

    if size > MAX_FILE_SIZE {
        return Err(FILE_TOO_LARGE.to_string());
    }

    Ok(())
}

/// Text after the last `.`, lower-cased and dot-prefixed. A name without a dot
/// yields the whole name, so `resume` becomes `.resume`.
fn file_extension(file_name: &str) -> String {
    let last = file_name.rsplit('.').next().unwrap_or_default();
    format!(".{}", last.to_lowercase())
}
