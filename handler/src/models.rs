use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{Result, UploadError};

/// Field name the server reads the uploaded file from.
pub const FILE_FIELD: &str = "file";

/// A file as exposed by a file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Reads a file from disk, guessing its content type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| UploadError::InvalidFile(path.display().to_string()))?;

        let bytes = fs::read(path).map_err(|source| UploadError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;

        let content_type = mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string());

        Ok(Self {
            name,
            bytes,
            content_type,
        })
    }
}

/// The single file sent to the classify endpoint, built at submit time.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl From<&SelectedFile> for UploadRequest {
    fn from(file: &SelectedFile) -> Self {
        Self {
            filename: file.name.clone(),
            bytes: file.bytes.clone(),
            content_type: file.content_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub format: String,
    pub intent: String,
    #[serde(default)]
    pub extracted: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResult {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorResult {
    pub const FALLBACK_MESSAGE: &'static str = "Unknown error";

    /// The message shown for a failed classification.
    ///
    /// Missing, null, empty, `false` and zero details fall back to
    /// [`Self::FALLBACK_MESSAGE`];
    /// structured details (e.g. validation error lists) are shown as compact JSON.
    pub fn message(&self) -> String {
        match &self.detail {
            Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(detail) if !is_falsy(detail) => detail.to_string(),
            _ => Self::FALLBACK_MESSAGE.to_string(),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server answered with a non-success status.
    Application,
    /// The request or its response never completed.
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl ErrorInfo {
    pub fn application(status: u16, body: &ErrorResult) -> Self {
        Self {
            kind: ErrorKind::Application,
            message: body.message(),
            status: Some(status),
        }
    }

    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: err.to_string(),
            status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Success(ClassificationResult),
    Failure(ErrorInfo),
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success(_))
    }
}
