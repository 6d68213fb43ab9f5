//! Errors raised while setting up an upload.
//!
//! Failures of the upload itself are not errors here: they are rendered as
//! [`crate::models::UploadOutcome::Failure`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UploadError>;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not a file: {0}")]
    InvalidFile(String),

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
