//! Pure presentation of an [`UploadOutcome`].
//!
//! Rendering never touches the page; the handler hands the resulting
//! [`Fragment`] to the output panel, which decides whether it wants HTML
//! or plain text.

use crate::models::UploadOutcome;
use askama::Template;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Classification {
        format: String,
        intent: String,
        /// `extracted`, pretty-printed with two-space indentation.
        extracted: String,
    },
    Error {
        message: String,
    },
}

pub fn render(outcome: &UploadOutcome) -> Fragment {
    match outcome {
        UploadOutcome::Success(result) => Fragment::Classification {
            format: result.format.clone(),
            intent: result.intent.clone(),
            extracted: serde_json::to_string_pretty(&result.extracted)
                .unwrap_or_else(|_| result.extracted.to_string()),
        },
        UploadOutcome::Failure(error) => Fragment::Error {
            message: error.message.clone(),
        },
    }
}

impl Fragment {
    pub fn is_error(&self) -> bool {
        matches!(self, Fragment::Error { .. })
    }

    /// Renders the fragment as HTML, escaping every server-provided value.
    pub fn to_html(&self) -> askama::Result<String> {
        match self {
            Fragment::Classification {
                format,
                intent,
                extracted,
            } => ClassificationTemplate {
                format,
                intent,
                extracted,
            }
            .render(),
            Fragment::Error { message } => ErrorTemplate { message }.render(),
        }
    }
}

#[derive(Template)]
#[template(path = "classification.html")]
struct ClassificationTemplate<'a> {
    format: &'a str,
    intent: &'a str,
    extracted: &'a str,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    message: &'a str,
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Classification {
                format,
                intent,
                extracted,
            } => write!(
                f,
                "Format: {}\nIntent: {}\nExtracted:\n{}",
                format, intent, extracted
            ),
            Fragment::Error { message } => write!(f, "Error: {}", message),
        }
    }
}
