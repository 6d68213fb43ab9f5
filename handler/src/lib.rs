pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod render;
pub mod upload_service;
pub mod view;

pub use config::UploadConfig;
pub use error::{Result, UploadError};
pub use handler::{Submission, UploadHandler};
pub use models::*;
pub use render::{render, Fragment};
pub use upload_service::UploadService;
pub use view::{FileInput, OutputPanel, Spinner, SubmitEvent, UploadForm};
