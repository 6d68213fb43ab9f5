//! The page elements the upload handler drives.
//!
//! Implementations use interior mutability: the handler holds shared
//! references and may be submitted again while a request is in flight.

use crate::handler::UploadHandler;
use crate::models::SelectedFile;
use crate::render::Fragment;

/// The form the handler intercepts submissions of.
pub trait UploadForm {
    /// Keeps `handler` and routes every later submit event to
    /// [`UploadHandler::on_submit`].
    fn attach(&self, handler: UploadHandler);
}

pub trait SubmitEvent: Send {
    /// Stops the native submission.
    fn prevent_default(&mut self);
}

pub trait FileInput: Send + Sync {
    /// Currently selected files, in selection order.
    fn selected_files(&self) -> Vec<SelectedFile>;
}

pub trait OutputPanel: Send + Sync {
    fn clear(&self);
    fn set_content(&self, fragment: &Fragment);
    fn set_visible(&self, visible: bool);
}

/// Loading indicator shown while an upload is in flight.
pub trait Spinner: Send + Sync {
    fn set_visible(&self, visible: bool);
}
