use crate::models::*;
use crate::render::render;
use crate::upload_service::UploadService;
use crate::view::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// What a single submit event led to.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// No file was selected; nothing was sent or rendered.
    Skipped,
    /// The outcome was rendered into the output panel.
    Rendered(UploadOutcome),
    /// A later submission started before this one settled, so its outcome
    /// was dropped.
    Superseded,
}

/// Intercepts form submissions, uploads the selected file and renders the
/// classification into the output panel.
#[derive(Clone)]
pub struct UploadHandler {
    inner: Arc<Inner>,
}

struct Inner {
    file_input: Arc<dyn FileInput>,
    output: Arc<dyn OutputPanel>,
    spinner: Arc<dyn Spinner>,
    service: UploadService,
    generation: AtomicU64,
}

impl UploadHandler {
    /// Wires the handler to its page elements and attaches it to `form`.
    /// Call once at startup.
    pub fn init(
        form: &dyn UploadForm,
        file_input: Arc<dyn FileInput>,
        output: Arc<dyn OutputPanel>,
        spinner: Arc<dyn Spinner>,
        service: UploadService,
    ) -> Self {
        let handler = Self {
            inner: Arc::new(Inner {
                file_input,
                output,
                spinner,
                service,
                generation: AtomicU64::new(0),
            }),
        };

        form.attach(handler.clone());
        log::debug!("Upload handler attached, posting to {}", handler.inner.service.endpoint());

        handler
    }

    pub async fn on_submit(&self, event: &mut dyn SubmitEvent) -> Submission {
        event.prevent_default();

        let inner = &self.inner;
        let request = match inner.file_input.selected_files().first() {
            Some(file) => UploadRequest::from(file),
            None => {
                log::debug!("Submit without a selected file, ignoring");
                return Submission::Skipped;
            }
        };

        inner.output.set_visible(false);
        inner.output.clear();
        inner.spinner.set_visible(true);

        let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let outcome = inner.service.classify(request).await;

        if inner.generation.load(Ordering::SeqCst) != generation {
            log::info!("Discarding stale response of submission {}", generation);
            return Submission::Superseded;
        }

        // Spinner goes away before the output shows up.
        inner.spinner.set_visible(false);
        inner.output.set_content(&render(&outcome));
        inner.output.set_visible(true);

        Submission::Rendered(outcome)
    }
}
