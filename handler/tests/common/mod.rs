#![allow(dead_code)]

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use upload_handler::*;

// =============================================================================
// Page doubles
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    OutputShown,
    OutputHidden,
    OutputCleared,
    OutputSet(Fragment),
    SpinnerShown,
    SpinnerHidden,
}

pub type EventLog = Arc<Mutex<Vec<PageEvent>>>;

#[derive(Default)]
pub struct MockForm {
    handler: Mutex<Option<UploadHandler>>,
}

impl UploadForm for MockForm {
    fn attach(&self, handler: UploadHandler) {
        *self.handler.lock().unwrap() = Some(handler);
    }
}

impl MockForm {
    pub async fn submit(&self) -> (Submission, MockSubmitEvent) {
        let handler = self
            .handler
            .lock()
            .unwrap()
            .clone()
            .expect("handler attached to form");

        let mut event = MockSubmitEvent::default();
        let submission = handler.on_submit(&mut event).await;
        (submission, event)
    }
}

#[derive(Debug, Default)]
pub struct MockSubmitEvent {
    pub default_prevented: bool,
}

impl SubmitEvent for MockSubmitEvent {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

#[derive(Default)]
pub struct MockFileInput {
    files: Mutex<Vec<SelectedFile>>,
}

impl MockFileInput {
    pub fn select(&self, files: Vec<SelectedFile>) {
        *self.files.lock().unwrap() = files;
    }
}

impl FileInput for MockFileInput {
    fn selected_files(&self) -> Vec<SelectedFile> {
        self.files.lock().unwrap().clone()
    }
}

pub struct MockOutput {
    events: EventLog,
    content: Mutex<Option<Fragment>>,
    visible: AtomicBool,
}

impl MockOutput {
    pub fn content(&self) -> Option<Fragment> {
        self.content.lock().unwrap().clone()
    }

    pub fn html(&self) -> Option<String> {
        self.content()
            .map(|fragment| fragment.to_html().expect("fragment renders"))
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

impl OutputPanel for MockOutput {
    fn clear(&self) {
        *self.content.lock().unwrap() = None;
        self.events.lock().unwrap().push(PageEvent::OutputCleared);
    }

    fn set_content(&self, fragment: &Fragment) {
        *self.content.lock().unwrap() = Some(fragment.clone());
        self.events
            .lock()
            .unwrap()
            .push(PageEvent::OutputSet(fragment.clone()));
    }

    fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
        self.events.lock().unwrap().push(if visible {
            PageEvent::OutputShown
        } else {
            PageEvent::OutputHidden
        });
    }
}

pub struct MockSpinner {
    events: EventLog,
    visible: AtomicBool,
}

impl MockSpinner {
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

impl Spinner for MockSpinner {
    fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
        self.events.lock().unwrap().push(if visible {
            PageEvent::SpinnerShown
        } else {
            PageEvent::SpinnerHidden
        });
    }
}

/// A page wired to an [`UploadHandler`] posting to `server_url`.
pub struct TestPage {
    pub form: Arc<MockForm>,
    pub file_input: Arc<MockFileInput>,
    pub output: Arc<MockOutput>,
    pub spinner: Arc<MockSpinner>,
    pub events: EventLog,
    pub handler: UploadHandler,
}

impl TestPage {
    pub fn new(server_url: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let events: EventLog = Arc::default();
        let form = Arc::new(MockForm::default());
        let file_input = Arc::new(MockFileInput::default());
        let output = Arc::new(MockOutput {
            events: events.clone(),
            content: Mutex::new(Some(Fragment::Error {
                message: "previous result".to_string(),
            })),
            visible: AtomicBool::new(false),
        });
        let spinner = Arc::new(MockSpinner {
            events: events.clone(),
            visible: AtomicBool::new(false),
        });

        let config = UploadConfig::new(server_url).expect("valid server url");
        let service = UploadService::new(&config).expect("http client");
        let handler = UploadHandler::init(
            form.as_ref(),
            file_input.clone(),
            output.clone(),
            spinner.clone(),
            service,
        );

        Self {
            form,
            file_input,
            output,
            spinner,
            events,
            handler,
        }
    }

    pub fn select(&self, name: &str, bytes: &[u8]) {
        self.file_input
            .select(vec![SelectedFile::new(name, bytes.to_vec())]);
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Asserts the spinner was hidden before the output was last shown.
    pub fn assert_spinner_hidden_before_output_shown(&self) {
        let events = self.events();
        let shown = events
            .iter()
            .rposition(|e| *e == PageEvent::OutputShown)
            .expect("output shown");
        let hidden = events
            .iter()
            .rposition(|e| *e == PageEvent::SpinnerHidden)
            .expect("spinner hidden");

        assert!(hidden < shown, "unexpected event order: {:?}", events);
        assert!(!self.spinner.is_visible());
        assert!(self.output.is_visible());
    }
}

// =============================================================================
// Classify server
// =============================================================================

#[derive(Debug, Clone)]
pub struct ReceivedPart {
    pub name: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

pub type Received = Arc<Mutex<Vec<Vec<ReceivedPart>>>>;

pub async fn read_parts(mut multipart: Multipart) -> Vec<ReceivedPart> {
    let mut parts = Vec::new();

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap().to_vec();

        parts.push(ReceivedPart {
            name,
            file_name,
            content_type,
            bytes,
        });
    }

    parts
}

pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    format!("http://{}", addr)
}

/// Serves `/classify-file/` with a fixed JSON answer and records every upload.
pub async fn json_server(status: StatusCode, body: Value) -> (String, Received) {
    let received: Received = Arc::default();
    let recorder = received.clone();

    let app = Router::new().route(
        "/classify-file/",
        post(move |multipart: Multipart| {
            let recorder = recorder.clone();
            let body = body.clone();
            async move {
                let parts = read_parts(multipart).await;
                recorder.lock().unwrap().push(parts);
                (status, Json(body))
            }
        }),
    );

    (spawn_server(app).await, received)
}

/// A server URL nothing listens on.
pub fn closed_server_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
