use std::sync::{Arc, Mutex};
use upload_handler::*;

// Minimal page: one hard-coded file, output and spinner printed to stdout.

struct Form(Mutex<Option<UploadHandler>>);

impl UploadForm for Form {
    fn attach(&self, handler: UploadHandler) {
        *self.0.lock().unwrap() = Some(handler);
    }
}

struct Submit;

impl SubmitEvent for Submit {
    fn prevent_default(&mut self) {}
}

struct Input;

impl FileInput for Input {
    fn selected_files(&self) -> Vec<SelectedFile> {
        vec![SelectedFile::new(
            "sample_email.txt",
            b"From: buyer@example.com\nSubject: Request for quotation\n\nPlease quote 200 units.".to_vec(),
        )
        .with_content_type("text/plain")]
    }
}

struct Output(Mutex<Option<Fragment>>);

impl OutputPanel for Output {
    fn clear(&self) {
        *self.0.lock().unwrap() = None;
    }

    fn set_content(&self, fragment: &Fragment) {
        *self.0.lock().unwrap() = Some(fragment.clone());
    }

    fn set_visible(&self, visible: bool) {
        if let (true, Some(fragment)) = (visible, self.0.lock().unwrap().as_ref()) {
            match fragment.to_html() {
                Ok(html) => println!("{}", html),
                Err(e) => eprintln!("Failed to render output: {}", e),
            }
        }
    }
}

struct Dots;

impl Spinner for Dots {
    fn set_visible(&self, visible: bool) {
        println!("{}", if visible { "🔍 Uploading..." } else { "✅ Settled" });
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = UploadConfig::from_env()?;
    println!("Posting to {}", config.endpoint()?);

    let form = Form(Mutex::new(None));
    let handler = UploadHandler::init(
        &form,
        Arc::new(Input),
        Arc::new(Output(Mutex::new(None))),
        Arc::new(Dots),
        UploadService::new(&config)?,
    );

    let submission = handler.on_submit(&mut Submit).await;
    println!("{:?}", submission);

    Ok(())
}
