//! Page elements backed by the terminal: the selected file comes from the
//! command line, the spinner is a status line on stderr and the output panel
//! prints to stdout once it becomes visible.

use anyhow::anyhow;
use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};
use upload_handler::*;

#[derive(Default)]
pub struct CommandLineForm {
    handler: OnceLock<UploadHandler>,
}

impl UploadForm for CommandLineForm {
    fn attach(&self, handler: UploadHandler) {
        if self.handler.set(handler).is_err() {
            log::warn!("Form already has an upload handler attached");
        }
    }
}

impl CommandLineForm {
    pub async fn submit(&self) -> anyhow::Result<Submission> {
        let handler = self
            .handler
            .get()
            .ok_or_else(|| anyhow!("No upload handler attached to the form"))?;

        Ok(handler.on_submit(&mut CommandLineSubmit).await)
    }
}

struct CommandLineSubmit;

impl SubmitEvent for CommandLineSubmit {
    // Nothing submits natively on a terminal.
    fn prevent_default(&mut self) {}
}

pub struct PathInput {
    file: SelectedFile,
}

impl PathInput {
    pub fn new(file: SelectedFile) -> Self {
        Self { file }
    }
}

impl FileInput for PathInput {
    fn selected_files(&self) -> Vec<SelectedFile> {
        vec![self.file.clone()]
    }
}

#[derive(Debug, Clone, Copy)]
pub enum OutputStyle {
    Text,
    Html,
}

pub struct TerminalOutput<W = Stdout> {
    style: OutputStyle,
    content: Mutex<Option<Fragment>>,
    out: Mutex<W>,
}

impl TerminalOutput {
    pub fn new(style: OutputStyle) -> Self {
        Self::with_writer(style, io::stdout())
    }
}

impl<W: Write> TerminalOutput<W> {
    pub fn with_writer(style: OutputStyle, out: W) -> Self {
        Self {
            style,
            content: Mutex::new(None),
            out: Mutex::new(out),
        }
    }

    fn print(&self, fragment: &Fragment) -> anyhow::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        match self.style {
            OutputStyle::Text => writeln!(out, "\n=== Classification ===\n{}", fragment)?,
            OutputStyle::Html => writeln!(out, "{}", fragment.to_html()?)?,
        }
        out.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> OutputPanel for TerminalOutput<W> {
    fn clear(&self) {
        *self.content.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn set_content(&self, fragment: &Fragment) {
        *self.content.lock().unwrap_or_else(PoisonError::into_inner) = Some(fragment.clone());
    }

    fn set_visible(&self, visible: bool) {
        if !visible {
            return;
        }

        let content = self.content.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(fragment) = content.as_ref() {
            if let Err(e) = self.print(fragment) {
                log::warn!("Failed to print classification: {}", e);
            }
        }
    }
}

pub struct TerminalSpinner {
    label: String,
    visible: AtomicBool,
}

impl TerminalSpinner {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            visible: AtomicBool::new(false),
        }
    }
}

impl Spinner for TerminalSpinner {
    fn set_visible(&self, visible: bool) {
        if self.visible.swap(visible, Ordering::SeqCst) == visible {
            return;
        }

        if visible {
            eprint!("⏳ Classifying {}... ", self.label);
            io::stderr().flush().ok();
        } else {
            eprintln!("done");
        }
    }
}
