mod terminal;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use terminal::{CommandLineForm, OutputStyle, PathInput, TerminalOutput, TerminalSpinner};
use upload_handler::*;

/// Upload a document to the classify service and show its format, intent and
/// extracted fields.
#[derive(Parser, Debug)]
#[command(name = "classify", version)]
struct Args {
    /// Path to the file to classify (.txt, .json, .pdf, ...)
    file: PathBuf,

    /// Server origin, overrides CLASSIFY_SERVER_URL
    #[arg(long)]
    server: Option<String>,

    /// Print the HTML fragment instead of plain text
    #[arg(long)]
    html: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let config = match &args.server {
        Some(url) => UploadConfig::new(url)?,
        None => UploadConfig::from_env()?,
    };
    let file = SelectedFile::from_path(&args.file)?;
    let style = if args.html {
        OutputStyle::Html
    } else {
        OutputStyle::Text
    };

    let form = CommandLineForm::default();
    UploadHandler::init(
        &form,
        Arc::new(PathInput::new(file.clone())),
        Arc::new(TerminalOutput::new(style)),
        Arc::new(TerminalSpinner::new(file.name)),
        UploadService::new(&config)?,
    );

    let code = exit_code(&form.submit().await?);
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

/// 1 when an error was rendered, 0 otherwise.
fn exit_code(submission: &Submission) -> i32 {
    match submission {
        Submission::Rendered(outcome) if !outcome.is_success() => 1,
        _ => 0,
    }
}
