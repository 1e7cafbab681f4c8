//! Command-line interface for pyreview.

use clap::Parser;
use std::io;
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{FileError, ReviewError};
use crate::llm::OpenAiClient;
use crate::pipeline::{self, ReviewOutcome};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;

/// Analyze a Python file using AI.
///
/// Every function and class in the file, nested ones included, is sent to
/// a language model for a summary, a logic walkthrough, refactoring
/// suggestions, potential bugs and a generated docstring.
#[derive(Parser)]
#[command(name = "pyreview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the Python file to analyze.
    pub file_path: PathBuf,
}

/// Run a review using the process environment.
pub async fn run(cli: &Cli) -> anyhow::Result<i32> {
    run_with_env(cli, |key| std::env::var(key).ok()).await
}

/// Run a review with an explicit environment lookup.
///
/// Settings are resolved before the input file is touched, so a missing
/// credential fails the run even when the file does not exist.
pub async fn run_with_env<F>(cli: &Cli, env: F) -> anyhow::Result<i32>
where
    F: Fn(&str) -> Option<String>,
{
    let settings = match Settings::load(env) {
        Ok(settings) => settings,
        Err(e) => return fail(&ReviewError::from(e)),
    };
    tracing::debug!(?settings, "resolved settings");

    let client = OpenAiClient::new(&settings)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match pipeline::review_file(&client, &cli.file_path, &mut out).await {
        Ok(ReviewOutcome::NoEntities) => Ok(EXIT_SUCCESS),
        Ok(ReviewOutcome::Reviewed(summary)) => {
            if summary.failed > 0 {
                tracing::warn!(
                    failed = summary.failed,
                    total = summary.analyzed,
                    "some analyses could not be completed"
                );
            }
            Ok(EXIT_SUCCESS)
        }
        Err(ReviewError::Output(e)) => Err(e.into()),
        Err(e) => fail(&e),
    }
}

/// Print a fatal error and return the failure exit code.
fn fail(err: &ReviewError) -> anyhow::Result<i32> {
    report::write_error(&mut io::stderr(), &error_message(err))?;
    Ok(EXIT_FAILED)
}

/// User-facing text for a fatal error.
pub fn error_message(err: &ReviewError) -> String {
    match err {
        ReviewError::File(FileError::Read(_)) => err.to_string(),
        _ => format!("Error: {}", err),
    }
}
