//! pyreview CLI entry point.

use clap::Parser;
use pyreview::cli::{self, Cli, EXIT_FAILED};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let exit_code = match cli::run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_FAILED
        }
    };

    std::process::exit(exit_code);
}

/// Log to stderr so stdout carries only the report.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
