//! Error taxonomy for a review run.
//!
//! Configuration, file and syntax errors are fatal and end the run with exit
//! code 1. Service errors are never fatal: they travel inside
//! [`Analysis::Failed`](crate::llm::Analysis) so the remaining entities are
//! still reviewed.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling [`Settings`](crate::config::Settings).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} not found. Please set it in the environment or a .env file.")]
    MissingCredential(&'static str),
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised while loading the file under review.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("File not found at '{}'", .0.display())]
    NotFound(PathBuf),
    #[error("Error reading file: {0}")]
    Read(#[source] std::io::Error),
}

impl FileError {
    /// Classify an I/O error raised while reading `path`.
    pub fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            FileError::NotFound(path.to_path_buf())
        } else {
            FileError::Read(err)
        }
    }
}

/// The source text could not be parsed as Python.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (line {line}, column {column})")]
pub struct SyntaxError {
    /// Short description of the first offending node.
    pub message: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Failures talking to the remote model.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response contained no message content")]
    EmptyResponse,
}

/// Fatal errors that abort a review run.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    File(#[from] FileError),
    #[error("Invalid Python syntax in file: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
