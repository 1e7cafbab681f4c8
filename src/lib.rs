//! pyreview - AI code review for Python files.
//!
//! pyreview extracts every function and class definition from a Python
//! file, sends each one to a chat-completion model for review, and prints
//! the formatted replies to the terminal.
//!
//! # Architecture
//!
//! The pipeline is strictly sequential, one entity at a time:
//!
//! - `parser`: tree-sitter extraction of definitions in pre-order
//! - `render`: snippet regeneration from each definition's subtree
//! - `llm`: prompt template, `AnalysisService` trait and the OpenAI client
//! - `report`: bordered, colored terminal output
//! - `pipeline`: the per-entity loop (render, request, print)
//! - `config`: credential and model settings
//! - `cli`: argument parsing and exit codes

pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod report;

pub use config::Settings;
pub use error::{ConfigError, FileError, ReviewError, ServiceError, SyntaxError};
pub use llm::{request_analysis, Analysis, AnalysisService, OpenAiClient, Prompt};
pub use parser::{extract, EntityKind, SourceEntity, Span};
pub use pipeline::{review_file, review_source, ReviewOutcome, RunSummary, Runner};
pub use render::render_snippet;
