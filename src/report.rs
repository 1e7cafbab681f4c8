//! Terminal output for review runs.
//!
//! Each entity gets a bordered block:
//!
//! ```text
//! --- Analyzing Function: `add` (line 1) ---
//!
//! <analysis text>
//! --- End of Analysis for `add` ---
//! ```
//!
//! Colors are applied only when writing; nothing returned from this module
//! or from [`Analysis::text`] carries escape codes.

use colored::*;
use std::io::{self, Write};

use crate::llm::Analysis;
use crate::parser::SourceEntity;

/// Header line identifying an entity.
pub fn header(entity: &SourceEntity) -> String {
    format!(
        "--- Analyzing {}: `{}` (line {}) ---",
        entity.kind.label(),
        entity.name,
        entity.line
    )
}

/// Footer line closing an entity's report.
pub fn footer(entity: &SourceEntity) -> String {
    format!("--- End of Analysis for `{}` ---", entity.name)
}

/// Write one entity's report.
pub fn write_report<W: Write>(
    out: &mut W,
    entity: &SourceEntity,
    analysis: &Analysis,
) -> io::Result<()> {
    writeln!(out, "{}", header(entity).bright_magenta().bold())?;
    writeln!(out)?;

    match analysis {
        Analysis::Completed(_) => writeln!(out, "{}", analysis.text())?,
        Analysis::Failed { .. } => writeln!(out, "{}", analysis.text().red())?,
    }

    writeln!(out, "{}", footer(entity).bright_magenta().bold())?;
    writeln!(out)?;
    writeln!(out)?;
    Ok(())
}

/// Progress line (green) followed by a blank line.
pub fn write_status<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{}", message.green())?;
    writeln!(out)
}

/// Warning line (yellow).
pub fn write_warning<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{}", message.yellow())
}

/// Error line (red).
pub fn write_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{}", message.red())
}
