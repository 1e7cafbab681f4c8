//! Review runner that drives extraction, rendering, requests and printing.

use std::io::{self, Write};
use std::path::Path;

use crate::error::{FileError, ReviewError};
use crate::llm::{self, AnalysisService};
use crate::parser::{self, SourceEntity};
use crate::render;
use crate::report;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Entities that received a report (successful or not).
    pub analyzed: usize,
    /// Entities whose request failed.
    pub failed: usize,
}

/// How a review of one file ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The source contained no definitions; nothing was requested.
    NoEntities,
    Reviewed(RunSummary),
}

/// Executes the per-entity loop against one analysis service.
pub struct Runner<'a, S: ?Sized> {
    service: &'a S,
}

impl<'a, S> Runner<'a, S>
where
    S: AnalysisService + ?Sized,
{
    /// Create a new runner for the given service.
    pub fn new(service: &'a S) -> Self {
        Self { service }
    }

    /// Review every entity in order, writing one report per entity.
    ///
    /// Each request completes before the next one starts. A failed request
    /// produces an error report and the loop moves on.
    pub async fn run<W: Write>(
        &self,
        source: &str,
        entities: &[SourceEntity],
        out: &mut W,
    ) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();

        for entity in entities {
            tracing::info!(kind = %entity.kind, name = %entity.name, line = entity.line, "analyzing");

            let snippet = render::render_snippet(source, entity);
            let analysis = llm::request_analysis(self.service, &snippet).await;

            if analysis.is_failed() {
                summary.failed += 1;
            }
            summary.analyzed += 1;

            report::write_report(out, entity, &analysis)?;
            out.flush()?;
        }

        tracing::debug!(
            analyzed = summary.analyzed,
            failed = summary.failed,
            "review finished"
        );
        Ok(summary)
    }
}

/// Extract definitions from `source` and review each one.
///
/// `label` names the source in progress messages (usually the file path).
pub async fn review_source<S, W>(
    service: &S,
    label: &str,
    source: &str,
    out: &mut W,
) -> Result<ReviewOutcome, ReviewError>
where
    S: AnalysisService + ?Sized,
    W: Write,
{
    report::write_status(out, &format!("Parsing '{}'...", label))?;

    let entities = parser::extract(source)?;

    if entities.is_empty() {
        report::write_warning(
            out,
            &format!("No functions or classes found to analyze in '{}'.", label),
        )?;
        return Ok(ReviewOutcome::NoEntities);
    }

    report::write_status(
        out,
        &format!(
            "Found {} functions/classes to analyze. Contacting AI...",
            entities.len()
        ),
    )?;

    let summary = Runner::new(service).run(source, &entities, out).await?;

    Ok(ReviewOutcome::Reviewed(summary))
}

/// Read the file at `path` and review it.
pub async fn review_file<S, W>(
    service: &S,
    path: &Path,
    out: &mut W,
) -> Result<ReviewOutcome, ReviewError>
where
    S: AnalysisService + ?Sized,
    W: Write,
{
    let source = std::fs::read_to_string(path).map_err(|e| FileError::from_io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "loaded source file");

    review_source(service, &path.display().to_string(), &source, out).await
}
