//! Corpus application and aggregation
//!
//! Runs a synthesized parser across decoded batches and accumulates a
//! [`ParseReport`]:
//! - entries with a different diagnostic kind are skipped
//! - entries whose message carries no payload are skipped silently
//! - a decode error is schema drift and aborts the run
//!
//! Failed/no-diagnostics project lists are concatenated verbatim in
//! batch order; no deduplication, no sorting.

use crate::error::DecodeError;
use crate::schema::TypedRecord;
use crate::synth::Parser;
use schemalog_model::LogBatch;
use serde::Serialize;
use std::collections::HashMap;

/// One successfully decoded entry with its provenance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedEntry {
    /// Decoded payload
    pub record: TypedRecord,
    /// Project the entry came from
    pub project: String,
    /// Source location string
    pub location: String,
}

/// Aggregate result of applying the parser to a corpus
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseReport {
    /// Projects that failed to compile, batch order, duplicates kept
    pub failed_projects: Vec<String>,
    /// Projects with no diagnostics collected, batch order
    pub no_diagnostics_projects: Vec<String>,
    /// Decoded records in corpus order
    pub records: Vec<ParsedEntry>,
}

impl ParseReport {
    /// Records per project, sorted by descending count, ties broken by
    /// ascending project name
    #[must_use]
    pub fn project_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in &self.records {
            *counts.entry(entry.project.as_str()).or_default() += 1;
        }
        let mut rows: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(project, count)| (project.to_string(), count))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        rows
    }
}

/// Apply `parser` to every matching entry across `batches`
///
/// Propagates the first [`DecodeError`]; the inferred schema no longer
/// matching the corpus is fatal, never silently coerced.
pub fn apply<I>(
    batches: I,
    target_diagnostic: &str,
    parser: &Parser,
) -> Result<ParseReport, DecodeError>
where
    I: IntoIterator<Item = LogBatch>,
{
    let mut report = ParseReport::default();

    for batch in batches {
        report.failed_projects.extend(batch.failed_projects);
        report
            .no_diagnostics_projects
            .extend(batch.no_diagnostics_projects);

        for entry in batch.entries {
            if entry.diagnostic != target_diagnostic {
                continue;
            }
            if let Some(record) = parser.parse(&entry.message)? {
                report.records.push(ParsedEntry {
                    record,
                    project: entry.project,
                    location: entry.location,
                });
            }
        }
    }

    tracing::debug!(
        records = report.records.len(),
        failed = report.failed_projects.len(),
        "corpus application complete"
    );
    Ok(report)
}
