//! Container document model
//!
//! One corpus file is a YAML document grouping diagnostic entries by
//! project, plus top-level lists of failed builds and builds that
//! produced no diagnostics. Wire keys are fixed by the producer and
//! kept verbatim here.

use indexmap::IndexMap;
use serde::Deserialize;

/// One diagnostic line inside a project's log
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiagnosticRecord {
    /// Source location the diagnostic was reported at
    pub location: String,
    /// Diagnostic kind identifier
    #[serde(rename = "name")]
    pub diagnostic: String,
    /// Raw diagnostic message, possibly carrying a payload
    pub message: String,
}

/// One decoded log-container file
///
/// Project order follows document order; inference depends on it for
/// first-seen field ordering, so the map must not be re-sorted.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Branch the corpus was built from
    #[serde(rename = "kotlin.git-branch")]
    pub branch: String,
    /// Commit the corpus was built from
    #[serde(rename = "kotlin.git-commit")]
    pub commit: String,
    /// Projects that compiled but produced no diagnostics
    #[serde(rename = "kup-builds-with-no-diagnostics-found")]
    pub no_diagnostics_builds: Vec<String>,
    /// Projects that failed to compile
    #[serde(rename = "failed-kup-builds")]
    pub failed_builds: Vec<String>,
    /// Diagnostics grouped by project, in document order
    #[serde(rename = "compilation-diagnostics-log")]
    pub logs: IndexMap<String, Vec<DiagnosticRecord>>,
}

/// One log record, flattened out of its container grouping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Project the entry belongs to
    pub project: String,
    /// Source location string
    pub location: String,
    /// Diagnostic kind identifier
    pub diagnostic: String,
    /// Raw message text
    pub message: String,
}

/// Decoded contents of one container file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogBatch {
    /// Projects that failed to compile, in document order
    pub failed_projects: Vec<String>,
    /// Projects with no diagnostics collected, in document order
    pub no_diagnostics_projects: Vec<String>,
    /// Flattened entries, project by project in document order
    pub entries: Vec<RawEntry>,
}

impl Document {
    /// Flatten this document into a batch of raw entries
    #[must_use]
    pub fn into_batch(self) -> LogBatch {
        let mut entries = Vec::new();
        for (project, records) in self.logs {
            for record in records {
                entries.push(RawEntry {
                    project: project.clone(),
                    location: record.location,
                    diagnostic: record.diagnostic,
                    message: record.message,
                });
            }
        }
        LogBatch {
            failed_projects: self.failed_builds,
            no_diagnostics_projects: self.no_diagnostics_builds,
            entries,
        }
    }
}

/// Decode one container document into a batch
pub fn decode_batch(text: &str) -> Result<LogBatch, serde_yaml::Error> {
    let document: Document = serde_yaml::from_str(text)?;
    Ok(document.into_batch())
}
