//! JSON output formatter for machine processing

use crate::domain::{FileOutcome, UpdateSummary};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Skipped manifests are listed only in verbose mode
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full run
#[derive(Serialize)]
struct JsonOutput<'a> {
    package: &'a str,
    target_version: &'a str,
    package_manager: String,
    dry_run: bool,
    summary: JsonCounts,
    manifests: Vec<JsonManifest<'a>>,
}

/// Aggregate counts
#[derive(Serialize)]
struct JsonCounts {
    discovered: usize,
    updated: usize,
    skipped: usize,
    failed: usize,
}

/// One manifest and its outcome
#[derive(Serialize)]
struct JsonManifest<'a> {
    path: String,
    #[serde(flatten)]
    outcome: &'a FileOutcome,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, summary: &UpdateSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let manifests = summary
            .manifests
            .iter()
            .filter(|m| self.verbosity == Verbosity::Verbose || !m.outcome.is_skipped())
            .map(|m| JsonManifest {
                path: m.path.display().to_string(),
                outcome: &m.outcome,
            })
            .collect();

        let output = JsonOutput {
            package: &summary.package,
            target_version: summary.target_version.as_str(),
            package_manager: summary.package_manager.to_string(),
            dry_run: summary.dry_run,
            summary: JsonCounts {
                discovered: summary.files_discovered(),
                updated: summary.files_updated(),
                skipped: summary.files_skipped(),
                failed: summary.files_failed(),
            },
            manifests,
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
