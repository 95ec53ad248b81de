//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One line per updated or failed manifest, with colors
//! - Semantic version change type indication (major/minor/patch)
//! - Skipped manifests and command stderr in verbose mode
//! - The final discovered-manifest count

use crate::domain::{
    strip_range_prefix, DependencyKind, FailureReason, FileOutcome, ManifestResult, SkipReason,
    UpdateSummary,
};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use semver::Version;
use std::io::Write;

/// Lines of command stderr shown for a failed install or test
const STDERR_TAIL_LINES: usize = 10;

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Unknown or unparseable
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between two ranges such as `^1.2.3`
    pub fn from_ranges(old: &str, new: &str) -> Self {
        let parse = |range: &str| Version::parse(strip_range_prefix(range).trim()).ok();

        match (parse(old), parse(new)) {
            (Some(old), Some(new)) => {
                if new.major != old.major {
                    VersionChangeType::Major
                } else if new.minor != old.minor {
                    VersionChangeType::Minor
                } else {
                    VersionChangeType::Patch
                }
            }
            _ => VersionChangeType::Unknown,
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionChangeType::Major => "major".red().bold().to_string(),
            VersionChangeType::Minor => "minor".yellow().to_string(),
            VersionChangeType::Patch => "patch".green().to_string(),
            VersionChangeType::Unknown => "?".dimmed().to_string(),
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Unknown => "?",
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn paint(&self, text: &str, style: fn(&str) -> colored::ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn write_header(&self, summary: &UpdateSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = if summary.dry_run {
            format!("{} ", self.paint("(dry-run)", |s| s.cyan()))
        } else {
            String::new()
        };
        writeln!(
            writer,
            "{}Updating {} to {} ({})",
            prefix,
            self.paint(&summary.package, |s| s.bold()),
            self.paint(summary.target_version.as_str(), |s| s.bright_white().bold()),
            summary.package_manager
        )
    }

    fn write_updated(
        &self,
        result: &ManifestResult,
        kind: DependencyKind,
        previous: &str,
        current: &str,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let change_type = VersionChangeType::from_ranges(previous, current);
        let label = if self.color {
            change_type.colored_label()
        } else {
            change_type.label().to_string()
        };
        let dev_marker = match kind {
            DependencyKind::Dev => format!(" {}", self.paint("(dev)", |s| s.dimmed())),
            DependencyKind::Runtime => String::new(),
        };

        writeln!(
            writer,
            "  {} {} {} {} {} [{}]{}",
            self.paint("✓", |s| s.green()),
            result.path.display(),
            self.paint(previous, |s| s.dimmed()),
            self.paint("→", |s| s.dimmed()),
            self.paint(current, |s| s.bright_white().bold()),
            label,
            dev_marker
        )
    }

    fn write_skipped(
        &self,
        result: &ManifestResult,
        reason: SkipReason,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let line = format!("  - {} ({})", result.path.display(), reason);
        writeln!(writer, "{}", self.paint(&line, |s| s.dimmed()))
    }

    fn write_failed(
        &self,
        result: &ManifestResult,
        reason: &FailureReason,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(
            writer,
            "  {} {}: {}",
            self.paint("✗", |s| s.red()),
            result.path.display(),
            self.paint(&reason.to_string(), |s| s.red())
        )?;

        if self.verbosity == Verbosity::Verbose {
            if let FailureReason::ExternalCommand { stderr, .. } = reason {
                for line in stderr_tail(stderr) {
                    writeln!(writer, "      {}", self.paint(line, |s| s.dimmed()))?;
                }
            }
        }
        Ok(())
    }

    fn write_totals(&self, summary: &UpdateSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let found = format!("{} package.json file(s) found", summary.files_discovered());
        if self.verbosity == Verbosity::Quiet {
            return writeln!(writer, "{}", found);
        }

        let verb = if summary.dry_run {
            "would update"
        } else {
            "updated"
        };
        let updated = format!("{} {}", summary.files_updated(), verb);
        let failed = format!("{} failed", summary.files_failed());
        writeln!(
            writer,
            "{} ({}, {} skipped, {})",
            found,
            self.paint(&updated, |s| s.green()),
            summary.files_skipped(),
            if summary.has_failures() {
                self.paint(&failed, |s| s.red())
            } else {
                failed
            }
        )
    }
}

/// Last few non-empty lines of command stderr
fn stderr_tail(stderr: &str) -> Vec<&str> {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].to_vec()
}

impl OutputFormatter for TextFormatter {
    fn format(&self, summary: &UpdateSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity != Verbosity::Quiet {
            self.write_header(summary, writer)?;
        }

        for result in &summary.manifests {
            match &result.outcome {
                FileOutcome::Updated {
                    kind,
                    previous,
                    current,
                    ..
                } => {
                    if self.verbosity != Verbosity::Quiet {
                        self.write_updated(result, *kind, previous, current, writer)?;
                    }
                }
                FileOutcome::Skipped { reason } => {
                    if self.verbosity == Verbosity::Verbose {
                        self.write_skipped(result, *reason, writer)?;
                    }
                }
                FileOutcome::Failed { reason } => self.write_failed(result, reason, writer)?,
            }
        }

        self.write_totals(summary, writer)
    }
}
