//! Export report types for tracking lossiness and policy decisions.
//!
//! This module provides structured reporting for exports, similar to how
//! `validation::ValidationReport` tracks annotation set issues.

use serde::Serialize;
use std::fmt;

/// A report describing what an export keeps and what it drops.
///
/// Tracks input/output counts, lossiness warnings, and policy decisions
/// to help users understand exactly what happened during export.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExportReport {
    /// Target format name.
    pub format: String,
    /// Counts from the input annotation set.
    pub input: ExportCounts,
    /// Counts in the output (differ when annotations are skipped).
    pub output: ExportCounts,
    /// Issues discovered during export analysis.
    pub issues: Vec<ExportIssue>,
}

impl ExportReport {
    /// Create a new empty report for an export to `format`.
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            ..Default::default()
        }
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: ExportIssue) {
        self.issues.push(issue);
    }

    /// Count of warning-level issues (true lossiness).
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ExportSeverity::Warning)
            .count()
    }

    /// Count of info-level issues (policy decisions, notes).
    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ExportSeverity::Info)
            .count()
    }

    /// Returns true if this export loses information.
    ///
    /// An export is lossy if it has any warning-level issues.
    pub fn is_lossy(&self) -> bool {
        self.warning_count() > 0
    }

    /// Returns true if an issue with `code` was recorded.
    pub fn has_code(&self, code: ExportIssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Export to {}: {} annotations, {} categories",
            self.format, self.input.annotations, self.input.categories
        )?;

        if self.output != self.input {
            writeln!(
                f,
                "  output: {} annotations, {} categories",
                self.output.annotations, self.output.categories
            )?;
        }

        let warnings = self.warning_count();
        if warnings > 0 {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", warnings)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ExportSeverity::Warning)
            {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        let infos = self.info_count();
        if infos > 0 {
            writeln!(f)?;
            writeln!(f, "Notes ({}):", infos)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ExportSeverity::Info)
            {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        Ok(())
    }
}

/// Counts of annotation set elements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExportCounts {
    pub annotations: usize,
    pub categories: usize,
}

/// A single issue discovered during export analysis.
#[derive(Clone, Debug, Serialize)]
pub struct ExportIssue {
    pub severity: ExportSeverity,
    pub code: ExportIssueCode,
    pub message: String,
}

impl ExportIssue {
    /// Create a warning-level issue (indicates lossiness).
    pub fn warning(code: ExportIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ExportSeverity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Create an info-level issue (policy note).
    pub fn info(code: ExportIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ExportSeverity::Info,
            code,
            message: message.into(),
        }
    }
}

/// Severity level for export issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportSeverity {
    /// Information present in the set is missing from the output.
    Warning,
    /// A policy decision the reader of the output should know about.
    Info,
}

/// Stable issue codes for programmatic consumption.
///
/// These codes are part of the JSON schema and should remain stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportIssueCode {
    /// Annotations of a kind the format does not write were dropped.
    SkippedNonBbox,
    /// Annotations without usable geometry were dropped.
    SkippedMissingGeometry,
    /// Image width/height are unknown and written as 0.
    ImageSizeUnresolved,
    /// YOLO coordinates were normalized against the 1000x1000 placeholder.
    YoloPlaceholderImageSize,
    /// Category ids follow first-occurrence order of labels.
    CategoryIdsFirstOccurrence,
}
