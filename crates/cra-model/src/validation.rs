use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Error,
    Warning,
}

/// A structural problem found in a single record.
///
/// Validation is degrade-and-report: errors are collected alongside the
/// computed metrics, never instead of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordError {
    /// Stable check code (e.g. "CRA001").
    pub code: String,
    /// Fixed human-readable message.
    pub message: String,
    pub severity: ErrorSeverity,
    /// Logical field the check inspected (if applicable).
    pub field: Option<String>,
    /// Patient identifier of the offending record (if resolvable).
    pub patient_id: Option<String>,
}

/// Validation outcome for a batch of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<RecordError>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == ErrorSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == ErrorSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}
