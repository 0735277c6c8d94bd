use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// A problem found while reading or building value sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Stable issue code (e.g., "VS001").
    pub code: String,
    /// Human-readable message describing the issue.
    pub message: String,
    pub severity: IssueSeverity,
    /// Workbook or sheet the issue was found in.
    pub sheet: Option<String>,
    /// Count of occurrences.
    pub count: Option<u64>,
}

impl ValidationIssue {
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::new(code, message, IssueSeverity::Error)
    }

    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Self::new(code, message, IssueSeverity::Warning)
    }

    fn new(code: &str, message: impl Into<String>, severity: IssueSeverity) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity,
            sheet: None,
            count: None,
        }
    }

    #[must_use]
    pub fn in_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}

/// Issues accumulated over a parse or a build run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub issues: Vec<ValidationIssue>,
}

impl Diagnostics {
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.issues.extend(other.issues);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Whether an issue with the given code was recorded.
    pub fn contains(&self, code: &str) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }
}
