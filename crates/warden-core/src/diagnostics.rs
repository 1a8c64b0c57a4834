//! Non-fatal findings reported next to a successful operation.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A finding about the state of a resource. The state itself is kept even
/// when a diagnostic has [`Severity::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Field the finding refers to.
    pub field: String,
    pub summary: String,
}

impl Diagnostic {
    #[must_use]
    pub fn warning(field: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            summary: summary.into(),
        }
    }

    #[must_use]
    pub fn error(field: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            summary: summary.into(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{level}: {}: {}", self.field, self.summary)
    }
}
