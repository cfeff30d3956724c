use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while building or converting an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConversionError {
    /// A semantic model value was rejected (unknown code, bad format).
    #[error("model error: {0}")]
    Model(String),

    /// A mapping step could not complete.
    #[error("mapping error: {0}")]
    Mapping(String),

    /// A rule expression could not be parsed or evaluated.
    #[error("expression error: {0}")]
    Expression(String),
}

/// How serious a [`ConversionIssue`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// The field could not be mapped as intended.
    Error,
    /// The field was mapped with a substituted value.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// A single non-fatal mapping failure, recorded instead of raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionIssue {
    pub severity: Severity,
    /// Destination path the issue is about (e.g. "CedentePrestatore.IscrizioneREA").
    pub field: String,
    /// Human-readable cause.
    pub message: String,
}

impl std::fmt::Display for ConversionIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.field, self.message)
    }
}

impl ConversionIssue {
    /// Create an error-level issue.
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a warning-level issue.
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_display() {
        let issue = ConversionIssue::error("CedentePrestatore", "no seller party in header");
        assert_eq!(
            issue.to_string(),
            "[error] CedentePrestatore: no seller party in header"
        );
        assert!(issue.is_error());
    }

    #[test]
    fn warning_is_not_error() {
        let issue = ConversionIssue::warning("RegimeFiscale", "default substituted");
        assert!(!issue.is_error());
        assert!(issue.to_string().starts_with("[warning]"));
    }

    #[test]
    fn error_display() {
        let err = ConversionError::Model("unknown country code 'XX'".into());
        assert_eq!(err.to_string(), "model error: unknown country code 'XX'");
    }
}
