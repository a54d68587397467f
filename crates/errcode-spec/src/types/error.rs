use serde::{Deserialize, Serialize};

// ── Diagnostic code constants ──

pub const E_PARSE_ERROR: &str = "E_PARSE_ERROR";
pub const E_MISSING_FIELD: &str = "E_MISSING_FIELD";
pub const E_DUPLICATE_CODE: &str = "E_DUPLICATE_CODE";
pub const E_INVALID_IDENTIFIER: &str = "E_INVALID_IDENTIFIER";
pub const W_DUPLICATE_CONTEXT_FIELD: &str = "W_DUPLICATE_CONTEXT_FIELD";

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single parsing/validation diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Machine-readable stable code
    pub code: String,
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Contract file the diagnostic refers to
    pub file: String,
    /// JSONPath to the offending field
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Aggregated validation report, entries in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// No errors (warnings are ok)
    pub ok: bool,
    pub errors: Vec<ErrorEntry>,
}

impl ValidationReport {
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
        }
    }

    /// Add an entry and update the ok flag
    pub fn push(&mut self, entry: ErrorEntry) {
        if entry.severity == Severity::Error {
            self.ok = false;
        }
        self.errors.push(entry);
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.errors.iter().filter(|e| e.severity == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        !self.ok
    }

    /// The first error-severity entry in document order.
    pub fn first_error(&self) -> Option<&ErrorEntry> {
        self.errors.iter().find(|e| e.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.errors
            .iter()
            .filter(|e| e.severity == Severity::Warning)
    }
}

impl ErrorEntry {
    pub fn error(code: &str, message: impl Into<String>, file: &str, path: &str) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Error,
            message: message.into(),
            file: file.to_string(),
            path: path.to_string(),
            suggestion: None,
        }
    }

    pub fn warning(code: &str, message: impl Into<String>, file: &str, path: &str) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Warning,
            message: message.into(),
            file: file.to_string(),
            path: path.to_string(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({}:{})",
            self.code, self.message, self.file, self.path
        )
    }
}
