//! Error types for textwash-core.

use crate::classify::ClassifyError;
use crate::config::ConfigError;
use thiserror::Error;

/// Result type for anonymization operations.
pub type Result<T> = std::result::Result<T, AnonymizeError>;

/// Anonymization error with actionable context
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnonymizeError {
    /// Unsupported language or model selection.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// A requested entity label is not produced by the classifier.
    #[error(
        "Unknown entity label '{label}'. Please ensure that all values refer to existing entities separated by comma. Available entities are {}.",
        .available.join(", ")
    )]
    InvalidEntityFilter {
        label: String,
        available: Vec<String>,
    },

    /// A phrase could not be turned into a boundary-safe pattern.
    /// Recovered by literal substring replacement; only ever logged.
    #[error("Could not build a boundary-safe pattern for {phrase:?}: {message}")]
    PatternCompilation { phrase: String, message: String },

    /// The classifier failed on a document.
    #[error("Classification failed: {0}")]
    Classification(#[from] ClassifyError),
}

impl AnonymizeError {
    /// Create an invalid entity filter error.
    pub fn invalid_filter(label: impl Into<String>, available: Vec<String>) -> Self {
        AnonymizeError::InvalidEntityFilter {
            label: label.into(),
            available,
        }
    }

    /// Create a pattern compilation error.
    pub fn pattern_compilation(phrase: impl Into<String>, message: impl ToString) -> Self {
        AnonymizeError::PatternCompilation {
            phrase: phrase.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error only affects the document being processed.
    ///
    /// Configuration and filter errors are raised before any document is
    /// touched and should abort the whole run.
    pub fn is_per_document(&self) -> bool {
        matches!(
            self,
            AnonymizeError::Classification(_) | AnonymizeError::PatternCompilation { .. }
        )
    }
}
