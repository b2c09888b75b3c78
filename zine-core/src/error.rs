//! Error types for project document operations.

use thiserror::Error;

/// Result type for project document operations.
pub type ZineResult<T> = Result<T, ZineError>;

/// Errors that can occur in project document operations.
#[derive(Debug, Error)]
pub enum ZineError {
    /// A layout template failed validation.
    #[error("Invalid layout template: {0}")]
    Template(#[from] TemplateValidationError),

    /// An imported project payload failed the validation gate.
    #[error("Invalid project payload: {0}")]
    InvalidProject(String),

    /// Project serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A layout template failed validation.
///
/// Carries every violation found, not just the first, so callers can report
/// the complete error set from a single registration attempt.
#[derive(Debug, Clone, Error)]
#[error("template validation failed: {}", errors.join("; "))]
pub struct TemplateValidationError {
    /// All violations found in the template.
    pub errors: Vec<String>,
}

impl TemplateValidationError {
    /// Wrap a non-empty list of violations.
    #[must_use]
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }
}
