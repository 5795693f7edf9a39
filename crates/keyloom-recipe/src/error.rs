//! Error types for recipe and instruction parsing.
//!
//! Malformed JSON and invalid field values are distinct kinds: callers
//! reject the former as unparseable input and the latter as a
//! well-formed-but-wrong recipe. Both surface before any cryptographic
//! work happens.

use thiserror::Error;

/// Errors produced while parsing a recipe or instruction document.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The input was not valid JSON.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON was well formed but a field value is invalid, out of
    /// range, or conflicts with another field.
    #[error("invalid recipe value for `{field}`: {reason}")]
    InvalidValue {
        /// The recipe field that failed validation
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl RecipeError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue { field, reason: reason.into() }
    }
}
