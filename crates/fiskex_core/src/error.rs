//! Error types for the core data model.
//!
//! This module defines the errors raised by the typed field model when a
//! record value is assigned with an incompatible type or to a field the
//! table schema does not declare.

use thiserror::Error;

/// Errors raised while building a record through the typed field model.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Value type does not match the field's declared kind
    #[error("Invalid value for field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// Field name
        field: String,
        /// Kind the field declares
        expected: &'static str,
        /// Kind of the assigned value
        actual: &'static str,
    },

    /// Datetime value carries no timezone information
    #[error("Value for field '{0}' is not timezone-aware")]
    NaiveDateTime(String),

    /// Field is not declared by the record's schema
    #[error("Field '{field}' does not exist in table '{filename}'")]
    UnknownField {
        /// Assigned field name
        field: String,
        /// Table file the schema describes
        filename: String,
    },
}

impl FieldError {
    /// Creates a new type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Creates a new unknown field error.
    pub fn unknown_field(field: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
            filename: filename.into(),
        }
    }
}
