//! Error types for field and form construction and lookup

use rusty_forms_validation::RuleError;
use thiserror::Error;

/// Errors raised by [`Field`](crate::Field) and [`Form`](crate::Form).
///
/// Construction errors are fatal for the component being built. Lookup errors
/// leave the form untouched.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("every input field needs a name")]
    MissingName,

    #[error("two input fields share the name `{name}`")]
    DuplicateFieldName { name: String },

    #[error("field `{field}` declares an invalid pattern")]
    InvalidPattern {
        field: String,
        #[source]
        source: RuleError,
    },

    #[error("no input field named `{name}`")]
    UnknownField { name: String },
}

impl StateError {
    pub fn unknown_field(name: impl Into<String>) -> Self {
        StateError::UnknownField { name: name.into() }
    }

    /// True for errors that abort construction.
    pub fn is_construction_error(&self) -> bool {
        !matches!(self, StateError::UnknownField { .. })
    }
}

pub type Result<T, E = StateError> = std::result::Result<T, E>;
