//! Error types

pub use pagedom::HandlerError;

use crate::value::KeyValue;

/// Error information for a field value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message} (got '{value}')")]
pub struct FieldValidationError {
    /// The field that failed validation.
    pub field: String,
    /// The rejected input.
    pub value: String,
    /// Human-readable validation error message.
    pub message: String,
}

impl FieldValidationError {
    /// Creates a new field validation error.
    pub fn new(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by table construction and keyed access.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    /// Malformed construction input.
    #[error("table configuration error: {0}")]
    Config(String),

    /// A record lacks the primary-key field.
    #[error("record {row} has no primary key field '{field}'")]
    MissingField { field: String, row: usize },

    /// Two records share a primary-key value.
    #[error("duplicate value '{key}' for primary key '{field}'")]
    DuplicateKey { field: String, key: KeyValue },

    /// A keyed accessor was used on a table without a primary key.
    #[error("table has no primary key")]
    NoPrimaryKey,

    /// No row is indexed under the key.
    #[error("no row with key '{0}'")]
    UnknownKey(KeyValue),

    /// The field is not one of the table's headers.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// A row or cell outlived the table it belonged to.
    #[error("row or cell is no longer attached to a table")]
    Detached,

    /// An edit reached a cell whose inputs are locked.
    #[error("cell '{0}' is disabled")]
    Disabled(String),

    /// A committed value was rejected by the field's validation rules.
    #[error("validation failed: {0}")]
    Validation(FieldValidationError),
}

impl From<TableError> for HandlerError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::Detached => HandlerError::Detached(err.to_string()),
            other => HandlerError::Failed(other.to_string()),
        }
    }
}

/// Errors raised by the in-memory authentication store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("unknown user '{0}'")]
    UnknownUser(String),

    #[error("user '{0}' already exists")]
    UserExists(String),

    #[error("invalid credentials for user '{0}'")]
    InvalidCredentials(String),

    #[error("password hashing failed: {0}")]
    Hash(String),
}
