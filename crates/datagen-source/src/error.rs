//! Error types for the datagen source.

use datagen_core::SchemaError;
use datagen_generator::{GeneratorError, UnsupportedTypeError};

/// A limit pushed after execution started. The prior ceiling stays in force.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Limit {requested} pushed after execution started ({rows_emitted} rows emitted); \
     ceiling {current_limit:?} stands"
)]
pub struct LateLimitPushError {
    /// The refused ceiling
    pub requested: u64,
    /// Ceiling still in force
    pub current_limit: Option<u64>,
    /// Rows produced when the push arrived
    pub rows_emitted: u64,
}

/// Error type for source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Malformed or unsupported schema
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Column type without a generator
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedTypeError),

    /// Unparseable or contradictory table option
    #[error("Invalid option '{key}': {message}")]
    InvalidOption { key: String, message: String },

    /// Producer used before `open()`
    #[error("Source '{0}' is not open")]
    NotOpen(String),

    /// `produce_row` without a row admitted by `try_advance`
    #[error("Source '{0}' has no admitted row to produce")]
    NotAdmitted(String),
}

impl SourceError {
    pub(crate) fn invalid_option(key: &str, message: impl Into<String>) -> Self {
        SourceError::InvalidOption {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

impl From<GeneratorError> for SourceError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::UnsupportedType(e) => SourceError::UnsupportedType(e),
            GeneratorError::InvalidOption { key, message } => {
                SourceError::InvalidOption { key, message }
            }
        }
    }
}
