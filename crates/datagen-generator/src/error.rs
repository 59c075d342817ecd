//! Error types for generator construction.

/// A type node (at any depth) for which no generator exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported type {type_name} at '{path}': no generator exists for this kind")]
pub struct UnsupportedTypeError {
    /// Dotted path from the column to the offending node, e.g. `f18.c.d`
    pub path: String,
    /// Rendered type of the offending node
    pub type_name: String,
}

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Type kind without a generator
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedTypeError),

    /// Option that does not fit the column it names
    #[error("Invalid option '{key}': {message}")]
    InvalidOption { key: String, message: String },
}

impl GeneratorError {
    pub(crate) fn invalid_option(column: &str, option: &str, message: impl Into<String>) -> Self {
        GeneratorError::InvalidOption {
            key: format!("fields.{column}.{option}"),
            message: message.into(),
        }
    }
}
