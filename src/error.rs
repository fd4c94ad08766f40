//! Unified error type for schema decoding and parameter encoding.
//!
//! Every fallible operation in the crate returns the single
//! [`SerializationError`] sum type. A given (schema, value) pair either
//! encodes deterministically or fails deterministically with the first
//! error encountered; no partial output is ever produced.

use thiserror::Error;

/// Errors that can occur while decoding a module schema or encoding a
/// parameter value against it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// A contract or entry-point name was not present in the module schema.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// The schema bytes violate the grammar or are truncated.
    #[error("malformed schema at offset {offset}: {reason}")]
    MalformedSchema { offset: usize, reason: String },

    /// The runtime value is incompatible with the expected schema type.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: String,
    },

    /// An integer is outside the range its schema type can represent.
    #[error("value out of range for {expected}: {value}")]
    RangeError {
        expected: &'static str,
        value: String,
    },

    /// A field, variant, or element count does not match the schema.
    #[error("structural mismatch: {0}")]
    StructuralMismatch(String),

    /// The schema declares a shape this codec cannot address, such as an
    /// enum with more variants than a two-byte discriminant can index.
    #[error("unsupported schema: {0}")]
    UnsupportedSchema(String),
}

/// A [`Result`] type alias using the crate's [`SerializationError`].
pub type Result<T> = std::result::Result<T, SerializationError>;

impl SerializationError {
    /// Create a [`SerializationError::TypeMismatch`] from the expected type
    /// name and the value actually supplied.
    pub(crate) fn mismatch(expected: &'static str, got: impl std::fmt::Debug) -> Self {
        Self::TypeMismatch {
            expected,
            got: format!("{got:?}"),
        }
    }

    /// Create a [`SerializationError::RangeError`] from the expected range
    /// description and the offending value.
    pub(crate) fn out_of_range(expected: &'static str, value: impl std::fmt::Display) -> Self {
        Self::RangeError {
            expected,
            value: value.to_string(),
        }
    }

    /// Returns `true` if this error came from a name lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SchemaNotFound(_))
    }

    /// Returns `true` if this error came from malformed schema bytes.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedSchema { .. })
    }
}
