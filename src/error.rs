//! Error types for fixed-width encoding.
//!
//! Malformed or missing position declarations are not errors: the field is
//! left out of the line. Everything here aborts the current encode call.

use std::io;

use thiserror::Error;

/// Boxed error raised by a [`MarshalText`](crate::MarshalText) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience alias used throughout the crate.
pub type Result<T, E = EncodeError> = std::result::Result<T, E>;

/// Errors that can occur while encoding values.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A leaf shape has no fixed-width conversion
    #[error("fixedwidth: cannot marshal unknown type {0}")]
    InvalidType(String),

    /// A self-serializing value failed; the inner error is passed through
    #[error(transparent)]
    Delegated(BoxError),

    /// The underlying sink failed on write or flush
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl EncodeError {
    /// Create an invalid type error
    #[inline]
    pub fn invalid_type(type_name: impl Into<String>) -> Self {
        Self::InvalidType(type_name.into())
    }

    /// Wrap an error raised by a self-serializing value
    #[inline]
    pub fn delegated(err: impl Into<BoxError>) -> Self {
        Self::Delegated(err.into())
    }
}

/// Errors from parsing a schema file or a delimited input row.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Field line does not have `NAME KIND POSITION`
    #[error("line {line}: expected `NAME KIND POSITION`, got {found} token(s)")]
    MalformedField { line: usize, found: usize },

    /// Field kind is not one of text, int, float
    #[error("line {line}: unknown field kind '{kind}' (try text, int, or float)")]
    UnknownKind { line: usize, kind: String },

    /// Two fields share a name
    #[error("line {line}: duplicate field name '{name}'")]
    DuplicateField { line: usize, name: String },

    /// Input row has a different number of cells than the schema has fields
    #[error("row has {found} column(s), schema expects {expected}")]
    ColumnCount { expected: usize, found: usize },

    /// A numeric cell could not be parsed
    #[error("field '{field}': invalid {kind} value '{value}'")]
    InvalidNumber {
        field: String,
        kind: &'static str,
        value: String,
    },
}
