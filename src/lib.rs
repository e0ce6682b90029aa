//! # fixedwidth
//!
//! Fixed-column-width record encoding for legacy flat-file interchange.
//!
//! Every field of a record occupies a declared, unchanging byte range within
//! its line, in the tradition of mainframe card-image and tape files. This
//! crate implements the encode direction: values go in, fixed-width lines
//! come out.
//!
//! ## Overview
//!
//! - **Position declarations**: `"<start>,<end>[,leftpad]"`, 1-based and
//!   inclusive, attached to each field
//! - **Field values**: text, signed integers and floats, optionally wrapped in
//!   `Option`/`Box`/`Rc`/`Arc`, nested records, or self-serializing types
//! - **Padding**: values are left-aligned in their columns and blank-filled;
//!   `leftpad` right-aligns them with `0` for numbers and space for text
//! - **Truncation**: values wider than their columns are cut silently
//! - **Streams**: a sequence encodes one record per line, joined by `"\n"`
//!   (configurable) with no trailing terminator
//!
//! ## Example
//!
//! ```
//! use fixedwidth::{FixedWidth, marshal};
//!
//! #[derive(FixedWidth)]
//! struct Student {
//!     #[fixed = "1,5"]
//!     id: i64,
//!     #[fixed = "6,15"]
//!     first_name: String,
//!     #[fixed = "16,25"]
//!     last_name: String,
//!     #[fixed = "26,30"]
//!     grade: f64,
//! }
//!
//! let students = vec![
//!     Student { id: 1, first_name: "Ian".into(), last_name: "Lopshire".into(), grade: 99.5 },
//!     Student { id: 2, first_name: "Ada".into(), last_name: "Lovelace".into(), grade: 100.0 },
//! ];
//!
//! let data = marshal(&students).unwrap();
//! assert_eq!(
//!     data,
//!     b"1    Ian       Lopshire  99.50\n2    Ada       Lovelace  100.0"
//! );
//! ```
//!
//! Layouts known only at runtime can be described with a [`Schema`] instead
//! of a Rust type.

pub mod encode;
pub mod error;
pub mod layout;
pub mod line;
pub mod schema;
pub mod value;
pub mod writer;

pub use encode::{Encode, FLOAT_PRECISION, MarshalText};
pub use error::{BoxError, EncodeError, Result, SchemaError};
pub use layout::FieldLayout;
pub use line::LineBuilder;
pub use schema::{FieldDef, FieldKind, Schema, SchemaRow};
pub use value::Value;
pub use writer::{DEFAULT_LINE_END, Encoder, LineSink};

#[cfg(feature = "derive")]
pub use fixedwidth_derive::FixedWidth;

/// Return the fixed-width encoding of `value`.
///
/// A sequence encodes one line per element; any other value encodes exactly
/// one line. Absent values encode to nothing. Lines are joined by
/// [`DEFAULT_LINE_END`]; use an [`Encoder`] for another terminator or to
/// write straight to a file.
pub fn marshal<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    Encoder::new(&mut buf).encode(value)?;
    Ok(buf)
}
