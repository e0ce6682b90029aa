//! Value encoding.
//!
//! Every shape that can appear in a fixed-width line implements [`Encode`].
//! The set of implementations is closed over the shapes the format knows:
//!
//! - **Text**: `str`, `&str`, `String`, `Cow<str>` as raw bytes
//! - **Signed integers**: `i8` through `i128` and `isize` as decimal text
//! - **Floats**: `f32` and `f64` with two fraction digits
//! - **Wrappers**: `Option`, `&T`, `Box`, `Rc`, `Arc` delegate to the wrapped
//!   value; `None` produces no bytes at all
//! - **Dynamic holders**: `&dyn Encode`, `Box<dyn Encode>`, `Rc<dyn Encode>`
//!   and `Arc<dyn Encode>` delegate to whatever they hold and always
//!   left-pad with spaces
//! - **Records**: structs deriving `FixedWidth`, or any hand-written impl
//!   that drives a [`LineBuilder`](crate::LineBuilder)
//! - **Sequences**: `Vec`, slices and arrays, which encode one line per
//!   element at the top level and are rejected anywhere else
//! - **Self-serializing types**: anything implementing [`MarshalText`] and
//!   registered with [`encode_via_marshal_text!`](crate::encode_via_marshal_text)
//!
//! Shapes with no conversion (`bool`, `char`, unsigned integers, `()`) still
//! implement the trait so they can be named in records, but always fail
//! with [`EncodeError::InvalidType`].

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{BoxError, EncodeError, Result};
use crate::layout::SPACE;
use crate::writer::LineSink;

/// Fraction digits written for floating-point values.
pub const FLOAT_PRECISION: usize = 2;

/// Left-pad byte for numeric shapes.
pub const ZERO: u8 = b'0';

/// A value with a fixed-width byte representation.
pub trait Encode {
    /// Convert the value into raw bytes, without padding or truncation.
    fn encode(&self) -> Result<Vec<u8>>;

    /// Byte used to left-pad this shape when its field sets `leftpad`.
    ///
    /// Wrappers report the fill of the shape they wrap, so an absent
    /// `Option<i64>` still pads with zeros.
    fn fill() -> u8
    where
        Self: Sized,
    {
        SPACE
    }

    /// Emit this value as lines of a stream.
    ///
    /// A single value is exactly one line. Sequences override this to emit
    /// one line per element, and absent values emit nothing.
    fn encode_lines(&self, sink: &mut dyn LineSink) -> Result<()> {
        let line = self.encode()?;
        sink.line(&line)
    }
}

/// A type that produces its own text representation.
///
/// Implementations take precedence over the built-in conversions; register
/// the type with [`encode_via_marshal_text!`](crate::encode_via_marshal_text)
/// to make it encodable. Errors are surfaced unchanged as
/// [`EncodeError::Delegated`].
pub trait MarshalText {
    fn marshal_text(&self) -> std::result::Result<Vec<u8>, BoxError>;
}

/// Implement [`Encode`] for types that implement [`MarshalText`].
///
/// ```
/// use fixedwidth::{BoxError, MarshalText, encode_via_marshal_text, marshal};
///
/// struct Code(u16);
///
/// impl MarshalText for Code {
///     fn marshal_text(&self) -> Result<Vec<u8>, BoxError> {
///         Ok(format!("C{:03}", self.0).into_bytes())
///     }
/// }
///
/// encode_via_marshal_text!(Code);
///
/// assert_eq!(marshal(&Code(7)).unwrap(), b"C007");
/// ```
#[macro_export]
macro_rules! encode_via_marshal_text {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::Encode for $t {
                fn encode(&self) -> $crate::Result<::std::vec::Vec<u8>> {
                    $crate::MarshalText::marshal_text(self).map_err($crate::EncodeError::Delegated)
                }
            }
        )+
    };
}

// ---------------------------------------------------------------------------
// Leaf scalars
// ---------------------------------------------------------------------------

impl Encode for str {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

impl Encode for String {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

impl Encode for Cow<'_, str> {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

macro_rules! impl_signed {
    ($($t:ty),*) => {
        $(
            impl Encode for $t {
                fn encode(&self) -> Result<Vec<u8>> {
                    Ok(self.to_string().into_bytes())
                }

                fn fill() -> u8 {
                    ZERO
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64, i128, isize);

macro_rules! impl_float {
    ($($t:ty),*) => {
        $(
            impl Encode for $t {
                fn encode(&self) -> Result<Vec<u8>> {
                    Ok(format!("{:.*}", FLOAT_PRECISION, self).into_bytes())
                }

                fn fill() -> u8 {
                    ZERO
                }
            }
        )*
    };
}

impl_float!(f32, f64);

macro_rules! impl_unsupported {
    ($($t:ty),*) => {
        $(
            impl Encode for $t {
                fn encode(&self) -> Result<Vec<u8>> {
                    Err(EncodeError::invalid_type(stringify!($t)))
                }
            }
        )*
    };
}

impl_unsupported!(bool, char, u8, u16, u32, u64, u128, usize, ());

// ---------------------------------------------------------------------------
// Wrappers
// ---------------------------------------------------------------------------

impl<T: Encode> Encode for Option<T> {
    fn encode(&self) -> Result<Vec<u8>> {
        match self {
            Some(value) => value.encode(),
            None => Ok(Vec::new()),
        }
    }

    fn fill() -> u8 {
        T::fill()
    }

    fn encode_lines(&self, sink: &mut dyn LineSink) -> Result<()> {
        match self {
            Some(value) => value.encode_lines(sink),
            None => Ok(()),
        }
    }
}

macro_rules! impl_pointer {
    ($($p:ident),*) => {
        $(
            impl<T: Encode> Encode for $p<T> {
                fn encode(&self) -> Result<Vec<u8>> {
                    (**self).encode()
                }

                fn fill() -> u8 {
                    T::fill()
                }

                fn encode_lines(&self, sink: &mut dyn LineSink) -> Result<()> {
                    (**self).encode_lines(sink)
                }
            }
        )*
    };
}

impl_pointer!(Box, Rc, Arc);

impl<T: Encode> Encode for &T {
    fn encode(&self) -> Result<Vec<u8>> {
        (**self).encode()
    }

    fn fill() -> u8 {
        T::fill()
    }

    fn encode_lines(&self, sink: &mut dyn LineSink) -> Result<()> {
        (**self).encode_lines(sink)
    }
}

impl Encode for &str {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

impl<T: Encode> Encode for &[T] {
    fn encode(&self) -> Result<Vec<u8>> {
        (**self).encode()
    }

    fn encode_lines(&self, sink: &mut dyn LineSink) -> Result<()> {
        (**self).encode_lines(sink)
    }
}

// The held shape is unknown statically, so these keep the default space fill.
macro_rules! impl_dyn_pointer {
    ($($p:ident),*) => {
        $(
            impl Encode for $p<dyn Encode + '_> {
                fn encode(&self) -> Result<Vec<u8>> {
                    (**self).encode()
                }

                fn encode_lines(&self, sink: &mut dyn LineSink) -> Result<()> {
                    (**self).encode_lines(sink)
                }
            }
        )*
    };
}

impl_dyn_pointer!(Box, Rc, Arc);

impl Encode for &(dyn Encode + '_) {
    fn encode(&self) -> Result<Vec<u8>> {
        (**self).encode()
    }

    fn encode_lines(&self, sink: &mut dyn LineSink) -> Result<()> {
        (**self).encode_lines(sink)
    }
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

impl<T: Encode> Encode for [T] {
    fn encode(&self) -> Result<Vec<u8>> {
        Err(EncodeError::invalid_type(std::any::type_name::<Self>()))
    }

    fn encode_lines(&self, sink: &mut dyn LineSink) -> Result<()> {
        for item in self {
            let line = item.encode()?;
            sink.line(&line)?;
        }
        Ok(())
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self) -> Result<Vec<u8>> {
        Err(EncodeError::invalid_type(std::any::type_name::<Self>()))
    }

    fn encode_lines(&self, sink: &mut dyn LineSink) -> Result<()> {
        self.as_slice().encode_lines(sink)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode(&self) -> Result<Vec<u8>> {
        Err(EncodeError::invalid_type(std::any::type_name::<Self>()))
    }

    fn encode_lines(&self, sink: &mut dyn LineSink) -> Result<()> {
        self.as_slice().encode_lines(sink)
    }
}
