//! Dynamically-typed values.
//!
//! [`Value`] is the field type to use when the shape of a column is only
//! known at runtime, such as rows read through a [`Schema`](crate::Schema).
//! It always left-pads with spaces, whatever it holds.
//!
//! `Value` covers scalar columns. A field that may hold a nested record or a
//! self-serializing value can be declared as `Box<dyn Encode>` instead,
//! which pads the same way.

use crate::encode::Encode;
use crate::error::{EncodeError, Result};
use crate::writer::LineSink;

/// A value whose shape is decided at runtime.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value, encodes to nothing
    #[default]
    Nil,
    Text(String),
    Int(i64),
    Float32(f32),
    Float64(f64),
    /// Has no fixed-width form
    Bool(bool),
    /// A sequence: one line per element at the top level, invalid as a field
    List(Vec<Value>),
}

impl Value {
    /// Name of the held shape, as reported in errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Text(_) => "text",
            Value::Int(_) => "int",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl Encode for Value {
    fn encode(&self) -> Result<Vec<u8>> {
        match self {
            Value::Nil => Ok(Vec::new()),
            Value::Text(s) => s.encode(),
            Value::Int(i) => i.encode(),
            Value::Float32(f) => f.encode(),
            Value::Float64(f) => f.encode(),
            Value::Bool(_) | Value::List(_) => Err(EncodeError::invalid_type(self.type_name())),
        }
    }

    fn encode_lines(&self, sink: &mut dyn LineSink) -> Result<()> {
        match self {
            Value::Nil => Ok(()),
            Value::List(items) => items.encode_lines(sink),
            _ => {
                let line = self.encode()?;
                sink.line(&line)
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float32(f)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float64(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
