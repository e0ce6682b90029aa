//! Runtime record schemas.
//!
//! A [`Schema`] describes a record layout as data instead of as a Rust type,
//! for layouts that are only known at runtime. It is built once, either in
//! code or from a schema file, and reused for every row.
//!
//! Schema file format:
//! ```text
//! # name      kind   position
//! ID          int    1,5
//! FIRST_NAME  text   6,15
//! LAST_NAME   text   16,25
//! GRADE       float  26,30,leftpad
//! ```
//!
//! - One field per line: `NAME KIND POSITION`, separated by whitespace
//! - `KIND` is `text`, `int`, or `float` (case-insensitive) and decides the
//!   left-pad byte and how input cells are parsed
//! - `POSITION` uses the same `"<start>,<end>[,leftpad]"` declarations as
//!   `#[fixed = "..."]`; a malformed one leaves the field out of every line
//! - Blank lines and lines starting with `#` are ignored

use std::collections::HashSet;

use crate::encode::{Encode, ZERO};
use crate::error::{Result, SchemaError};
use crate::layout::{FieldLayout, SPACE};
use crate::line::LineBuilder;
use crate::value::Value;

/// Declared kind of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Int,
    Float,
}

impl FieldKind {
    /// Parse a kind name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" => Some(FieldKind::Text),
            "int" => Some(FieldKind::Int),
            "float" => Some(FieldKind::Float),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Int => "int",
            FieldKind::Float => "float",
        }
    }

    /// Left-pad byte for this kind.
    pub fn fill(&self) -> u8 {
        match self {
            FieldKind::Text => SPACE,
            FieldKind::Int | FieldKind::Float => ZERO,
        }
    }

    /// Convert one input cell into a value of this kind.
    ///
    /// Empty cells are absent values.
    fn parse_cell(&self, field: &str, cell: &str) -> Result<Value, SchemaError> {
        if cell.trim().is_empty() {
            return Ok(Value::Nil);
        }
        let invalid = || SchemaError::InvalidNumber {
            field: field.to_string(),
            kind: self.name(),
            value: cell.to_string(),
        };
        match self {
            FieldKind::Text => Ok(Value::Text(cell.to_string())),
            FieldKind::Int => cell.trim().parse().map(Value::Int).map_err(|_| invalid()),
            FieldKind::Float => cell.trim().parse().map(Value::Float64).map_err(|_| invalid()),
        }
    }
}

/// One field of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    /// Raw position declaration, e.g. `"26,30,leftpad"`.
    pub position: String,
}

impl FieldDef {
    /// Parsed layout, or `None` if the declaration is malformed.
    pub fn layout(&self) -> Option<FieldLayout> {
        FieldLayout::parse(&self.position)
    }
}

/// Ordered field layout of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field (builder style).
    pub fn field(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        position: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            kind,
            position: position.into(),
        });
        self
    }

    /// Parse a schema file.
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let mut schema = Schema::new();
        let mut names = HashSet::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();
            let line_no = line_num + 1;

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            let &[name, kind, position] = tokens.as_slice() else {
                return Err(SchemaError::MalformedField {
                    line: line_no,
                    found: tokens.len(),
                });
            };

            let kind = FieldKind::from_name(kind).ok_or_else(|| SchemaError::UnknownKind {
                line: line_no,
                kind: kind.to_string(),
            })?;

            if !names.insert(name.to_string()) {
                return Err(SchemaError::DuplicateField {
                    line: line_no,
                    name: name.to_string(),
                });
            }

            if FieldLayout::parse(position).is_none() {
                tracing::debug!(
                    line = line_no,
                    field = name,
                    position,
                    "malformed position, field will be left out"
                );
            }

            schema = schema.field(name, kind, position);
        }

        Ok(schema)
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Length of every encoded line: the furthest end among valid fields.
    pub fn line_len(&self) -> usize {
        self.fields
            .iter()
            .filter_map(FieldDef::layout)
            .map(|layout| layout.end())
            .max()
            .unwrap_or(0)
    }

    /// Pair this schema with the values of one record.
    ///
    /// Values line up with fields by index; missing trailing values are
    /// treated as absent.
    pub fn row<'a>(&'a self, values: &'a [Value]) -> SchemaRow<'a> {
        SchemaRow {
            schema: self,
            values,
        }
    }

    /// Split a delimited input line into values, one per field.
    pub fn parse_row(&self, line: &str, delimiter: char) -> Result<Vec<Value>, SchemaError> {
        let cells: Vec<&str> = line.split(delimiter).collect();
        if cells.len() != self.fields.len() {
            return Err(SchemaError::ColumnCount {
                expected: self.fields.len(),
                found: cells.len(),
            });
        }

        self.fields
            .iter()
            .zip(cells)
            .map(|(def, cell)| def.kind.parse_cell(&def.name, cell))
            .collect()
    }
}

/// One record described by a [`Schema`].
#[derive(Debug, Clone, Copy)]
pub struct SchemaRow<'a> {
    schema: &'a Schema,
    values: &'a [Value],
}

impl Encode for SchemaRow<'_> {
    fn encode(&self) -> Result<Vec<u8>> {
        let nil = Value::Nil;
        let mut line = LineBuilder::new();
        for (i, def) in self.schema.fields.iter().enumerate() {
            let value = self.values.get(i).unwrap_or(&nil);
            line.field_with_fill(&def.position, value, def.kind.fill())?;
        }
        Ok(line.finish())
    }
}
