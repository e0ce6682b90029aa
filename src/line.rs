//! Line assembly.
//!
//! A [`LineBuilder`] collects the encoded fields of one record and lays them
//! out into a single space-filled buffer. The buffer is exactly as long as
//! the furthest `end` position among the accepted fields; a record with no
//! usable position declarations becomes an empty line.
//!
//! ```text
//!  "1,5"      "6,15"          "16,25"         "26,30"
//! [1    ][Ian       ][Lopshire  ][99.50]
//! ```
//!
//! Values wider than their field are cut to the field width. Fields are
//! written in the order they were added, so a later field wins where two
//! ranges overlap.

use crate::encode::Encode;
use crate::error::Result;
use crate::layout::{FieldLayout, SPACE};

/// Builder for one fixed-width line.
#[derive(Debug, Clone, Default)]
pub struct LineBuilder {
    fields: Vec<(FieldLayout, Vec<u8>)>,
}

impl LineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `value` into the columns declared by `tag`.
    ///
    /// A missing or malformed declaration leaves the field out entirely and
    /// is not an error. Encoding errors abort the line.
    pub fn field<T: Encode>(&mut self, tag: &str, value: &T) -> Result<&mut Self> {
        self.field_with_fill(tag, value, T::fill())
    }

    /// Like [`field`](Self::field), with an explicit left-pad byte.
    ///
    /// Used where the declared kind of a column is not the Rust type of its
    /// value, as with schema-driven rows of [`Value`](crate::Value)s.
    pub fn field_with_fill<T: Encode + ?Sized>(
        &mut self,
        tag: &str,
        value: &T,
        fill: u8,
    ) -> Result<&mut Self> {
        let Some(layout) = FieldLayout::parse(tag) else {
            tracing::debug!(tag, "skipping field without a valid position declaration");
            return Ok(self);
        };
        let bytes = value.encode()?;
        Ok(self.place(layout, bytes, fill))
    }

    /// Place already-encoded bytes, applying the layout's padding policy.
    pub fn place(&mut self, layout: FieldLayout, bytes: Vec<u8>, fill: u8) -> &mut Self {
        let bytes = layout.pad(bytes, fill);
        self.fields.push((layout, bytes));
        self
    }

    /// Length of the finished line.
    pub fn len(&self) -> usize {
        self.fields
            .iter()
            .map(|(layout, _)| layout.end())
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lay the fields out into a space-filled buffer.
    pub fn finish(self) -> Vec<u8> {
        let mut line = vec![SPACE; self.len()];
        for (layout, bytes) in &self.fields {
            let start = layout.start() - 1;
            let n = bytes.len().min(layout.width());
            line[start..start + n].copy_from_slice(&bytes[..n]);
        }
        tracing::trace!(len = line.len(), fields = self.fields.len(), "assembled line");
        line
    }
}
