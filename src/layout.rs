//! Position declarations.
//!
//! Each field of a record carries a declaration of the form
//! `"<start>,<end>[,leftpad]"`. Positions are 1-based and inclusive, so
//! `"1,5"` covers the first five columns of the line.
//!
//! A declaration that cannot be parsed is not an error: the field is simply
//! left out of the line, the same as a field with no declaration at all.

/// Modifier enabling left padding of short values.
pub const LEFTPAD: &str = "leftpad";

/// Byte used for every column not covered by a field.
pub const SPACE: u8 = b' ';

/// Parsed position declaration for one field.
///
/// Invariant: `1 <= start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    start: usize,
    end: usize,
    leftpad: bool,
}

impl FieldLayout {
    /// Build a layout directly, rejecting a range that violates `1 <= start <= end`.
    pub fn new(start: usize, end: usize, leftpad: bool) -> Option<Self> {
        if start == 0 || end < start {
            return None;
        }
        Some(Self {
            start,
            end,
            leftpad,
        })
    }

    /// Parse a position declaration.
    ///
    /// Returns `None` for anything other than two positive bounds with
    /// `start <= end`, optionally followed by `leftpad`.
    pub fn parse(tag: &str) -> Option<Self> {
        let parts: Vec<&str> = tag.split(',').map(str::trim).collect();
        let leftpad = match parts.len() {
            2 => false,
            3 if parts[2] == LEFTPAD => true,
            _ => return None,
        };

        let start: usize = parts[0].parse().ok()?;
        let end: usize = parts[1].parse().ok()?;
        Self::new(start, end, leftpad)
    }

    /// First column (1-based).
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last column (1-based, inclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn leftpad(&self) -> bool {
        self.leftpad
    }

    /// Number of columns the field occupies.
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }

    /// Apply the padding policy to an encoded value.
    ///
    /// Short values are left-padded with `fill` only when `leftpad` is set.
    /// Values that are already wide enough are returned untouched; truncation
    /// happens when the line is assembled.
    pub fn pad(&self, value: Vec<u8>, fill: u8) -> Vec<u8> {
        let width = self.width();
        if !self.leftpad || value.len() >= width {
            return value;
        }
        let mut padded = vec![fill; width - value.len()];
        padded.extend_from_slice(&value);
        padded
    }
}
