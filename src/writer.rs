//! Record writer.
//!
//! An [`Encoder`] turns values into a stream of fixed-width lines. A single
//! value becomes one line; a sequence becomes one line per element, joined
//! by the configured terminator with no terminator after the last line.
//!
//! Each [`Encoder::encode`] call frames its lines into a scratch buffer first
//! and only hands them to the output once every line has encoded, then
//! flushes. A call that fails while encoding writes nothing, and no framing
//! state carries over to the next call.

use std::io::{BufWriter, Write};

use crate::encode::Encode;
use crate::error::{EncodeError, Result};

/// Terminator written between lines unless configured otherwise.
pub const DEFAULT_LINE_END: &[u8] = b"\n";

/// Destination for the lines of one encoded stream.
///
/// Implemented by the writer's per-call framing state; [`Encode::encode_lines`]
/// pushes each finished line into it.
pub trait LineSink {
    /// Append one complete line to the stream.
    fn line(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Writes fixed-width encoded values to an output stream.
pub struct Encoder<W: Write> {
    out: BufWriter<W>,
    line_end: Vec<u8>,
    scratch: Vec<u8>,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder writing to `writer` with the default `"\n"` terminator.
    pub fn new(writer: W) -> Self {
        Self {
            out: BufWriter::new(writer),
            line_end: DEFAULT_LINE_END.to_vec(),
            scratch: Vec::new(),
        }
    }

    /// Builder-style variant of [`set_line_end`](Self::set_line_end).
    pub fn with_line_end(mut self, line_end: impl Into<Vec<u8>>) -> Self {
        self.set_line_end(line_end);
        self
    }

    /// Set the bytes written between lines. An empty terminator restores the default.
    pub fn set_line_end(&mut self, line_end: impl Into<Vec<u8>>) {
        let line_end = line_end.into();
        self.line_end = if line_end.is_empty() {
            DEFAULT_LINE_END.to_vec()
        } else {
            line_end
        };
    }

    /// Bytes currently written between lines.
    pub fn line_end(&self) -> &[u8] {
        &self.line_end
    }

    /// Write the fixed-width encoding of `value` and flush.
    ///
    /// Absent values write nothing. The first failing line aborts the call
    /// before any of its lines reach the output.
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.scratch.clear();
        let mut framing = Framing {
            buf: &mut self.scratch,
            line_end: &self.line_end,
            lines: 0,
        };
        value.encode_lines(&mut framing)?;
        let lines = framing.lines;
        let bytes = self.scratch.len();

        self.out.write_all(&self.scratch)?;
        self.out.flush()?;
        tracing::trace!(lines, bytes, "flushed fixed-width stream");
        Ok(())
    }

    /// Reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        self.out.get_ref()
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.out
            .into_inner()
            .map_err(|e| EncodeError::Io(e.into_error()))
    }
}

/// Per-call line framing: terminators go between lines, never after the last.
struct Framing<'a> {
    buf: &'a mut Vec<u8>,
    line_end: &'a [u8],
    lines: usize,
}

impl LineSink for Framing<'_> {
    fn line(&mut self, bytes: &[u8]) -> Result<()> {
        if self.lines > 0 {
            self.buf.extend_from_slice(self.line_end);
        }
        self.buf.extend_from_slice(bytes);
        self.lines += 1;
        tracing::trace!(line = self.lines, len = bytes.len(), "framed line");
        Ok(())
    }
}
