//! The host line-source boundary.
//!
//! Everything upstream of the tokenizer — file iterators, socket readers,
//! decompressors — sits behind [`LineSource`]. The core pulls one line at a
//! time and buffers nothing across pulls beyond the line being processed;
//! end-of-sequence is the only non-error termination signal it consumes.

/// A pull-based sequence of byte-string lines.
///
/// Returned slices stay valid until the next call; the readers finish
/// scanning and converting a line before pulling another, so implementations
/// are free to reuse an internal buffer. Blocking behavior is entirely the
/// implementation's concern.
pub trait LineSource {
    /// The next line, without any framing the source already consumed, or
    /// `None` once the sequence is exhausted.
    fn next_line(&mut self) -> Option<&[u8]>;
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn next_line(&mut self) -> Option<&[u8]> {
        (**self).next_line()
    }
}

/// A source over an explicit list of lines.
#[derive(Debug, Clone)]
pub struct SliceLines<'a> {
    lines: &'a [&'a [u8]],
    pos: usize,
}

impl<'a> SliceLines<'a> {
    /// Wraps a list of lines, yielded in order.
    #[must_use]
    pub fn new(lines: &'a [&'a [u8]]) -> Self {
        Self { lines, pos: 0 }
    }
}

impl LineSource for SliceLines<'_> {
    fn next_line(&mut self) -> Option<&[u8]> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line)
    }
}

/// A source that splits one in-memory buffer on `\n`.
///
/// The newline is not part of the yielded line; a `\r` before it is left in
/// place, since the scanner treats it as a line terminator anyway. A
/// trailing newline does not produce a final empty line.
#[derive(Debug, Clone)]
pub struct ByteLines<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteLines<'a> {
    /// Wraps a buffer of newline-separated lines.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }
}

impl LineSource for ByteLines<'_> {
    fn next_line(&mut self) -> Option<&[u8]> {
        if self.pos >= self.buf.len() {
            return None;
        }
        let rest = &self.buf[self.pos..];
        match rest.iter().position(|&b| b == b'\n') {
            Some(at) => {
                self.pos += at + 1;
                Some(&rest[..at])
            }
            None => {
                self.pos = self.buf.len();
                Some(rest)
            }
        }
    }
}
