//! Single-pass line tokenizer.
//!
//! One forward pass over the line, maintaining three counters: the current
//! field's content length, the zero-based column counter, and the retained
//! count (which doubles as the cursor into the selection's `unique` list —
//! the ordered-merge step that keeps subset scanning O(line length)).
//!
//! Fields are recorded as [`Span`]s, byte offsets into the line being
//! scanned. Nothing is copied and no span outlives the processing of its
//! line.

use alloc::vec::Vec;

use crate::{
    error::ScanError,
    limits::{MAX_COLUMNS, MAX_FIELD_LEN},
    options::ScanOptions,
    select::Selection,
};

/// A non-owning view of one field's bytes within a line.
///
/// A zero-length span is a valid field and denotes the missing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl Span {
    /// The empty span: a field that was absent or had no content.
    pub(crate) const EMPTY: Span = Span { start: 0, end: 0 };

    pub(crate) fn slice<'line>(&self, line: &'line [u8]) -> &'line [u8] {
        &line[self.start..self.end]
    }
}

fn wants(unique: Option<&[usize]>, retained: usize, col: usize) -> bool {
    match unique {
        None => true,
        Some(unique) => unique.get(retained) == Some(&col),
    }
}

fn flush(out: &mut Vec<Span>, end: usize, len: usize) -> Result<(), ScanError> {
    if out.len() == MAX_COLUMNS {
        return Err(ScanError::TooManyColumns);
    }
    out.push(Span {
        start: end - len,
        end,
    });
    Ok(())
}

/// Tokenizes one line into the field spans the selection wants.
///
/// `out` is cleared and filled in scan order. Returns the retained-field
/// count; 0 means the line held no usable record. A comment byte (when
/// configured), `\n`, or `\r` terminates the line — the current partial
/// field, if wanted, is still flushed. When the selection is
/// column-index-bounded and the column counter passes its bound, scanning
/// stops immediately and the partial trailing field at that point is
/// dropped, not flushed.
pub(crate) fn scan_line(
    line: &[u8],
    opts: &ScanOptions,
    selection: &Selection,
    out: &mut Vec<Span>,
) -> Result<usize, ScanError> {
    out.clear();

    let unique = selection.unique();
    let max_col = selection.max_col();

    let mut col = 0usize;
    let mut len = 0usize;
    let mut should = wants(unique, 0, 0);

    let mut i = 0usize;
    while i < line.len() {
        let b = line[i];

        if b == opts.delimiter {
            if should {
                flush(out, i, len)?;
            }
            col += 1;
            if let Some(max_col) = max_col {
                if col > max_col {
                    return Ok(out.len());
                }
            }
            should = wants(unique, out.len(), col);
            len = 0;
            i += 1;
            continue;
        }

        if opts.comment == Some(b) || b == b'\n' || b == b'\r' {
            break;
        }

        if !should {
            i += 1;
            continue;
        }

        if b == b' ' && len == 0 && opts.skip_leading_space {
            i += 1;
            continue;
        }

        len += 1;
        if len == MAX_FIELD_LEN {
            return Err(ScanError::FieldTooLong { column: col });
        }
        i += 1;
    }

    if should {
        flush(out, i, len)?;
    }
    Ok(out.len())
}
