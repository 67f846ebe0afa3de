//! Batch-columnar materialization into caller-owned buffers.
//!
//! Converted values are written in place, one machine word per row for
//! numeric columns and one fixed-width record per row for string columns
//! (see [`write_str_record`] for the layout). The buffers belong to the
//! caller for the reader's whole lifetime; each [`ArrayReader::fill`] call
//! borrows them exclusively and reports how many rows it produced.

use alloc::vec::Vec;

use crate::{
    convert::{parse_float, parse_int, substitute},
    error::{BatchError, ConfigError, ReadError},
    limits::{MAX_FIELD_LEN, STR_LEN_DIGITS},
    options::{ColumnType, Columns, ScanOptions, Schema},
    scan::{Span, scan_line},
    select::Selection,
    source::LineSource,
};

/// One caller-owned output column.
///
/// Numeric buffers hold one element per row. String buffers hold
/// [`MAX_FIELD_LEN`] bytes per row: a 3-digit zero-padded ASCII length
/// prefix, the raw content, and an unspecified (not zeroed) tail.
#[derive(Debug)]
pub enum ColumnBuf<'b> {
    /// Integer column storage, at least `max_elems` elements.
    Int(&'b mut [i64]),
    /// Float column storage, at least `max_elems` elements.
    Float(&'b mut [f64]),
    /// String column storage, at least `max_elems * MAX_FIELD_LEN` bytes.
    Str(&'b mut [u8]),
}

impl ColumnBuf<'_> {
    fn matches(&self, tag: ColumnType) -> bool {
        matches!(
            (self, tag),
            (ColumnBuf::Int(_), ColumnType::Int)
                | (ColumnBuf::Float(_), ColumnType::Float)
                | (ColumnBuf::Str(_), ColumnType::Str)
        )
    }

    fn rows(&self) -> usize {
        match self {
            ColumnBuf::Int(dst) => dst.len(),
            ColumnBuf::Float(dst) => dst.len(),
            ColumnBuf::Str(dst) => dst.len() / MAX_FIELD_LEN,
        }
    }
}

/// Fills caller-owned typed column buffers with up to `max_elems` converted
/// rows per [`fill`](Self::fill) call.
#[derive(Debug)]
pub struct ArrayReader<'b, S> {
    source: S,
    opts: ScanOptions,
    selection: Selection,
    schema: Schema,
    max_elems: usize,
    bufs: Vec<ColumnBuf<'b>>,
    spans: Vec<Span>,
}

impl<'b, S: LineSource> ArrayReader<'b, S> {
    /// Builds a reader writing into `bufs`, one buffer per schema column.
    ///
    /// `Columns::All` selects the schema's columns in order (column `j` of
    /// each line feeds buffer `j`).
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when the selection is malformed, the schema length
    /// does not match the selected columns, a buffer's variant does not
    /// match its type tag, a buffer cannot hold `max_elems` rows, or
    /// `max_elems` is zero.
    pub fn new(
        source: S,
        opts: ScanOptions,
        columns: Columns,
        schema: Schema,
        max_elems: usize,
        bufs: Vec<ColumnBuf<'b>>,
    ) -> Result<Self, ConfigError> {
        if max_elems == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        // Array mode always has a concrete schema, so "all columns" is the
        // identity selection over it.
        let columns = match columns {
            Columns::All => Columns::List((0..schema.len()).collect()),
            other => other,
        };
        let selection = Selection::from_columns(&columns)?;
        let columns = selection.output_len().unwrap_or(schema.len());
        if schema.len() != columns {
            return Err(ConfigError::TypeCountMismatch {
                types: schema.len(),
                columns,
            });
        }

        if bufs.len() != schema.len() {
            return Err(ConfigError::BufferCountMismatch {
                buffers: bufs.len(),
                types: schema.len(),
            });
        }
        for (column, (buf, &tag)) in bufs.iter().zip(&schema.types).enumerate() {
            if !buf.matches(tag) {
                return Err(ConfigError::BufferTypeMismatch {
                    column,
                    expected: tag,
                });
            }
            if buf.rows() < max_elems {
                return Err(ConfigError::BufferTooSmall {
                    column,
                    got: buf.rows(),
                    need: max_elems,
                });
            }
        }

        Ok(Self {
            source,
            opts,
            selection,
            schema,
            max_elems,
            bufs,
            spans: Vec::new(),
        })
    }

    /// Row capacity of one fill call.
    #[must_use]
    pub fn max_elems(&self) -> usize {
        self.max_elems
    }

    /// Pulls lines and writes converted rows until the buffers hold
    /// `max_elems` rows, the source runs out, or a line holds no usable
    /// record. The returned count is the number of valid rows; a short
    /// count is the expected end-of-stream signal, not an error.
    ///
    /// # Errors
    ///
    /// [`BatchError`] on the first scan or conversion failure. Rows before
    /// `error.row` were written and remain valid; the failing row and
    /// anything after it must not be trusted.
    pub fn fill(&mut self) -> Result<usize, BatchError> {
        for row in 0..self.max_elems {
            let Some(line) = self.source.next_line() else {
                return Ok(row);
            };
            let retained = scan_line(line, &self.opts, &self.selection, &mut self.spans)
                .map_err(|err| BatchError {
                    row,
                    source: err.into(),
                })?;
            if retained == 0 {
                return Ok(row);
            }
            write_row(
                &self.selection,
                &self.schema,
                &self.spans,
                &mut self.bufs,
                line,
                row,
            )
            .map_err(|source| BatchError { row, source })?;
        }
        Ok(self.max_elems)
    }

    /// Consumes the reader, releasing the buffers and returning the source.
    pub fn into_source(self) -> S {
        self.source
    }
}

/// Writes one scanned line into row `row` of every column buffer. A single
/// logical output column bypasses the reorder indirection and writes by
/// position.
fn write_row(
    selection: &Selection,
    schema: &Schema,
    spans: &[Span],
    bufs: &mut [ColumnBuf<'_>],
    line: &[u8],
    row: usize,
) -> Result<(), ReadError> {
    if let [only] = bufs {
        let span = spans.first().copied().unwrap_or(Span::EMPTY);
        return write_cell(only, schema, span, line, row, 0);
    }

    for (j, &slot) in selection.reorder().iter().enumerate() {
        let span = spans.get(slot).copied().unwrap_or(Span::EMPTY);
        write_cell(&mut bufs[j], schema, span, line, row, j)?;
    }
    Ok(())
}

fn write_cell(
    buf: &mut ColumnBuf<'_>,
    schema: &Schema,
    span: Span,
    line: &[u8],
    row: usize,
    column: usize,
) -> Result<(), ReadError> {
    // Unlike row mode, array mode substitutes the missing-value literal for
    // string columns too: a fixed-width record has no way to say "missing".
    let bytes = substitute(span.slice(line), schema.missing_of(column));
    match buf {
        ColumnBuf::Int(dst) => dst[row] = parse_int(bytes, column)?,
        ColumnBuf::Float(dst) => dst[row] = parse_float(bytes, column)?,
        ColumnBuf::Str(dst) => write_str_record(dst, row, bytes, column)?,
    }
    Ok(())
}

/// Lays out one string record: bytes `[0, 3)` hold the content length as
/// three zero-padded ASCII decimal digits, bytes `[3, 3 + len)` the raw
/// content, and the rest of the `MAX_FIELD_LEN`-byte row is left untouched.
fn write_str_record(
    dst: &mut [u8],
    row: usize,
    bytes: &[u8],
    column: usize,
) -> Result<(), ReadError> {
    let len = bytes.len();
    if STR_LEN_DIGITS + len > MAX_FIELD_LEN {
        return Err(ReadError::FieldTooWide { column, len });
    }

    let record = &mut dst[row * MAX_FIELD_LEN..(row + 1) * MAX_FIELD_LEN];
    record[0] = b'0' + (len / 100) as u8;
    record[1] = b'0' + (len / 10 % 10) as u8;
    record[2] = b'0' + (len % 10) as u8;
    record[STR_LEN_DIGITS..STR_LEN_DIGITS + len].copy_from_slice(bytes);
    Ok(())
}
