//! Row-oriented materialization: one typed record per input line.

use alloc::vec::Vec;

use crate::{
    convert::{Field, Record, convert_field},
    error::{ConfigError, ReadError},
    options::{Columns, ScanOptions, Schema},
    scan::{Span, scan_line},
    select::Selection,
    source::LineSource,
};

/// Lazily converts lines pulled from a [`LineSource`] into [`Record`]s.
///
/// The reader is a small state machine: it stays active while lines keep
/// producing records, and terminates — permanently — either on source
/// exhaustion, on the first line that holds no usable record, or on the
/// first scan/convert error (which is yielded before iteration stops).
///
/// A selection of exactly one logical column yields [`Record::Scalar`]
/// rather than a one-element row.
#[derive(Debug)]
pub struct RowReader<S> {
    source: S,
    opts: ScanOptions,
    selection: Selection,
    schema: Schema,
    spans: Vec<Span>,
    done: bool,
}

impl<S: LineSource> RowReader<S> {
    /// Builds a reader over `source` with the given split options, column
    /// selection, and schema.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] for a malformed selection or a schema whose type-tag
    /// count does not match the number of selected columns.
    /// `Columns::All` with a non-empty schema selects the schema's columns
    /// in order; with an empty schema ([`Schema::strings`]) every scanned
    /// field is yielded as a raw string, which is how header lines are
    /// read.
    pub fn new(
        source: S,
        opts: ScanOptions,
        columns: Columns,
        schema: Schema,
    ) -> Result<Self, ConfigError> {
        let columns = match columns {
            Columns::All if !schema.is_empty() => Columns::List((0..schema.len()).collect()),
            other => other,
        };
        let selection = Selection::from_columns(&columns)?;
        if let Some(columns) = selection.output_len() {
            if schema.len() != columns {
                return Err(ConfigError::TypeCountMismatch {
                    types: schema.len(),
                    columns,
                });
            }
        }
        Ok(Self {
            source,
            opts,
            selection,
            schema,
            spans: Vec::new(),
            done: false,
        })
    }

    /// Advances the reader by one line.
    ///
    /// `None` once terminated; `Some(Err(_))` exactly once, on the line
    /// that failed.
    pub fn next_record(&mut self) -> Option<Result<Record, ReadError>> {
        if self.done {
            return None;
        }
        let Some(line) = self.source.next_line() else {
            self.done = true;
            return None;
        };
        match scan_line(line, &self.opts, &self.selection, &mut self.spans) {
            Err(err) => {
                self.done = true;
                Some(Err(err.into()))
            }
            // No usable record terminates the stream.
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => match assemble(&self.selection, &self.schema, &self.spans, line) {
                Ok(record) => Some(Ok(record)),
                Err(err) => {
                    self.done = true;
                    Some(Err(err))
                }
            },
        }
    }

    /// Converts one caller-supplied line through this reader's
    /// configuration, without touching the line source or the reader's
    /// state machine.
    ///
    /// Returns `None` when the line holds no usable record.
    ///
    /// # Errors
    ///
    /// As [`next_record`](Self::next_record): scanning or conversion
    /// failures for this line.
    pub fn parse_line(&mut self, line: &[u8]) -> Option<Result<Record, ReadError>> {
        match scan_line(line, &self.opts, &self.selection, &mut self.spans) {
            Err(err) => Some(Err(err.into())),
            Ok(0) => None,
            Ok(_) => Some(assemble(&self.selection, &self.schema, &self.spans, line)),
        }
    }

    /// Consumes the reader, returning the underlying source.
    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: LineSource> Iterator for RowReader<S> {
    type Item = Result<Record, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

/// Converts the retained spans of one line into a record, re-expanding
/// through the selection's reorder table when one is configured. Wanted
/// columns the line didn't have are empty spans, i.e. missing.
fn assemble(
    selection: &Selection,
    schema: &Schema,
    spans: &[Span],
    line: &[u8],
) -> Result<Record, ReadError> {
    let reorder = selection.reorder();

    if reorder.is_empty() {
        // All-columns mode: every retained field, in scan order.
        if let [only] = spans {
            let field = field_at(schema, *only, line, 0)?;
            return Ok(Record::Scalar(field));
        }
        let fields = spans
            .iter()
            .enumerate()
            .map(|(j, span)| field_at(schema, *span, line, j))
            .collect::<Result<Vec<Field>, ReadError>>()?;
        return Ok(Record::Row(fields));
    }

    if let [only] = reorder {
        let span = spans.get(*only).copied().unwrap_or(Span::EMPTY);
        return Ok(Record::Scalar(field_at(schema, span, line, 0)?));
    }

    let fields = reorder
        .iter()
        .enumerate()
        .map(|(j, &slot)| {
            let span = spans.get(slot).copied().unwrap_or(Span::EMPTY);
            field_at(schema, span, line, j)
        })
        .collect::<Result<Vec<Field>, ReadError>>()?;
    Ok(Record::Row(fields))
}

fn field_at(schema: &Schema, span: Span, line: &[u8], j: usize) -> Result<Field, ReadError> {
    convert_field(span.slice(line), schema.type_of(j), schema.missing_of(j), j)
        .map_err(ReadError::from)
}
