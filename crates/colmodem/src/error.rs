use bstr::BString;
use thiserror::Error;

use crate::{
    limits::{MAX_COLUMNS, MAX_FIELD_LEN},
    options::ColumnType,
};

/// Construction-time failure. A reader that fails construction is unusable;
/// none of these are raised after construction succeeds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An explicit column list was empty.
    #[error("column selection must name at least one column")]
    EmptyColumns,

    /// More distinct columns were requested than the scanner can retain.
    #[error("{0} columns requested, at most {MAX_COLUMNS} supported")]
    TooManyColumns(usize),

    /// A missing-value literal was too long to substitute into a field.
    #[error("missing-value literal of {len} bytes, must be shorter than {max}")]
    MissingLiteralTooLong {
        /// Zero-based type-tag index of the offending literal.
        column: usize,
        /// Byte length of the literal.
        len: usize,
        /// Exclusive bound: `MAX_FIELD_LEN - 1`.
        max: usize,
    },

    /// The number of type tags does not match the number of selected columns.
    #[error("{types} type tags for {columns} selected columns")]
    TypeCountMismatch {
        /// Number of type tags supplied.
        types: usize,
        /// Number of logically selected columns.
        columns: usize,
    },

    /// The number of missing-value literals does not match the type tags.
    #[error("{literals} missing-value literals for {types} type tags")]
    LiteralCountMismatch {
        /// Number of literals supplied.
        literals: usize,
        /// Number of type tags supplied.
        types: usize,
    },

    /// An output buffer's variant does not match its column's type tag.
    #[error("buffer for column {column} is not a {expected} buffer")]
    BufferTypeMismatch {
        /// Zero-based output-column index.
        column: usize,
        /// The type tag the schema declares for this column.
        expected: ColumnType,
    },

    /// An output buffer cannot hold `max_elems` rows.
    #[error("buffer for column {column} holds {got} rows, {need} required")]
    BufferTooSmall {
        /// Zero-based output-column index.
        column: usize,
        /// Rows the buffer can hold.
        got: usize,
        /// Rows requested via `max_elems`.
        need: usize,
    },

    /// The number of output buffers does not match the type tags.
    #[error("{buffers} output buffers for {types} type tags")]
    BufferCountMismatch {
        /// Number of buffers supplied.
        buffers: usize,
        /// Number of type tags supplied.
        types: usize,
    },

    /// `max_elems` was zero.
    #[error("array capacity must be at least one row")]
    ZeroCapacity,
}

/// Failure while tokenizing one line. Fatal to that line only; no partial
/// record is produced for it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// A field's content length reached [`MAX_FIELD_LEN`].
    #[error("field in column {column} reached the {MAX_FIELD_LEN}-byte limit")]
    FieldTooLong {
        /// Zero-based index of the column being scanned.
        column: usize,
    },

    /// More than [`MAX_COLUMNS`] fields were retained from one line.
    #[error("more than {MAX_COLUMNS} fields retained from one line")]
    TooManyColumns,
}

/// A field (or its missing-value substitute) could not be parsed as its
/// column's declared type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse {text:?} as {target} (column {column})")]
pub struct ConvertError {
    /// Zero-based output-column index.
    pub column: usize,
    /// The type tag the conversion targeted.
    pub target: ColumnType,
    /// The bytes that failed to parse.
    pub text: BString,
}

/// Failure while producing one record. Fatal to the current row; in array
/// mode, rows written earlier in the same call remain valid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReadError {
    /// The line could not be tokenized.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A retained field could not be converted.
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// A string field (or substituted literal) cannot fit a fixed-width
    /// string record next to its length prefix.
    #[error("string field of {len} bytes cannot fit a {MAX_FIELD_LEN}-byte record (column {column})")]
    FieldTooWide {
        /// Zero-based output-column index.
        column: usize,
        /// Byte length of the content.
        len: usize,
    },
}

/// An aborted array-mode fill.
///
/// Rows `[0, row)` of every output buffer were written before the failure
/// and remain valid; the contents of row `row` and beyond are unspecified.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("batch aborted at row {row}: {source}")]
pub struct BatchError {
    /// Row offset of the failure; also the count of rows already valid.
    pub row: usize,
    /// What went wrong on that row.
    #[source]
    pub source: ReadError,
}
