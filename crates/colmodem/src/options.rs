use alloc::vec::Vec;
use core::fmt;

use bstr::BString;

use crate::{
    error::ConfigError,
    limits::{MAX_COLUMNS, MAX_FIELD_LEN},
};

/// How lines are split into fields.
///
/// Delimiters and comment markers are single raw bytes, matched literally;
/// there is no quoting dialect.
///
/// # Default
///
/// Comma-delimited, no comment byte, leading spaces kept.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    /// Byte that separates fields.
    pub delimiter: u8,

    /// Optional byte that terminates the line where it appears. Fields
    /// already scanned before it are still emitted.
    pub comment: Option<u8>,

    /// Whether ASCII spaces at the start of a field are skipped. Affects
    /// field content only, never delimiter detection.
    pub skip_leading_space: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            comment: None,
            skip_leading_space: false,
        }
    }
}

/// Declared type of one output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Base-10 signed integer.
    Int,
    /// IEEE 754 double, with platform NaN/Infinity spellings accepted.
    Float,
    /// Raw bytes, passed through unconverted.
    Str,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Str => "str",
        })
    }
}

/// Which columns of each line to materialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Columns {
    /// Every scanned field, in scan order.
    All,

    /// Exactly one column, yielding bare scalars rather than one-element
    /// rows.
    Single(usize),

    /// An explicit column list in the caller's order. Entries may repeat
    /// and need not be ascending; the reader scans each distinct column
    /// once and re-expands.
    List(Vec<usize>),
}

/// Per-column type tags paired with missing-value literals.
///
/// A zero-length field is "missing" and the corresponding literal is
/// converted in its place, so each literal must itself be well formed for
/// its column's type — a literal that cannot convert fails every read that
/// needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub(crate) types: Vec<ColumnType>,
    pub(crate) missing: Vec<BString>,
}

impl Schema {
    /// Builds a schema from matching sequences of type tags and
    /// missing-value literals.
    ///
    /// # Errors
    ///
    /// [`ConfigError::LiteralCountMismatch`] if the sequences differ in
    /// length, [`ConfigError::TooManyColumns`] past the column ceiling, or
    /// [`ConfigError::MissingLiteralTooLong`] for a literal of
    /// `MAX_FIELD_LEN - 1` bytes or more.
    pub fn new<T, M>(types: T, missing: M) -> Result<Self, ConfigError>
    where
        T: IntoIterator<Item = ColumnType>,
        M: IntoIterator,
        M::Item: Into<BString>,
    {
        let types: Vec<ColumnType> = types.into_iter().collect();
        let missing: Vec<BString> = missing.into_iter().map(Into::into).collect();

        if missing.len() != types.len() {
            return Err(ConfigError::LiteralCountMismatch {
                literals: missing.len(),
                types: types.len(),
            });
        }
        if types.len() > MAX_COLUMNS {
            return Err(ConfigError::TooManyColumns(types.len()));
        }
        for (column, literal) in missing.iter().enumerate() {
            if literal.len() >= MAX_FIELD_LEN - 1 {
                return Err(ConfigError::MissingLiteralTooLong {
                    column,
                    len: literal.len(),
                    max: MAX_FIELD_LEN - 1,
                });
            }
        }

        Ok(Self { types, missing })
    }

    /// An empty schema: every field is a raw string and empty fields stay
    /// missing. The shape used for header lines.
    #[must_use]
    pub fn strings() -> Self {
        Self {
            types: Vec::new(),
            missing: Vec::new(),
        }
    }

    /// Number of type tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the schema carries no tags at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Type of output column `j`; columns past the tag list are raw strings.
    pub(crate) fn type_of(&self, j: usize) -> ColumnType {
        self.types.get(j).copied().unwrap_or(ColumnType::Str)
    }

    /// Missing-value literal for output column `j`, if one was configured.
    pub(crate) fn missing_of(&self, j: usize) -> Option<&[u8]> {
        self.missing.get(j).map(|m| m.as_slice())
    }
}
