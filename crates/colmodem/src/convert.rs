//! Field-to-scalar conversion.
//!
//! One field span plus its column's type tag and missing-value literal in,
//! one typed scalar out. Numeric parsing is locale-independent and must
//! consume the whole token. Float parsing additionally recognizes the
//! NaN/Infinity spellings produced by different platforms' formatters.

use alloc::vec::Vec;
use core::str;

use bstr::BString;

use crate::{error::ConvertError, options::ColumnType};

/// One converted field of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A base-10 integer column value.
    Int(i64),
    /// A floating-point column value.
    Float(f64),
    /// A string column's raw bytes.
    Str(BString),
    /// A string column whose field was empty. Row mode surfaces missing
    /// strings explicitly instead of substituting the literal.
    Missing,
}

/// One converted line.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// The bare-scalar shape of a single-column selection.
    Scalar(Field),
    /// One field per logically selected column, in the caller's order.
    Row(Vec<Field>),
}

/// Platform spellings checked, in order, when the float grammar rejects a
/// token. Case-sensitive prefix matches.
const NAN_PREFIXES: [&[u8]; 2] = [b"1.#IND", b"nan"];
const INF_PREFIXES: [&[u8]; 2] = [b"1.#INF", b"inf"];
const NEG_INF_PREFIXES: [&[u8]; 2] = [b"-1.#INF", b"-inf"];

fn has_prefix(bytes: &[u8], prefixes: &[&[u8]]) -> bool {
    prefixes.iter().any(|p| bytes.starts_with(p))
}

fn convert_error(column: usize, target: ColumnType, bytes: &[u8]) -> ConvertError {
    ConvertError {
        column,
        target,
        text: BString::from(bytes),
    }
}

/// Parses a full base-10 integer token. Trailing unconverted bytes fail.
pub(crate) fn parse_int(bytes: &[u8], column: usize) -> Result<i64, ConvertError> {
    str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| convert_error(column, ColumnType::Int, bytes))
}

/// Parses a full floating-point token, falling back to the platform
/// NaN/Infinity spellings before reporting failure.
pub(crate) fn parse_float(bytes: &[u8], column: usize) -> Result<f64, ConvertError> {
    if let Some(value) = str::from_utf8(bytes).ok().and_then(|s| s.parse::<f64>().ok()) {
        return Ok(value);
    }
    if has_prefix(bytes, &NAN_PREFIXES) {
        return Ok(f64::NAN);
    }
    if has_prefix(bytes, &INF_PREFIXES) {
        return Ok(f64::INFINITY);
    }
    if has_prefix(bytes, &NEG_INF_PREFIXES) {
        return Ok(f64::NEG_INFINITY);
    }
    Err(convert_error(column, ColumnType::Float, bytes))
}

/// Converts one field for row-mode output.
///
/// An empty field is missing: numeric columns convert the configured
/// literal in its place, string columns yield [`Field::Missing`]. `literal`
/// is `None` for columns past the schema's tag list, which are raw strings.
pub(crate) fn convert_field(
    bytes: &[u8],
    target: ColumnType,
    literal: Option<&[u8]>,
    column: usize,
) -> Result<Field, ConvertError> {
    match target {
        ColumnType::Int => {
            let token = substitute(bytes, literal);
            parse_int(token, column).map(Field::Int)
        }
        ColumnType::Float => {
            let token = substitute(bytes, literal);
            parse_float(token, column).map(Field::Float)
        }
        ColumnType::Str => {
            if bytes.is_empty() {
                Ok(Field::Missing)
            } else {
                Ok(Field::Str(BString::from(bytes)))
            }
        }
    }
}

/// The token to convert: the field itself, or its column's missing-value
/// literal when the field is empty.
pub(crate) fn substitute<'a>(bytes: &'a [u8], literal: Option<&'a [u8]>) -> &'a [u8] {
    if bytes.is_empty() {
        literal.unwrap_or(bytes)
    } else {
        bytes
    }
}
