//! A streaming delimited-text column reader.
//!
//! The crate splits raw byte lines on a single delimiter byte, retains only
//! the columns a caller asked for, converts each retained field to a typed
//! scalar, and materializes the result either one record at a time
//! ([`RowReader`]) or in bulk into caller-owned column buffers
//! ([`ArrayReader`]).
//!
//! There is no quoting dialect and no Unicode awareness: delimiters and
//! comment markers are raw bytes matched literally, and fields are byte
//! slices of the line they came from. Types are supplied by the caller, not
//! inferred.
//!
//! ```rust
//! use colmodem::{
//!     ByteLines, ColumnType, Columns, Field, Record, RowReader, ScanOptions, Schema,
//! };
//!
//! let source = ByteLines::new(b"3,x,9\n,y,8\n");
//! let schema = Schema::new(
//!     [ColumnType::Int, ColumnType::Str],
//!     [b"-1".as_slice(), b"NA".as_slice()],
//! )
//! .unwrap();
//! let mut reader = RowReader::new(
//!     source,
//!     ScanOptions::default(),
//!     Columns::List(vec![0, 1]),
//!     schema,
//! )
//! .unwrap();
//!
//! let first = reader.next().unwrap().unwrap();
//! assert_eq!(
//!     first,
//!     Record::Row(vec![Field::Int(3), Field::Str("x".into())])
//! );
//! let second = reader.next().unwrap().unwrap();
//! assert_eq!(
//!     second,
//!     Record::Row(vec![Field::Int(-1), Field::Str("y".into())])
//! );
//! assert!(reader.next().is_none());
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod array;
mod convert;
mod error;
mod limits;
mod options;
mod row;
mod scan;
mod select;
mod source;

#[cfg(test)]
mod tests;

pub use array::{ArrayReader, ColumnBuf};
pub use convert::{Field, Record};
pub use error::{BatchError, ConfigError, ConvertError, ReadError, ScanError};
pub use limits::{MAX_COLUMNS, MAX_FIELD_LEN};
pub use options::{ColumnType, Columns, ScanOptions, Schema};
pub use row::RowReader;
pub use source::{ByteLines, LineSource, SliceLines};
