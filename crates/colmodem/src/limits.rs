//! Hard ceilings shared by the scanner and the array writers.

/// Exclusive bound on the byte length of a single scanned field.
///
/// Also the width of one row in a string column buffer, length prefix
/// included.
pub const MAX_FIELD_LEN: usize = 128;

/// Maximum number of fields retained from one line.
pub const MAX_COLUMNS: usize = 1000;

/// Width of the zero-padded ASCII decimal length prefix at the start of each
/// string-column row.
pub(crate) const STR_LEN_DIGITS: usize = 3;
