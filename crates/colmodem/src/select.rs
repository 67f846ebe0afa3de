//! Three-tier column selection.
//!
//! A caller's [`Columns`] request is lowered once, at construction, into the
//! structure the scanner and assemblers consume:
//!
//! - `unique` — the strictly ascending, duplicate-free set of columns that
//!   actually have to be scanned. The scanner merges this list against its
//!   column counter in order, so scanning costs O(line length) no matter how
//!   many columns were requested.
//! - `reorder` — for each originally requested column, its index into the
//!   `unique` scan result. Re-expands the deduplicated scan back into the
//!   caller's (possibly repeated, possibly reordered) column list. A fixed
//!   lookup table, never recomputed per row.
//! - `max_col` — the highest requested index; scanning stops as soon as the
//!   column counter passes it.

use alloc::vec::Vec;

use crate::{
    error::ConfigError,
    limits::MAX_COLUMNS,
    options::Columns,
};

/// Validated, immutable selection state. See the module docs for the role
/// of each list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selection {
    requested: Vec<usize>,
    unique: Vec<usize>,
    reorder: Vec<usize>,
    max_col: usize,
    bounded: bool,
}

impl Selection {
    /// Lowers a [`Columns`] request.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyColumns`] for an empty explicit list,
    /// [`ConfigError::TooManyColumns`] past the retained-column ceiling.
    pub(crate) fn from_columns(columns: &Columns) -> Result<Self, ConfigError> {
        match columns {
            Columns::All => Ok(Self {
                requested: Vec::new(),
                unique: Vec::new(),
                reorder: Vec::new(),
                max_col: 0,
                bounded: false,
            }),
            Columns::Single(index) => Ok(Self::from_requested(&[*index])),
            Columns::List(indices) => {
                if indices.is_empty() {
                    return Err(ConfigError::EmptyColumns);
                }
                if indices.len() > MAX_COLUMNS {
                    return Err(ConfigError::TooManyColumns(indices.len()));
                }
                Ok(Self::from_requested(indices))
            }
        }
    }

    fn from_requested(requested: &[usize]) -> Self {
        let mut unique: Vec<usize> = requested.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let reorder = requested
            .iter()
            .map(|col| {
                // Every requested column is in `unique`; the fallback is
                // unreachable.
                unique.binary_search(col).unwrap_or_default()
            })
            .collect();

        let max_col = requested.iter().copied().max().unwrap_or(0);

        Self {
            requested: requested.to_vec(),
            unique,
            reorder,
            max_col,
            bounded: true,
        }
    }

    /// The strictly ascending scan set, or `None` in all-columns mode.
    pub(crate) fn unique(&self) -> Option<&[usize]> {
        if self.bounded {
            Some(&self.unique)
        } else {
            None
        }
    }

    /// Scan-stop bound, when the selection is column-index-bounded.
    pub(crate) fn max_col(&self) -> Option<usize> {
        if self.bounded {
            Some(self.max_col)
        } else {
            None
        }
    }

    /// The reorder-with-repeats table; empty in all-columns mode.
    pub(crate) fn reorder(&self) -> &[usize] {
        &self.reorder
    }

    /// Number of logically selected columns, or `None` in all-columns mode.
    pub(crate) fn output_len(&self) -> Option<usize> {
        if self.bounded {
            Some(self.requested.len())
        } else {
            None
        }
    }
}
