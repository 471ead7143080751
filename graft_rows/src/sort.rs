// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sort engine: column state and stable row ordering.

use core::cmp::Ordering;

use crate::compare::{compare_lexicographic, compare_numeric};
use crate::row::RowRecord;

/// How a column's values compare.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SortType {
    /// Leading-integer comparison with a textual tie-break.
    Numeric,
    /// Case-insensitive text comparison.
    #[default]
    Lexicographic,
}

impl SortType {
    /// Reads a markup type hint: `"number"` is numeric, anything else (or
    /// nothing) is lexicographic.
    #[must_use]
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint {
            Some("number") => Self::Numeric,
            _ => Self::Lexicographic,
        }
    }
}

/// Sort direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Smallest first.
    Ascending,
    /// Largest first; the exact reverse of ascending.
    Descending,
}

impl Direction {
    /// The marker class a sorted header carries for this direction.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Ascending => "sorted-asc",
            Self::Descending => "sorted-desc",
        }
    }
}

/// A column's sort state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ColumnState {
    /// Not the sorted column.
    #[default]
    Unset,
    /// The sorted column, in the given direction.
    Sorted(Direction),
}

/// The direction a column takes when activated from `current`.
///
/// Only a column already sorted descending flips to ascending; everything
/// else starts descending.
#[must_use]
pub fn next_direction(current: ColumnState) -> Direction {
    match current {
        ColumnState::Sorted(Direction::Descending) => Direction::Ascending,
        _ => Direction::Descending,
    }
}

/// A sortable column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Key the column sorts on.
    pub key: String,
    /// How values compare.
    pub sort_type: SortType,
    /// Current state.
    pub state: ColumnState,
}

impl ColumnDescriptor {
    /// Creates an unsorted column.
    pub fn new(key: impl Into<String>, sort_type: SortType) -> Self {
        Self {
            key: key.into(),
            sort_type,
            state: ColumnState::Unset,
        }
    }
}

/// The columns of one table. At most one is sorted at any time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Columns {
    columns: Vec<ColumnDescriptor>,
}

impl Columns {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column and returns its index.
    pub fn push(&mut self, column: ColumnDescriptor) -> usize {
        self.columns.push(column);
        self.columns.len() - 1
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(index)
    }

    /// Index of the first column with `key`.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    /// The sorted column and its direction, if any.
    #[must_use]
    pub fn sorted(&self) -> Option<(usize, Direction)> {
        self.columns.iter().enumerate().find_map(|(i, c)| match c.state {
            ColumnState::Sorted(d) => Some((i, d)),
            ColumnState::Unset => None,
        })
    }

    /// Activates column `index`: clears every other column, then moves this one
    /// to [`next_direction`]. Returns the new direction, or `None` for a bad index.
    pub fn activate(&mut self, index: usize) -> Option<Direction> {
        let current = self.columns.get(index)?.state;
        let direction = next_direction(current);
        for (i, c) in self.columns.iter_mut().enumerate() {
            c.state = if i == index {
                ColumnState::Sorted(direction)
            } else {
                ColumnState::Unset
            };
        }
        Some(direction)
    }
}

/// Compares two rows on `key` according to `sort_type`.
#[must_use]
pub fn compare<K>(
    sort_type: SortType,
    a: &RowRecord<K>,
    b: &RowRecord<K>,
    key: &str,
    tie_key: &str,
) -> Ordering {
    match sort_type {
        SortType::Numeric => compare_numeric(a, b, key, tie_key),
        SortType::Lexicographic => compare_lexicographic(a, b, key),
    }
}

/// Orders `rows` and returns the permutation as indices into `rows`.
///
/// The ascending order is a stable sort, so rows that compare equal keep their
/// input order. Descending is that ascending order reversed.
#[must_use]
pub fn sort_rows<K>(
    rows: &[RowRecord<K>],
    key: &str,
    sort_type: SortType,
    tie_key: &str,
    direction: Direction,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| compare(sort_type, &rows[a], &rows[b], key, tie_key));
    if direction == Direction::Descending {
        order.reverse();
    }
    order
}
