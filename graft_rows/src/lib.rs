// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graft Rows: filtering and sorting for server-rendered lists and tables.
//!
//! Everything here is pure: callers extract [`RowRecord`]s from their own
//! markup, ask for a [`FilterOutcome`] or a sort permutation, and apply the
//! result themselves.
//!
//! ## Filtering
//!
//! - [`Query::compile`] trims and escapes user input, so every query is a
//!   literal, case-insensitive match in either [`MatchMode::Prefix`] or
//!   [`MatchMode::Substring`].
//! - [`filter_rows`] returns one [`RowDecision`] per row plus the visible count.
//!   Excluded rows are skipped.
//! - [`CountLabel`] renders the live counter text.
//!
//! ## Sorting
//!
//! - [`compare_numeric`] and [`compare_lexicographic`] define ascending orders.
//! - [`sort_rows`] stable-sorts ascending and reverses for
//!   [`Direction::Descending`].
//! - [`Columns`] tracks which single column is sorted and which way; see
//!   [`next_direction`] for the toggle rule.
//!
//! ## Example
//!
//! ```
//! use graft_rows::{Direction, MatchMode, Query, RowRecord, SortType, filter_rows, sort_rows};
//!
//! let rows = vec![
//!     RowRecord::new(0, "BRCA1").with_key("name", "BRCA1").with_key("num", 10_i64),
//!     RowRecord::new(1, "BRCA2").with_key("name", "BRCA2").with_key("num", 10_i64),
//!     RowRecord::new(2, "TP53").with_key("name", "TP53").with_key("num", 5_i64),
//! ];
//!
//! let order = sort_rows(&rows, "num", SortType::Numeric, "name", Direction::Descending);
//! assert_eq!(order, [0, 1, 2]);
//!
//! let query = Query::compile("rca", MatchMode::Substring).unwrap();
//! assert_eq!(filter_rows(&query, &rows).count, 2);
//! ```

mod compare;
mod filter;
mod label;
mod row;
mod sort;

pub use compare::{compare_lexicographic, compare_numeric, parse_int};
pub use filter::{FilterError, FilterOutcome, MatchMode, Query, RowDecision, filter_rows};
pub use label::CountLabel;
pub use row::{RowRecord, SortValue};
pub use sort::{
    ColumnDescriptor, ColumnState, Columns, Direction, SortType, compare, next_direction,
    sort_rows,
};
