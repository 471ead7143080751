// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row records: the unit both engines work on.

use std::borrow::Cow;

use hashbrown::HashMap;

use crate::compare::parse_int;

/// A raw sort-key value as read from markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SortValue {
    /// Textual value; numeric comparison parses a leading integer from it.
    Text(String),
    /// Already-numeric value.
    Number(i64),
}

impl SortValue {
    /// Returns the value as an integer, if it has one.
    ///
    /// Text values use leading-integer parsing: `"12 kb"` is `12`, `"kb"` is `None`.
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Text(s) => parse_int(s),
            Self::Number(n) => Some(*n),
        }
    }

    /// Returns the value as text.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Number(n) => Cow::Owned(n.to_string()),
        }
    }
}

impl From<&str> for SortValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for SortValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for SortValue {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// One filterable, sortable row.
///
/// `K` is an opaque identifier the caller uses to map results back to its own
/// rows (a node handle, an index, a database key). Visibility is not stored:
/// it is always recomputed by the filter engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowRecord<K> {
    /// Caller identifier.
    pub id: K,
    /// Text matched by the filter engine.
    pub text: String,
    /// Sort-key values by key name.
    pub keys: HashMap<String, SortValue>,
    /// Rows excluded from filtering are never matched, counted or touched.
    pub excluded: bool,
}

impl<K> RowRecord<K> {
    /// Creates a row with no sort keys.
    pub fn new(id: K, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            keys: HashMap::new(),
            excluded: false,
        }
    }

    /// Adds (or replaces) a sort-key value.
    #[must_use]
    pub fn with_key(mut self, name: impl Into<String>, value: impl Into<SortValue>) -> Self {
        self.keys.insert(name.into(), value.into());
        self
    }

    /// Sets the excluded flag.
    #[must_use]
    pub fn excluded(mut self, excluded: bool) -> Self {
        self.excluded = excluded;
        self
    }

    /// Looks up a sort-key value.
    #[must_use]
    pub fn key(&self, name: &str) -> Option<&SortValue> {
        self.keys.get(name)
    }
}
