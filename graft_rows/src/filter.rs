// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The filter engine.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::row::RowRecord;

/// How a query is matched against row text. Both modes ignore case.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchMode {
    /// The text must begin with the query.
    Prefix,
    /// The text must contain the query anywhere.
    Substring,
}

/// Failure to build a [`Query`].
///
/// Every metacharacter is escaped, so the only way to get here is input long
/// enough to exceed the regex engine's compiled-size limit.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The escaped pattern did not compile.
    #[error("filter query could not be compiled: {0}")]
    Pattern(#[from] regex::Error),
}

/// A normalized, compiled filter query.
#[derive(Clone, Debug)]
pub struct Query {
    text: String,
    mode: MatchMode,
    regex: Regex,
}

impl Query {
    /// Trims `raw`, escapes it, and compiles it for `mode`.
    pub fn compile(raw: &str, mode: MatchMode) -> Result<Self, FilterError> {
        let text = raw.trim().to_owned();
        let escaped = regex::escape(&text);
        let pattern = match mode {
            MatchMode::Prefix => format!("^{escaped}"),
            MatchMode::Substring => escaped,
        };
        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
        Ok(Self { text, mode, regex })
    }

    /// The trimmed query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The match mode.
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Returns `true` if the query is empty and therefore matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Tests one text.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// What the caller should do with one row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RowDecision {
    /// Matches: make visible.
    Show,
    /// Does not match: hide.
    Hide,
    /// Excluded from filtering: leave as is.
    Skip,
}

/// Result of one filter pass, parallel to the input rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// One decision per input row, in input order.
    pub decisions: Vec<RowDecision>,
    /// Number of rows decided [`RowDecision::Show`].
    pub count: usize,
}

impl FilterOutcome {
    /// Indices of rows to show, in input order.
    pub fn shown(&self) -> impl Iterator<Item = usize> + '_ {
        self.decisions
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == RowDecision::Show)
            .map(|(i, _)| i)
    }
}

/// Decides visibility for every row.
///
/// The result depends only on the query and the rows, never on previous
/// visibility, so running it twice gives the same answer.
#[must_use]
pub fn filter_rows<K>(query: &Query, rows: &[RowRecord<K>]) -> FilterOutcome {
    let mut count = 0;
    let decisions = rows
        .iter()
        .map(|row| {
            if row.excluded {
                RowDecision::Skip
            } else if query.is_match(&row.text) {
                count += 1;
                RowDecision::Show
            } else {
                RowDecision::Hide
            }
        })
        .collect();
    FilterOutcome { decisions, count }
}
