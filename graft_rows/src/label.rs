// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live count labels.

/// Singular and plural nouns for a result counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountLabel {
    /// Used when the count is exactly one.
    pub singular: String,
    /// Used for every other count, zero included.
    pub plural: String,
}

impl Default for CountLabel {
    fn default() -> Self {
        Self::new("result", "results")
    }
}

impl CountLabel {
    /// Creates a label pair.
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            plural: plural.into(),
        }
    }

    /// Renders `"<count> <noun>"`.
    #[must_use]
    pub fn render(&self, count: usize) -> String {
        let noun = if count == 1 {
            &self.singular
        } else {
            &self.plural
        };
        format!("{count} {noun}")
    }
}
