// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fragment classification and formatting.

use alloc::format;
use alloc::string::String;

/// How a URL fragment reads to the synchronizer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FragmentState<'a> {
    /// Empty or the bare marker: the default tab.
    Cleared,
    /// Marker followed by a tab identifier.
    Tab(&'a str),
    /// Anything else, such as a plain document anchor. Never tab state.
    Foreign,
}

/// The marker convention for fragments that carry tab state.
///
/// Fragments are handled with or without their leading `#`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FragmentFormat {
    marker: char,
}

impl Default for FragmentFormat {
    fn default() -> Self {
        Self::new('!')
    }
}

impl FragmentFormat {
    /// Uses `marker` as the state prefix.
    #[must_use]
    pub const fn new(marker: char) -> Self {
        Self { marker }
    }

    /// The state prefix.
    #[must_use]
    pub const fn marker(&self) -> char {
        self.marker
    }

    /// Classifies `fragment`.
    ///
    /// ```
    /// use graft_hash::{FragmentFormat, FragmentState};
    ///
    /// let f = FragmentFormat::default();
    /// assert_eq!(f.classify("#!exons"), FragmentState::Tab("exons"));
    /// assert_eq!(f.classify("#!"), FragmentState::Cleared);
    /// assert_eq!(f.classify(""), FragmentState::Cleared);
    /// assert_eq!(f.classify("#exons"), FragmentState::Foreign);
    /// ```
    #[must_use]
    pub fn classify<'a>(&self, fragment: &'a str) -> FragmentState<'a> {
        let body = strip_hash(fragment);
        if body.is_empty() {
            return FragmentState::Cleared;
        }
        match body.strip_prefix(self.marker) {
            Some("") => FragmentState::Cleared,
            Some(id) => FragmentState::Tab(id),
            None => FragmentState::Foreign,
        }
    }

    /// The fragment (without `#`) a user activation of `id` should push.
    ///
    /// The default tab is encoded as the bare marker.
    #[must_use]
    pub fn fragment_for(&self, id: &str, default: &str) -> String {
        if id == default {
            String::from(self.marker)
        } else {
            format!("{}{id}", self.marker)
        }
    }

    /// Rewrites `href` so that it carries `fragment`, if `fragment` is tab state.
    ///
    /// Any fragment already on `href` is dropped. Returns `None` when
    /// `fragment` does not start with the marker; such links are left alone.
    #[must_use]
    pub fn propagate(&self, href: &str, fragment: &str) -> Option<String> {
        let body = strip_hash(fragment);
        if !body.starts_with(self.marker) {
            return None;
        }
        let base = href.split('#').next().unwrap_or(href);
        Some(format!("{base}#{body}"))
    }
}

fn strip_hash(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}
