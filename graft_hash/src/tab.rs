// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tab state and its two sync edges.

use alloc::string::String;
use alloc::vec::Vec;
use thiserror::Error;

use crate::fragment::{FragmentFormat, FragmentState};

/// Invalid tab set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TabError {
    /// No tab identifiers were given.
    #[error("tab set is empty")]
    Empty,
    /// The default identifier is not one of the tabs.
    #[error("default tab `{0}` is not in the tab set")]
    UnknownDefault(String),
    /// An identifier appears twice.
    #[error("tab `{0}` appears more than once")]
    Duplicate(String),
}

/// Result of applying an externally changed fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    /// The active tab changed to this identifier.
    Changed(String),
    /// The fragment resolved to the tab that was already active.
    Unchanged,
    /// The fragment is not tab state and was ignored.
    Ignored,
    /// The fragment named a tab that does not exist.
    Missing,
}

/// The active tab of one tab group, kept consistent with the URL fragment.
///
/// There are two edges, and neither calls the other:
///
/// - [`TabState::activate`] is the UI edge. It changes the active tab and
///   returns the fragment to push.
/// - [`TabState::apply_fragment`] is the URL edge. It changes the active tab
///   and returns nothing to push, so a fragment change can never echo back
///   into another fragment change.
///
/// Every change of the active tab bumps [`TabState::revision`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabState {
    ids: Vec<String>,
    default: usize,
    active: usize,
    revision: u64,
    format: FragmentFormat,
}

impl TabState {
    /// Creates a tab group with `default` active.
    pub fn new<I, S>(ids: I, default: &str) -> Result<Self, TabError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            if list.contains(&id) {
                return Err(TabError::Duplicate(id));
            }
            list.push(id);
        }
        if list.is_empty() {
            return Err(TabError::Empty);
        }
        let default_index = list
            .iter()
            .position(|id| id == default)
            .ok_or_else(|| TabError::UnknownDefault(default.into()))?;
        Ok(Self {
            ids: list,
            default: default_index,
            active: default_index,
            revision: 0,
            format: FragmentFormat::default(),
        })
    }

    /// Uses a non-default fragment marker.
    #[must_use]
    pub fn with_format(mut self, format: FragmentFormat) -> Self {
        self.format = format;
        self
    }

    /// All tab identifiers, in order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// The default tab.
    #[must_use]
    pub fn default_id(&self) -> &str {
        &self.ids[self.default]
    }

    /// The active tab.
    #[must_use]
    pub fn active_id(&self) -> &str {
        &self.ids[self.active]
    }

    /// Number of times the active tab has changed.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The fragment format in use.
    #[must_use]
    pub fn format(&self) -> FragmentFormat {
        self.format
    }

    /// UI edge: the user activated `id`.
    ///
    /// Returns the fragment (without `#`) to push, or `None` if `id` is not a tab.
    pub fn activate(&mut self, id: &str) -> Option<String> {
        let index = self.position(id)?;
        self.set_active(index);
        Some(self.format.fragment_for(id, self.default_id()))
    }

    /// URL edge: the fragment changed outside the tab group.
    pub fn apply_fragment(&mut self, fragment: &str) -> Applied {
        let index = match self.format.classify(fragment) {
            FragmentState::Foreign => return Applied::Ignored,
            FragmentState::Cleared => self.default,
            FragmentState::Tab(id) => match self.position(id) {
                Some(index) => index,
                None => return Applied::Missing,
            },
        };
        if self.set_active(index) {
            Applied::Changed(self.ids[index].clone())
        } else {
            Applied::Unchanged
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|t| t == id)
    }

    fn set_active(&mut self, index: usize) -> bool {
        if self.active == index {
            return false;
        }
        self.active = index;
        self.revision += 1;
        true
    }
}
