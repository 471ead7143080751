// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime configuration.

use graft_hash::FragmentFormat;

/// Knobs for a [`Runtime`](crate::Runtime).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Attribute naming the behavior to attach. Default `data-module`.
    pub behavior_attribute: String,
    /// Maximum number of fragment-change dispatches one external event may
    /// trigger. Default 8.
    pub fragment_cascade_limit: usize,
    /// Marker convention for tab-state fragments.
    pub fragment_format: FragmentFormat,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            behavior_attribute: "data-module".into(),
            fragment_cascade_limit: 8,
            fragment_format: FragmentFormat::default(),
        }
    }
}

impl RuntimeConfig {
    /// Sets the behavior attribute.
    #[must_use]
    pub fn with_behavior_attribute(mut self, name: impl Into<String>) -> Self {
        self.behavior_attribute = name.into();
        self
    }

    /// Sets the fragment cascade limit.
    #[must_use]
    pub fn with_fragment_cascade_limit(mut self, limit: usize) -> Self {
        self.fragment_cascade_limit = limit;
        self
    }

    /// Sets the fragment format.
    #[must_use]
    pub fn with_fragment_format(mut self, format: FragmentFormat) -> Self {
        self.fragment_format = format;
        self
    }
}
