// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary to whatever embeds the page.

/// Page-level services the runtime needs from its embedder.
///
/// Fragments are exchanged without the leading `#`.
pub trait Host {
    /// Leaves the page for `path`.
    fn navigate(&mut self, path: &str);

    /// The current URL fragment.
    fn fragment(&self) -> &str;

    /// Replaces the URL fragment.
    fn set_fragment(&mut self, fragment: &str);
}

/// An in-memory [`Host`] that records what behaviors asked for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryHost {
    fragment: String,
    navigations: Vec<String>,
    fragment_writes: Vec<String>,
}

impl MemoryHost {
    /// Creates a host with an empty fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host whose page was loaded with `fragment`.
    #[must_use]
    pub fn with_fragment(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            ..Self::default()
        }
    }

    /// Changes the fragment the way the user would (address bar, back button),
    /// without recording it as a write.
    ///
    /// Follow with [`Runtime::hash_changed`](crate::Runtime::hash_changed).
    pub fn load_fragment(&mut self, fragment: impl Into<String>) {
        self.fragment = fragment.into();
    }

    /// Every path passed to [`Host::navigate`], oldest first.
    #[must_use]
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// The most recent navigation.
    #[must_use]
    pub fn last_navigation(&self) -> Option<&str> {
        self.navigations.last().map(String::as_str)
    }

    /// Every fragment passed to [`Host::set_fragment`], oldest first.
    #[must_use]
    pub fn fragment_writes(&self) -> &[String] {
        &self.fragment_writes
    }
}

impl Host for MemoryHost {
    fn navigate(&mut self, path: &str) {
        self.navigations.push(path.to_owned());
    }

    fn fragment(&self) -> &str {
        &self.fragment
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.fragment_writes.push(fragment.to_owned());
        self.fragment = fragment.to_owned();
    }
}
