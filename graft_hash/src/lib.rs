// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graft Hash: keep a tab group and the URL fragment in agreement.
//!
//! Fragments that carry tab state start with a marker (`!` by default):
//! `#!reviews` selects `reviews`, and a bare `#!` (or no fragment at all)
//! selects the default tab. Every other fragment is an ordinary document
//! anchor and is ignored.
//!
//! - [`FragmentFormat`] classifies and formats fragments, and rewrites link
//!   hrefs so they carry the current tab state.
//! - [`TabState`] holds the active tab and exposes the two one-way edges:
//!   [`TabState::activate`] (UI to URL) and [`TabState::apply_fragment`]
//!   (URL to UI, never re-emitting).
//!
//! ```
//! use graft_hash::{Applied, TabState};
//!
//! let mut tabs = TabState::new(["summary", "reviews"], "summary").unwrap();
//! let pushed = tabs.activate("reviews").unwrap();
//! assert_eq!(pushed, "!reviews");
//!
//! // The host reports the fragment back; nothing changes and nothing is pushed.
//! assert_eq!(tabs.apply_fragment(&pushed), Applied::Unchanged);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod fragment;
mod tab;

pub use fragment::{FragmentFormat, FragmentState};
pub use tab::{Applied, TabError, TabState};
