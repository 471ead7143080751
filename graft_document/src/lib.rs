// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graft Document: a small mutable document tree for progressive enhancement.
//!
//! This crate models the server-rendered page that Graft behaviors attach to.
//! It is deliberately minimal: elements with a tag, classes and attributes,
//! text runs, and two flags (hidden, checked). There is no styling, layout or
//! parsing; markup arrives pre-structured as [`Markup`] values.
//!
//! ## API overview
//!
//! - [`Document`]: the tree. Insert with [`Document::append`], splice with
//!   [`Document::replace_children`], permute with [`Document::reorder_children`].
//! - [`NodeId`]: generational handle. Handles into a replaced subtree go stale and
//!   never alias the new nodes.
//! - [`NodeFlags`]: hidden and checked state.
//! - [`Selector`]: single-element predicate (tag, classes, attribute tests) used by
//!   [`Document::query_all`], [`Document::query`], [`Document::closest`] and
//!   [`Document::matches`].
//! - [`Markup`]: owned, detached subtree used for insertion.
//!
//! ## Document order
//!
//! Children are kept in insertion order and every traversal
//! ([`Document::descendants`], the queries) is a pre-order walk, so results come
//! back in document order.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod markup;
mod selector;
mod types;

pub use document::{Ancestors, Descendants, Document, DocumentError};
pub use markup::{ElementMarkup, Markup};
pub use selector::{AttrMatch, Selector};
pub use types::{NodeFlags, NodeId};
