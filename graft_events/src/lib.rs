// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graft Events: delegated listeners and deterministic bubble routing.
//!
//! Behaviors subscribe to events at a scope (a document node or the window),
//! optionally narrowed by a delegate [`Selector`](graft_document::Selector).
//! For an incoming event the [`Listeners`] table produces an ordered
//! [`Dispatch`] sequence, and [`dispatcher::run`] walks it honoring
//! [`Outcome::Stop`].
//!
//! ## Ordering
//!
//! - Nodes are visited from the target up to the root.
//! - At each node, listeners run in subscription order.
//! - Window listeners run after every node listener.
//!
//! The table never calls handlers itself; owners are plain identifiers (`O`)
//! that the caller maps back to whatever handles the event.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatcher;
mod listeners;
mod types;

pub use listeners::{Listener, Listeners};
pub use types::{Dispatch, Event, EventKind, EventTarget, ListenerTag, Outcome, Phase};
