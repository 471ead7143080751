// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The behavior trait and the context behaviors run in.

use core::fmt;

use graft_document::{Document, NodeId, Selector};
use graft_events::{Dispatch, Event, EventKind, Listener, ListenerTag, Listeners, Outcome};
use graft_hash::FragmentFormat;

use crate::host::Host;

/// Identifies one started behavior instance inside a [`Runtime`](crate::Runtime).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(pub(crate) usize);

impl InstanceId {
    /// Position in start order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance{}", self.0)
    }
}

/// Progressive-enhancement logic bound to one container element.
///
/// A fresh value is created by the registered factory for every container.
/// [`Behavior::start`] runs once, right after creation; it subscribes to the
/// events the behavior needs and performs any eager work. Afterwards
/// [`Behavior::handle`] is called for each routed event, with the
/// [`ListenerTag`] chosen at subscription time in `dispatch.tag`.
pub trait Behavior: fmt::Debug {
    /// Binds to `element`.
    fn start(&mut self, cx: &mut Context<'_>, element: NodeId);

    /// Handles one routed event.
    fn handle(
        &mut self,
        cx: &mut Context<'_>,
        event: &mut Event,
        dispatch: &Dispatch<InstanceId>,
    ) -> Outcome;
}

/// What a behavior may touch while it runs.
pub struct Context<'a> {
    pub(crate) doc: &'a mut Document,
    pub(crate) host: &'a mut dyn Host,
    pub(crate) listeners: &'a mut Listeners<InstanceId>,
    pub(crate) instance: InstanceId,
    pub(crate) format: FragmentFormat,
    pub(crate) fragment_dirty: &'a mut bool,
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("instance", &self.instance)
            .field("fragment", &self.host.fragment())
            .field("fragment_dirty", &*self.fragment_dirty)
            .finish_non_exhaustive()
    }
}

impl Context<'_> {
    /// The document.
    #[must_use]
    pub fn document(&self) -> &Document {
        self.doc
    }

    /// The document, mutably.
    pub fn document_mut(&mut self) -> &mut Document {
        self.doc
    }

    /// The running instance.
    #[must_use]
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Subscribes to `kind` events reaching `node`.
    pub fn listen(&mut self, node: NodeId, kind: EventKind, tag: ListenerTag) {
        self.listeners
            .add(Listener::on(self.instance, node, kind, tag));
    }

    /// Subscribes to `kind` events on elements below `node` matching `delegate`.
    pub fn listen_delegated(
        &mut self,
        node: NodeId,
        kind: EventKind,
        delegate: Selector,
        tag: ListenerTag,
    ) {
        self.listeners
            .add(Listener::delegated(self.instance, node, kind, delegate, tag));
    }

    /// Subscribes to window-level `kind` events.
    pub fn listen_window(&mut self, kind: EventKind, tag: ListenerTag) {
        self.listeners
            .add(Listener::window(self.instance, kind, tag));
    }

    /// Leaves the page for `path`.
    pub fn navigate(&mut self, path: &str) {
        tracing::debug!(instance = %self.instance, path, "navigate");
        self.host.navigate(path);
    }

    /// The current URL fragment, without `#`.
    #[must_use]
    pub fn fragment(&self) -> &str {
        self.host.fragment()
    }

    /// The marker convention for tab-state fragments.
    #[must_use]
    pub fn fragment_format(&self) -> FragmentFormat {
        self.format
    }

    /// Replaces the URL fragment.
    ///
    /// Writing the current value is a no-op. Any other write queues one
    /// window [`EventKind::HashChange`] dispatch, run after the current event
    /// completes.
    pub fn set_fragment(&mut self, fragment: &str) {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        if self.host.fragment() == fragment {
            return;
        }
        self.host.set_fragment(fragment);
        *self.fragment_dirty = true;
    }
}
