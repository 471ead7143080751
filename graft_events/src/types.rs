// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event values and dispatch entries.

use graft_document::NodeId;

/// The kinds of event behaviors subscribe to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer activation of an element.
    Click,
    /// A key was released while an input had focus.
    KeyUp,
    /// An input's value or checked state was committed.
    Change,
    /// A form was submitted.
    Submit,
    /// The URL fragment changed. Targets the window.
    HashChange,
}

/// Where an event is aimed, or where a listener is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// A node in the document.
    Node(NodeId),
    /// The window: owner of page-wide events such as [`EventKind::HashChange`].
    Window,
}

impl EventTarget {
    /// Returns the node, if this target is one.
    #[must_use]
    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(id),
            Self::Window => None,
        }
    }
}

/// An event travelling through a dispatch sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// The node (or window) the event was aimed at.
    pub target: EventTarget,
    default_prevented: bool,
}

impl Event {
    /// Creates an event aimed at `target`.
    #[must_use]
    pub fn new(kind: EventKind, target: EventTarget) -> Self {
        Self {
            kind,
            target,
            default_prevented: false,
        }
    }

    /// Suppresses the host's default action (following a link, submitting a form).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Returns `true` once any handler called [`Event::prevent_default`].
    #[must_use]
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A listener-chosen token identifying which handler a dispatch entry is for.
///
/// Owners define their own tags, typically as associated constants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerTag(pub u16);

/// Dispatch phase relative to the listener's node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The listener sits on the target itself.
    Target,
    /// The listener sits on an ancestor (or the window).
    Bubble,
}

/// Handler outcome controlling propagation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep dispatching.
    Continue,
    /// Stop propagation; later entries are not run.
    Stop,
}

/// One step of a dispatch sequence: which owner's handler to call and with what context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch<O> {
    /// The listener's owner.
    pub owner: O,
    /// The listener's tag.
    pub tag: ListenerTag,
    /// Where the listener is attached.
    pub scope: EventTarget,
    /// The element the handler should treat as "current": the delegate match
    /// for delegated listeners, the scope node otherwise.
    pub current: EventTarget,
    /// Phase relative to the scope.
    pub phase: Phase,
}
