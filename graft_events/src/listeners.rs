// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The listener table and bubble routing.

use alloc::vec::Vec;
use graft_document::{Document, NodeId, Selector};

use crate::types::{Dispatch, EventKind, EventTarget, ListenerTag, Phase};

/// A subscription: an owner's interest in one event kind at one scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listener<O> {
    /// Who handles the event.
    pub owner: O,
    /// Where the listener is attached.
    pub scope: EventTarget,
    /// Which events it receives.
    pub kind: EventKind,
    /// When set, the listener only fires for events whose target is, or lies
    /// inside, an element strictly below `scope` that matches this selector.
    pub delegate: Option<Selector>,
    /// Owner-chosen handler token.
    pub tag: ListenerTag,
}

impl<O> Listener<O> {
    /// A listener attached directly to `node`.
    #[must_use]
    pub fn on(owner: O, node: NodeId, kind: EventKind, tag: ListenerTag) -> Self {
        Self {
            owner,
            scope: EventTarget::Node(node),
            kind,
            delegate: None,
            tag,
        }
    }

    /// A listener attached to `node` that only fires for descendants matching `delegate`.
    #[must_use]
    pub fn delegated(
        owner: O,
        node: NodeId,
        kind: EventKind,
        delegate: Selector,
        tag: ListenerTag,
    ) -> Self {
        Self {
            delegate: Some(delegate),
            ..Self::on(owner, node, kind, tag)
        }
    }

    /// A listener attached to the window.
    #[must_use]
    pub fn window(owner: O, kind: EventKind, tag: ListenerTag) -> Self {
        Self {
            owner,
            scope: EventTarget::Window,
            kind,
            delegate: None,
            tag,
        }
    }
}

/// The subscription table, kept in subscription order.
///
/// ## Routing
///
/// [`Listeners::route`] walks from the target up to the root. At each node it
/// emits the listeners attached there for the event kind, in subscription
/// order. A delegated listener is emitted only if some element between the
/// target (inclusive) and the listener's node (exclusive) matches its
/// selector; the nearest such element becomes the entry's `current`.
/// Window listeners come last.
#[derive(Clone, Debug)]
pub struct Listeners<O> {
    entries: Vec<Listener<O>>,
}

impl<O> Default for Listeners<O> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<O: Copy + PartialEq> Listeners<O> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a subscription.
    pub fn add(&mut self, listener: Listener<O>) {
        self.entries.push(listener);
    }

    /// Iterates the subscriptions in subscription order.
    pub fn iter(&self) -> core::slice::Iter<'_, Listener<O>> {
        self.entries.iter()
    }

    /// Drops every subscription attached to a node that is no longer live.
    ///
    /// Returns the number of subscriptions removed.
    pub fn prune_dead(&mut self, doc: &Document) -> usize {
        let before = self.entries.len();
        self.entries.retain(|l| match l.scope {
            EventTarget::Node(n) => doc.is_alive(n),
            EventTarget::Window => true,
        });
        before - self.entries.len()
    }

    /// Drops every subscription held by `owner`. Returns the number removed.
    pub fn remove_owner(&mut self, owner: O) -> usize {
        let before = self.entries.len();
        self.entries.retain(|l| l.owner != owner);
        before - self.entries.len()
    }

    /// Builds the dispatch sequence for an event of `kind` aimed at `target`.
    #[must_use]
    pub fn route(&self, doc: &Document, target: EventTarget, kind: EventKind) -> Vec<Dispatch<O>> {
        let mut out = Vec::new();
        if let EventTarget::Node(target) = target {
            let path: Vec<NodeId> = doc.ancestors(target).collect();
            for (depth, &node) in path.iter().enumerate() {
                let phase = if depth == 0 {
                    Phase::Target
                } else {
                    Phase::Bubble
                };
                for l in self.at(EventTarget::Node(node), kind) {
                    let current = match &l.delegate {
                        None => Some(node),
                        Some(sel) => path[..depth]
                            .iter()
                            .copied()
                            .find(|&n| doc.matches(n, sel)),
                    };
                    if let Some(current) = current {
                        out.push(Dispatch {
                            owner: l.owner,
                            tag: l.tag,
                            scope: l.scope,
                            current: EventTarget::Node(current),
                            phase,
                        });
                    }
                }
            }
        }
        out.extend(self.at(EventTarget::Window, kind).map(|l| Dispatch {
            owner: l.owner,
            tag: l.tag,
            scope: l.scope,
            current: EventTarget::Window,
            phase: if target == EventTarget::Window {
                Phase::Target
            } else {
                Phase::Bubble
            },
        }));
        out
    }

    fn at(&self, scope: EventTarget, kind: EventKind) -> impl Iterator<Item = &Listener<O>> + '_ {
        self.entries
            .iter()
            .filter(move |l| l.scope == scope && l.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use graft_document::Markup;

    const A: ListenerTag = ListenerTag(1);
    const B: ListenerTag = ListenerTag(2);

    fn doc() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let container = doc
            .append(
                doc.root(),
                Markup::element("div").child(
                    Markup::element("table").child(
                        Markup::element("th")
                            .class("js-sortable-header")
                            .child(Markup::element("span").text("Gene")),
                    ),
                ),
            )
            .unwrap();
        let th = doc
            .query(container, &Selector::class("js-sortable-header"))
            .unwrap();
        let span = doc.query(th, &Selector::tag("span")).unwrap();
        (doc, container, th, span)
    }

    #[test]
    fn delegated_listener_reports_the_matching_element() {
        let (doc, container, th, span) = doc();
        let mut ls = Listeners::new();
        ls.add(Listener::delegated(
            7_u32,
            container,
            EventKind::Click,
            Selector::class("js-sortable-header"),
            A,
        ));
        let seq = ls.route(&doc, EventTarget::Node(span), EventKind::Click);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq[0].current, EventTarget::Node(th));
        assert_eq!(seq[0].phase, Phase::Bubble);
    }

    #[test]
    fn delegated_listener_ignores_its_own_node() {
        let (doc, container, _, _) = doc();
        let mut ls = Listeners::new();
        ls.add(Listener::delegated(
            1_u32,
            container,
            EventKind::Click,
            Selector::tag("div"),
            A,
        ));
        assert!(
            ls.route(&doc, EventTarget::Node(container), EventKind::Click)
                .is_empty()
        );
    }

    #[test]
    fn subscription_order_is_kept_per_node() {
        let (doc, container, _, span) = doc();
        let mut ls = Listeners::new();
        ls.add(Listener::on(1_u32, container, EventKind::Click, B));
        ls.add(Listener::on(2_u32, container, EventKind::Click, A));
        ls.add(Listener::on(3_u32, span, EventKind::Click, A));
        ls.add(Listener::on(4_u32, container, EventKind::KeyUp, A));
        let owners: Vec<_> = ls
            .route(&doc, EventTarget::Node(span), EventKind::Click)
            .iter()
            .map(|d| d.owner)
            .collect();
        assert_eq!(owners, vec![3, 1, 2]);
    }

    #[test]
    fn window_listeners_run_last() {
        let (doc, container, _, span) = doc();
        let mut ls = Listeners::new();
        ls.add(Listener::window(9_u32, EventKind::Click, A));
        ls.add(Listener::on(1_u32, container, EventKind::Click, A));
        let seq = ls.route(&doc, EventTarget::Node(span), EventKind::Click);
        assert_eq!(seq.iter().map(|d| d.owner).collect::<Vec<_>>(), vec![1, 9]);
        let hash = ls.route(&doc, EventTarget::Window, EventKind::HashChange);
        assert!(hash.is_empty());
    }

    #[test]
    fn prune_dead_drops_listeners_on_removed_nodes() {
        let (mut doc, container, th, _) = doc();
        let mut ls = Listeners::new();
        ls.add(Listener::on(1_u32, th, EventKind::Click, A));
        ls.add(Listener::on(2_u32, container, EventKind::Click, A));
        ls.add(Listener::window(3_u32, EventKind::HashChange, A));
        doc.remove(th).unwrap();
        assert_eq!(ls.prune_dead(&doc), 1);
        assert_eq!(ls.len(), 2);
        assert_eq!(ls.remove_owner(3), 1);
        assert_eq!(ls.len(), 1);
    }
}
