// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The arena-backed [`Document`] tree.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::markup::{ElementMarkup, Markup};
use crate::selector::Selector;
use crate::types::{NodeFlags, NodeId};

/// Errors from structural or attribute edits on a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// The handle does not name a live node.
    #[error("node {0} is not alive in this document")]
    StaleNode(NodeId),
    /// The operation needs an element but the node is a text run.
    #[error("node {0} is a text node")]
    NotAnElement(NodeId),
    /// A reorder named a node that is not a child of the parent.
    #[error("node {child} is not a child of {parent}")]
    NotAChild {
        /// The parent whose children were being reordered.
        parent: NodeId,
        /// The offending node.
        child: NodeId,
    },
    /// A reorder named the same child more than once.
    #[error("child {child} appears more than once in a reorder of {parent}")]
    DuplicateChild {
        /// The parent whose children were being reordered.
        parent: NodeId,
        /// The repeated node.
        child: NodeId,
    },
    /// The root node cannot be removed.
    #[error("the document root cannot be removed")]
    RootRemoval,
}

#[derive(Clone, Debug)]
struct Element {
    tag: String,
    classes: SmallVec<[String; 4]>,
    attrs: SmallVec<[(String, String); 4]>,
}

impl Element {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Clone, Debug)]
enum Content {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    content: Content,
    flags: NodeFlags,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A mutable document tree of elements and text runs.
///
/// Nodes live in a slot arena addressed by generational [`NodeId`]s. The tree
/// always has a root element (`body` by default). All queries walk children in
/// insertion order, which is the document order.
///
/// ```
/// use graft_document::{Document, Markup, Selector};
///
/// let mut doc = Document::new();
/// let list = doc
///     .append(
///         doc.root(),
///         Markup::element("ul")
///             .child(Markup::element("li").attr("data-text", "BRCA1").text("BRCA1"))
///             .child(Markup::element("li").attr("data-text", "TP53").text("TP53")),
///     )
///     .unwrap();
///
/// let rows = doc.query_all(list, &Selector::tag("li"));
/// assert_eq!(rows.len(), 2);
/// assert_eq!(doc.text_content(list), "BRCA1TP53");
/// ```
#[derive(Clone, Debug)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    live: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document with an empty `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root("body")
    }

    /// Creates a document whose root element has the given tag.
    #[must_use]
    pub fn with_root(tag: impl Into<String>) -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId::new(0, 1),
            live: 0,
        };
        doc.root = doc.alloc(
            None,
            Content::Element(Element {
                tag: tag.into(),
                classes: SmallVec::new(),
                attrs: SmallVec::new(),
            }),
            NodeFlags::empty(),
        );
        doc
    }

    /// Returns the root element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of live nodes, text runs included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.live
    }

    /// Returns `true` if `id` names a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Returns `true` if `id` names a live element (not a text run).
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Returns the parent of a live node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Returns the children of a node in document order.
    ///
    /// Stale handles yield an empty slice.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Returns the element children of a node in document order.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
    }

    /// Returns the tag name of an element.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(name))
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set_attr(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DocumentError> {
        let value = value.into();
        let element = self.element_mut(id)?;
        if let Some(slot) = element.attrs.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value;
        } else {
            element.attrs.push((name.into(), value));
        }
        Ok(())
    }

    /// Removes an attribute, returning its previous value.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Result<Option<String>, DocumentError> {
        let element = self.element_mut(id)?;
        let pos = element.attrs.iter().position(|(k, _)| k == name);
        Ok(pos.map(|p| element.attrs.remove(p).1))
    }

    /// Returns `true` if the element carries `class`.
    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Returns the element's classes in insertion order.
    pub fn classes(&self, id: NodeId) -> impl Iterator<Item = &str> + '_ {
        self.element(id)
            .into_iter()
            .flat_map(|e| e.classes.iter().map(String::as_str))
    }

    /// Adds a class. Returns `true` if the class was not already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<bool, DocumentError> {
        let element = self.element_mut(id)?;
        if element.has_class(class) {
            return Ok(false);
        }
        element.classes.push(class.into());
        Ok(true)
    }

    /// Removes a class. Returns `true` if the class was present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<bool, DocumentError> {
        let element = self.element_mut(id)?;
        let before = element.classes.len();
        element.classes.retain(|c| c != class);
        Ok(element.classes.len() != before)
    }

    /// Returns the flags of a live node.
    #[must_use]
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node(id).map(|n| n.flags)
    }

    /// Shows or hides a node (and with it, its subtree).
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> Result<(), DocumentError> {
        self.node_mut(id)?.flags.set(NodeFlags::HIDDEN, hidden);
        Ok(())
    }

    /// Returns `true` if the node itself carries [`NodeFlags::HIDDEN`].
    #[must_use]
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.node(id)
            .is_some_and(|n| n.flags.contains(NodeFlags::HIDDEN))
    }

    /// Returns `true` if the node is live and neither it nor any ancestor is hidden.
    #[must_use]
    pub fn is_rendered(&self, id: NodeId) -> bool {
        self.is_alive(id) && self.ancestors(id).all(|a| !self.is_hidden(a))
    }

    /// Returns `true` if a checkable element is checked.
    #[must_use]
    pub fn is_checked(&self, id: NodeId) -> bool {
        self.node(id)
            .is_some_and(|n| n.flags.contains(NodeFlags::CHECKED))
    }

    /// Sets the checked state of a checkable element.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<(), DocumentError> {
        self.element_mut(id)?;
        self.node_mut(id)?.flags.set(NodeFlags::CHECKED, checked);
        Ok(())
    }

    /// Returns the current value of a form input (empty when unset).
    #[must_use]
    pub fn value(&self, id: NodeId) -> &str {
        self.attr(id, "value").unwrap_or_default()
    }

    /// Sets the current value of a form input.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> Result<(), DocumentError> {
        self.set_attr(id, "value", value)
    }

    /// Returns the concatenated text of every text run under `id`, in document order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for n in self.descendants(id) {
            if let Some(Node {
                content: Content::Text(t),
                ..
            }) = self.node(n)
            {
                out.push_str(t);
            }
        }
        out
    }

    /// Replaces all children of an element with a single text run.
    pub fn set_text_content(
        &mut self,
        id: NodeId,
        text: impl Into<String>,
    ) -> Result<(), DocumentError> {
        self.replace_children(id, [Markup::Text(text.into())])
            .map(|_| ())
    }

    /// Appends `markup` as the last child of `parent`, returning the new node.
    pub fn append(&mut self, parent: NodeId, markup: Markup) -> Result<NodeId, DocumentError> {
        self.element(parent)
            .ok_or_else(|| self.missing_element(parent))?;
        Ok(self.insert_markup(parent, markup))
    }

    /// Removes every child of `parent` and inserts `markup` in their place.
    ///
    /// The removed subtrees are freed, so every handle into them becomes stale.
    /// Returns the handles of the new top-level children.
    pub fn replace_children(
        &mut self,
        parent: NodeId,
        markup: impl IntoIterator<Item = Markup>,
    ) -> Result<Vec<NodeId>, DocumentError> {
        self.element(parent)
            .ok_or_else(|| self.missing_element(parent))?;
        let old = core::mem::take(&mut self.node_mut(parent)?.children);
        for child in old {
            self.free_subtree(child);
        }
        Ok(markup
            .into_iter()
            .map(|m| self.insert_markup(parent, m))
            .collect())
    }

    /// Detaches and frees a node and its subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DocumentError> {
        if id == self.root {
            return Err(DocumentError::RootRemoval);
        }
        let parent = self.node(id).ok_or(DocumentError::StaleNode(id))?.parent;
        if let Some(parent) = parent
            && let Ok(p) = self.node_mut(parent)
        {
            p.children.retain(|&c| c != id);
        }
        self.free_subtree(id);
        Ok(())
    }

    /// Places the given children of `parent` in the given order.
    ///
    /// The listed children occupy the positions they held before, as a set;
    /// children not listed keep their positions. Handles stay valid.
    pub fn reorder_children(&mut self, parent: NodeId, order: &[NodeId]) -> Result<(), DocumentError> {
        let node = self.node(parent).ok_or(DocumentError::StaleNode(parent))?;
        let index: HashMap<NodeId, usize> = node
            .children
            .iter()
            .enumerate()
            .map(|(p, &c)| (c, p))
            .collect();
        let mut seen = vec![false; node.children.len()];
        let mut positions = Vec::with_capacity(order.len());
        for &child in order {
            let p = *index
                .get(&child)
                .ok_or(DocumentError::NotAChild { parent, child })?;
            if core::mem::replace(&mut seen[p], true) {
                return Err(DocumentError::DuplicateChild { parent, child });
            }
            positions.push(p);
        }
        positions.sort_unstable();
        let node = self.node_mut(parent)?;
        for (&pos, &child) in positions.iter().zip(order) {
            node.children[pos] = child;
        }
        Ok(())
    }

    /// Iterates `root` and every node below it in document order (pre-order).
    #[must_use]
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let mut stack = Vec::new();
        if self.is_alive(root) {
            stack.push(root);
        }
        Descendants { doc: self, stack }
    }

    /// Iterates `id` and its ancestors up to the root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.is_alive(id).then_some(id),
        }
    }

    /// Returns `true` if `node` is `ancestor` or lies below it.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// Returns `true` if `id` is an element matching `selector`.
    #[must_use]
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.element(id).is_some_and(|e| {
            selector.matches(&e.tag, |c| e.has_class(c), |name| e.attr(name))
        })
    }

    /// Returns every element strictly below `root` that matches `selector`, in document order.
    #[must_use]
    pub fn query_all(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(root)
            .skip(1)
            .filter(|&n| self.matches(n, selector))
            .collect()
    }

    /// Returns the first element strictly below `root` that matches `selector`.
    #[must_use]
    pub fn query(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(root)
            .skip(1)
            .find(|&n| self.matches(n, selector))
    }

    /// Returns the nearest element at or above `id` that matches `selector`.
    #[must_use]
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        self.ancestors(id).find(|&n| self.matches(n, selector))
    }

    /// Returns the first element in the document whose `id` attribute equals `value`.
    #[must_use]
    pub fn element_by_id(&self, value: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|&n| self.attr(n, "id") == Some(value))
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.idx())
            .filter(|s| s.generation == id.generation())
            .and_then(|s| s.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DocumentError> {
        self.slots
            .get_mut(id.idx())
            .filter(|s| s.generation == id.generation())
            .and_then(|s| s.node.as_mut())
            .ok_or(DocumentError::StaleNode(id))
    }

    fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.node(id)?.content {
            Content::Element(e) => Some(e),
            Content::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, DocumentError> {
        match &mut self.node_mut(id)?.content {
            Content::Element(e) => Ok(e),
            Content::Text(_) => Err(DocumentError::NotAnElement(id)),
        }
    }

    fn missing_element(&self, id: NodeId) -> DocumentError {
        if self.is_alive(id) {
            DocumentError::NotAnElement(id)
        } else {
            DocumentError::StaleNode(id)
        }
    }

    fn alloc(&mut self, parent: Option<NodeId>, content: Content, flags: NodeFlags) -> NodeId {
        let node = Node {
            parent,
            children: Vec::new(),
            content,
            flags,
        };
        self.live += 1;
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(node);
            NodeId::new(idx, slot.generation)
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "documents never approach u32::MAX nodes"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                node: Some(node),
            });
            NodeId::new(idx, 1)
        }
    }

    fn insert_markup(&mut self, parent: NodeId, markup: Markup) -> NodeId {
        let (content, flags, children) = match markup {
            Markup::Text(text) => (Content::Text(text), NodeFlags::empty(), Vec::new()),
            Markup::Element(ElementMarkup {
                tag,
                classes,
                attrs,
                flags,
                children,
            }) => (
                Content::Element(Element {
                    tag,
                    classes: classes.into_iter().collect(),
                    attrs: attrs.into_iter().collect(),
                }),
                flags,
                children,
            ),
        };
        let id = self.alloc(Some(parent), content, flags);
        if let Ok(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        for child in children {
            self.insert_markup(id, child);
        }
        id
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = Vec::new();
        stack.push(id);
        while let Some(id) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(id.idx())
                .filter(|s| s.generation == id.generation())
            else {
                continue;
            };
            let Some(node) = slot.node.take() else {
                continue;
            };
            stack.extend(node.children);
            self.free.push(id.0);
            self.live -= 1;
        }
    }
}

/// Pre-order iterator returned by [`Document::descendants`].
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Push children in reverse so they pop in document order.
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Iterator returned by [`Document::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.doc.parent(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> (Document, NodeId) {
        let mut doc = Document::new();
        let ul = doc
            .append(
                doc.root(),
                Markup::element("ul")
                    .class("genes")
                    .child(Markup::element("li").attr("data-text", "BRCA1").text("BRCA1"))
                    .child(Markup::element("li").attr("data-text", "BRCA2").text("BRCA2"))
                    .child(Markup::element("li").attr("data-text", "TP53").text("TP53")),
            )
            .unwrap();
        (doc, ul)
    }

    #[test]
    fn descendants_are_pre_order() {
        let (doc, ul) = sample();
        let tags: Vec<_> = doc
            .descendants(doc.root())
            .filter_map(|n| doc.tag(n))
            .collect();
        assert_eq!(tags, vec!["body", "ul", "li", "li", "li"]);
        assert_eq!(doc.text_content(ul), "BRCA1BRCA2TP53");
    }

    #[test]
    fn replace_children_invalidates_old_handles() {
        let (mut doc, ul) = sample();
        let old = doc.element_children(ul).collect::<Vec<_>>();
        let new = doc
            .replace_children(ul, [Markup::element("li").text("KRAS")])
            .unwrap();
        assert!(old.iter().all(|&n| !doc.is_alive(n)));
        assert_eq!(new.len(), 1);
        assert!(!old.contains(&new[0]));
        assert_eq!(doc.text_content(ul), "KRAS");
    }

    #[test]
    fn reuse_bumps_generation() {
        let (mut doc, ul) = sample();
        // A leaf frees exactly one slot, so the next insert reuses it.
        let first = doc.append(ul, Markup::element("li")).unwrap();
        doc.remove(first).unwrap();
        let again = doc.append(ul, Markup::element("li")).unwrap();
        assert_eq!(again.idx(), first.idx());
        assert_ne!(again, first);
        assert!(!doc.is_alive(first));
    }

    #[test]
    fn reorder_keeps_handles() {
        let (mut doc, ul) = sample();
        let rows: Vec<_> = doc.element_children(ul).collect();
        doc.reorder_children(ul, &[rows[2], rows[0], rows[1]])
            .unwrap();
        assert_eq!(doc.text_content(ul), "TP53BRCA1BRCA2");
        assert!(rows.iter().all(|&r| doc.is_alive(r)));
    }

    #[test]
    fn reorder_of_a_long_subset_leaves_other_children_in_place() {
        let mut doc = Document::new();
        let root = doc.root();
        let tbody = doc.append(root, Markup::element("tbody")).unwrap();
        let rows: Vec<_> = (0..4000)
            .map(|i| {
                doc.append(tbody, Markup::element("tr").attr("data-row", alloc::format!("{i}")))
                    .unwrap()
            })
            .collect();
        // Every even row, reversed. Odd rows keep their slots.
        let evens: Vec<_> = rows.iter().copied().step_by(2).rev().collect();
        doc.reorder_children(tbody, &evens).unwrap();

        let after: Vec<_> = doc.element_children(tbody).collect();
        assert_eq!(after.len(), rows.len());
        assert_eq!(after[0], rows[3998]);
        assert_eq!(after[1], rows[1]);
        assert_eq!(after[3998], rows[0]);
        assert_eq!(after[3999], rows[3999]);
    }

    #[test]
    fn reorder_rejects_foreign_and_duplicate_children() {
        let (mut doc, ul) = sample();
        let rows: Vec<_> = doc.element_children(ul).collect();
        assert_eq!(
            doc.reorder_children(ul, &[ul]),
            Err(DocumentError::NotAChild {
                parent: ul,
                child: ul
            })
        );
        assert_eq!(
            doc.reorder_children(ul, &[rows[0], rows[0]]),
            Err(DocumentError::DuplicateChild {
                parent: ul,
                child: rows[0]
            })
        );
    }

    #[test]
    fn hidden_ancestor_hides_subtree() {
        let (mut doc, ul) = sample();
        let li = doc.element_children(ul).next().unwrap();
        assert!(doc.is_rendered(li));
        doc.set_hidden(ul, true).unwrap();
        assert!(!doc.is_rendered(li));
        assert!(!doc.is_hidden(li));
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut doc = Document::new();
        assert_eq!(doc.remove(doc.root()), Err(DocumentError::RootRemoval));
    }

    #[test]
    fn classes_round_trip() {
        let (mut doc, ul) = sample();
        assert!(doc.has_class(ul, "genes"));
        assert!(doc.add_class(ul, "sorted").unwrap());
        assert!(!doc.add_class(ul, "sorted").unwrap());
        assert!(doc.remove_class(ul, "genes").unwrap());
        assert_eq!(doc.classes(ul).collect::<Vec<_>>(), vec!["sorted"]);
    }

    #[test]
    fn text_nodes_reject_element_edits() {
        let (mut doc, ul) = sample();
        let li = doc.element_children(ul).next().unwrap();
        let text = doc.children(li)[0];
        assert_eq!(doc.add_class(text, "x"), Err(DocumentError::NotAnElement(text)));
        assert_eq!(
            doc.append(text, Markup::element("b")),
            Err(DocumentError::NotAnElement(text))
        );
    }
}
