// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned markup fragments used to build and splice document subtrees.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::NodeFlags;

/// An owned, detached piece of markup: an element with children, or a text run.
///
/// Markup is inserted with [`Document::append`](crate::Document::append) or
/// [`Document::replace_children`](crate::Document::replace_children).
///
/// ```
/// use graft_document::Markup;
///
/// let row = Markup::element("li")
///     .attr("data-text", "BRCA1")
///     .child(Markup::element("a").attr("href", "/genes/BRCA1").text("BRCA1"));
/// assert_eq!(row.tag_name(), Some("li"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Markup {
    /// An element node.
    Element(ElementMarkup),
    /// A text node.
    Text(String),
}

/// The element half of [`Markup`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementMarkup {
    pub(crate) tag: String,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) flags: NodeFlags,
    pub(crate) children: Vec<Markup>,
}

impl Markup {
    /// Starts an element with the given tag name.
    #[must_use]
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element(ElementMarkup {
            tag: tag.into(),
            ..ElementMarkup::default()
        })
    }

    /// A detached text run.
    #[must_use]
    pub fn text_node(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Returns the tag name for elements.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::Element(e) => Some(&e.tag),
            Self::Text(_) => None,
        }
    }

    /// Adds one or more whitespace-separated classes.
    #[must_use]
    pub fn class(self, classes: &str) -> Self {
        self.map_element(|e| {
            for class in classes.split_ascii_whitespace() {
                if !e.classes.iter().any(|c| c == class) {
                    e.classes.push(class.into());
                }
            }
        })
    }

    /// Sets an attribute, replacing any previous value.
    #[must_use]
    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name: String = name.into();
        let value: String = value.into();
        self.map_element(move |e| {
            if let Some(slot) = e.attrs.iter_mut().find(|(k, _)| *k == name) {
                slot.1 = value;
            } else {
                e.attrs.push((name, value));
            }
        })
    }

    /// Shorthand for the `id` attribute.
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Shorthand for the `value` attribute of form inputs.
    #[must_use]
    pub fn value(self, value: impl Into<String>) -> Self {
        self.attr("value", value)
    }

    /// Marks the element hidden.
    #[must_use]
    pub fn hidden(self, hidden: bool) -> Self {
        self.map_element(|e| e.flags.set(NodeFlags::HIDDEN, hidden))
    }

    /// Marks a checkable element checked.
    #[must_use]
    pub fn checked(self, checked: bool) -> Self {
        self.map_element(|e| e.flags.set(NodeFlags::CHECKED, checked))
    }

    /// Appends a child.
    #[must_use]
    pub fn child(self, child: Self) -> Self {
        self.map_element(|e| e.children.push(child))
    }

    /// Appends several children.
    #[must_use]
    pub fn children(self, children: impl IntoIterator<Item = Self>) -> Self {
        self.map_element(|e| e.children.extend(children))
    }

    /// Appends a text child.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Self::Text(text.into()))
    }

    fn map_element(mut self, f: impl FnOnce(&mut ElementMarkup)) -> Self {
        if let Self::Element(e) = &mut self {
            f(e);
        }
        self
    }
}
