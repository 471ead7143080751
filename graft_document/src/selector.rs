// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-element selector predicates.
//!
//! Selectors are compound predicates over one element: an optional tag name,
//! a set of required classes and a list of attribute tests. There are no
//! combinators; structural queries (descendants, ancestors) are expressed by
//! the traversal methods on [`Document`](crate::Document) instead.
//!
//! ```
//! use graft_document::Selector;
//!
//! // Equivalent to `a.js-open-on-submit[href]`.
//! let links = Selector::tag("a").with_class("js-open-on-submit").with_attr("href");
//! assert_eq!(links.tag_name(), Some("a"));
//! ```

use alloc::borrow::Cow;
use smallvec::SmallVec;

/// Name or value used inside a selector.
type Text = Cow<'static, str>;

/// An attribute test inside a [`Selector`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrMatch {
    /// `[name]`: the attribute is present with any value.
    Present(Text),
    /// `[name=value]`: the attribute is present and equal to `value`.
    Equals(Text, Text),
    /// `[name!=value]`: the attribute is absent or differs from `value`.
    NotEquals(Text, Text),
}

impl AttrMatch {
    fn matches<'a>(&self, lookup: impl Fn(&str) -> Option<&'a str>) -> bool {
        match self {
            Self::Present(name) => lookup(name.as_ref()).is_some(),
            Self::Equals(name, value) => lookup(name.as_ref()) == Some(value.as_ref()),
            Self::NotEquals(name, value) => lookup(name.as_ref()) != Some(value.as_ref()),
        }
    }
}

/// A compound predicate over a single element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<Text>,
    classes: SmallVec<[Text; 2]>,
    attrs: SmallVec<[AttrMatch; 2]>,
}

impl Selector {
    /// A selector matching every element.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// A selector matching elements with the given tag name.
    #[must_use]
    pub fn tag(tag: impl Into<Text>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    /// A selector matching elements carrying the given class.
    #[must_use]
    pub fn class(class: impl Into<Text>) -> Self {
        Self::any().with_class(class)
    }

    /// Adds a required class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<Text>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Requires the attribute to be present.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<Text>) -> Self {
        self.attrs.push(AttrMatch::Present(name.into()));
        self
    }

    /// Requires the attribute to equal `value`.
    #[must_use]
    pub fn with_attr_eq(mut self, name: impl Into<Text>, value: impl Into<Text>) -> Self {
        self.attrs.push(AttrMatch::Equals(name.into(), value.into()));
        self
    }

    /// Requires the attribute to be absent or differ from `value`.
    #[must_use]
    pub fn with_attr_ne(mut self, name: impl Into<Text>, value: impl Into<Text>) -> Self {
        self.attrs.push(AttrMatch::NotEquals(name.into(), value.into()));
        self
    }

    /// Returns the required tag name, if any.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns `true` if an element with this tag, these classes and this
    /// attribute lookup satisfies the selector.
    ///
    /// Tag names compare ASCII case-insensitively; classes and attribute
    /// values compare exactly.
    pub fn matches<'a>(
        &self,
        tag: &str,
        has_class: impl Fn(&str) -> bool,
        attr: impl Fn(&str) -> Option<&'a str>,
    ) -> bool {
        if let Some(required) = &self.tag
            && !required.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        self.classes.iter().all(|c| has_class(c.as_ref()))
            && self.attrs.iter().all(|a| a.matches(&attr))
    }
}
