// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graft Runtime: attaches named behaviors to a server-rendered document.
//!
//! ## Overview
//!
//! Pages mark containers with a behavior attribute (`data-module` by default)
//! naming the behavior that enhances them. The [`Runtime`] discovers those
//! containers in document order, creates one behavior per container from the
//! [`Registry`], and routes host events to whichever behaviors subscribed.
//!
//! ## Workflow
//!
//! 1) Build a [`Registry`], usually [`Registry::builtin`] plus any custom
//!    behaviors registered through [`RegistryBuilder::register`].
//! 2) Wrap a [`Document`](graft_document::Document) and a [`Host`] in a
//!    [`Runtime`] and call [`Runtime::start_app`].
//! 3) Feed user input through [`Runtime::click`], [`Runtime::type_text`],
//!    [`Runtime::set_checked`], [`Runtime::submit`] and
//!    [`Runtime::hash_changed`].
//! 4) After replacing part of the page, signal it with
//!    [`Runtime::on_content_changed`] (or let [`Runtime::splice_fragments`] do
//!    both). Behaviors under removed nodes are dropped and the new subtree is
//!    started.
//!
//! ## Built-in behaviors
//!
//! See [`behaviors`] for the catalog and the markup each one expects.
//!
//! ## Example
//!
//! ```
//! use graft_document::{Document, Markup};
//! use graft_runtime::{MemoryHost, Registry, Runtime};
//!
//! let mut doc = Document::new();
//! let list = Markup::element("div")
//!     .attr("data-module", "filterable-list")
//!     .child(Markup::element("input").class("js-filter-list-input"))
//!     .child(Markup::element("span").class("js-filter-list-count"))
//!     .child(
//!         Markup::element("ul").children([
//!             Markup::element("li").attr("data-text", "BRCA1"),
//!             Markup::element("li").attr("data-text", "BRCA2"),
//!             Markup::element("li").attr("data-text", "TP53"),
//!         ]),
//!     );
//! let root = doc.root();
//! doc.append(root, list).unwrap();
//!
//! let mut runtime = Runtime::new(doc, MemoryHost::new(), Registry::builtin());
//! assert_eq!(runtime.start_app().started, 1);
//!
//! let doc = runtime.document();
//! let input = doc.query(doc.root(), &graft_document::Selector::class("js-filter-list-input")).unwrap();
//! runtime.type_text(input, "brca");
//!
//! let doc = runtime.document();
//! let count = doc.query(doc.root(), &graft_document::Selector::class("js-filter-list-count")).unwrap();
//! assert_eq!(doc.text_content(count), "2 results");
//! ```

mod behavior;
pub mod behaviors;
mod config;
mod host;
mod registry;
mod runtime;

pub use behavior::{Behavior, Context, InstanceId};
pub use config::RuntimeConfig;
pub use host::{Host, MemoryHost};
pub use registry::{Factory, Registry, RegistryBuilder, RegistryError};
pub use runtime::{ContentChanged, Runtime, StartSummary};
