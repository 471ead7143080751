// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scaffolding for the Graft demos.
//!
//! Run:
//! - `cargo run -p graft_demos --example gene_page`
//! - `cargo run -p graft_demos --example splice_results`
//!
//! Set `RUST_LOG=graft_runtime=debug` to watch behaviors start and route events.

use graft_document::{Document, Markup, NodeId, Selector};
use tracing_subscriber::EnvFilter;

/// Installs a compact stderr subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .init();
}

/// One gene in the demo data set.
#[derive(Copy, Clone, Debug)]
pub struct Gene {
    /// Symbol.
    pub name: &'static str,
    /// Known variant count.
    pub variants: u32,
    /// `gene` or `pseudogene`.
    pub kind: &'static str,
}

/// The demo data set.
pub const GENES: [Gene; 5] = [
    Gene { name: "TP53", variants: 5, kind: "gene" },
    Gene { name: "BRCA2", variants: 10, kind: "gene" },
    Gene { name: "PTENP1", variants: 1, kind: "pseudogene" },
    Gene { name: "BRCA1", variants: 10, kind: "gene" },
    Gene { name: "BRAF", variants: 7, kind: "gene" },
];

/// A searchable, type-filtered gene index.
pub fn gene_index(genes: &[Gene]) -> Markup {
    Markup::element("section")
        .attr("data-module", "type-filter")
        .children([
            Markup::element("input")
                .attr("data-filter-type", "gene")
                .checked(true),
            Markup::element("input")
                .attr("data-filter-type", "pseudogene")
                .checked(true),
        ])
        .child(
            Markup::element("div")
                .attr("data-module", "filterable-list")
                .child(
                    Markup::element("form")
                        .attr("action", "/search")
                        .child(Markup::element("input").class("js-filter-list-input")),
                )
                .child(
                    Markup::element("span")
                        .class("js-filter-list-count")
                        .attr("data-singular", "gene")
                        .attr("data-plural", "genes"),
                )
                .child(Markup::element("ul").children(genes.iter().map(|g| {
                    Markup::element("li")
                        .attr("data-text", g.name)
                        .attr("data-type", g.kind)
                        .child(
                            Markup::element("a")
                                .attr("href", format!("/genes/{}", g.name))
                                .text(g.name),
                        )
                }))),
        )
}

/// A sortable variant table.
pub fn variant_table(genes: &[Gene]) -> Markup {
    let header = |key: &str, label: &str, numeric: bool| {
        let th = Markup::element("th")
            .attr("data-sort-key", key)
            .child(Markup::element("a").class("js-sortable-header").text(label));
        if numeric {
            th.attr("data-sort-type", "number")
        } else {
            th
        }
    };
    Markup::element("table")
        .attr("data-module", "sortable-table")
        .attr("data-default-key", "name")
        .child(Markup::element("thead").child(Markup::element("tr").children([
            header("name", "Gene", false),
            header("variants", "Variants", true),
        ])))
        .child(Markup::element("tbody").children(genes.iter().map(|g| {
            Markup::element("tr")
                .attr("data-name", g.name)
                .attr("data-variants", g.variants.to_string())
                .children([
                    Markup::element("td").text(g.name),
                    Markup::element("td").text(g.variants.to_string()),
                ])
        })))
}

/// A gene page: tabs for the index and the table, plus a footer whose links
/// carry the selected tab.
pub fn gene_page() -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    let tab = |id: &str, label: &str| {
        Markup::element("li").child(
            Markup::element("a")
                .attr("href", format!("#{id}"))
                .attr("data-toggle", "tab")
                .text(label),
        )
    };
    let tabs = Markup::element("div")
        .attr("data-module", "tab-switcher")
        .attr("data-default-tab", "index")
        .child(Markup::element("ul").children([tab("index", "Index"), tab("variants", "Variants")]))
        .child(Markup::element("div").id("index").child(gene_index(&GENES)))
        .child(
            Markup::element("div")
                .id("variants")
                .child(Markup::element("div").id("variant-results").child(variant_table(&GENES))),
        );
    let footer = Markup::element("footer")
        .attr("data-module", "fragment-links")
        .children([
            Markup::element("a").attr("href", "/genes?page=1").text("Previous"),
            Markup::element("a").attr("href", "/genes?page=3").text("Next"),
        ]);
    for section in [tabs, footer] {
        if let Err(err) = doc.append(root, section) {
            tracing::error!(%err, "cannot build demo page");
        }
    }
    doc
}

/// First element under the root matching `selector`.
pub fn find(doc: &Document, selector: &Selector) -> Option<NodeId> {
    doc.query(doc.root(), selector)
}

/// The visible `li` rows, by `data-text`.
pub fn visible_items(doc: &Document) -> Vec<&str> {
    doc.query_all(doc.root(), &Selector::tag("li").with_attr("data-text"))
        .into_iter()
        .filter(|&li| doc.is_rendered(li))
        .filter_map(|li| doc.attr(li, "data-text"))
        .collect()
}

/// `data-name` of every row in the first table body, in order.
pub fn table_order(doc: &Document) -> Vec<&str> {
    let Some(body) = find(doc, &Selector::tag("tbody")) else {
        return Vec::new();
    };
    doc.element_children(body)
        .filter_map(|tr| doc.attr(tr, "data-name"))
        .collect()
}
