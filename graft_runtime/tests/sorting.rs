// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sortable tables driven through header clicks.

use graft_document::{Document, Markup, NodeId, Selector};
use graft_runtime::{MemoryHost, Registry, Runtime};

fn header(key: &str, label: &str) -> Markup {
    Markup::element("th")
        .attr("data-sort-key", key)
        .child(
            Markup::element("a")
                .class("js-sortable-header")
                .attr("href", "#")
                .child(Markup::element("span").text(label)),
        )
}

fn row(name: &str, count: &str) -> Markup {
    Markup::element("tr")
        .attr("data-name", name)
        .attr("data-count", count)
        .children([
            Markup::element("td").text(name),
            Markup::element("td").text(count),
        ])
}

fn page() -> Runtime<MemoryHost> {
    let mut doc = Document::new();
    let root = doc.root();
    doc.append(
        root,
        Markup::element("table")
            .id("genes")
            .attr("data-module", "sortable-table")
            .attr("data-default-key", "name")
            .child(
                Markup::element("thead").child(Markup::element("tr").children([
                    header("name", "Gene").class("sorted-column sorted-desc"),
                    header("count", "Variants").attr("data-sort-type", "number"),
                    Markup::element("th")
                        .class("notes")
                        .child(Markup::element("a").class("js-sortable-header").text("Notes")),
                ])),
            )
            .child(Markup::element("tbody").children([
                row("TP53", "5"),
                row("BRCA2", "10"),
                row("NOVEL", "n/a"),
                row("BRCA1", "10"),
            ])),
    )
    .unwrap();
    let mut runtime = Runtime::new(doc, MemoryHost::new(), Registry::builtin());
    runtime.start_app();
    runtime
}

fn order(rt: &Runtime<MemoryHost>) -> Vec<&str> {
    let doc = rt.document();
    let body = doc.query(doc.root(), &Selector::tag("tbody")).unwrap();
    doc.element_children(body)
        .filter_map(|tr| doc.attr(tr, "data-name"))
        .collect()
}

fn th(rt: &Runtime<MemoryHost>, key: &str) -> NodeId {
    let doc = rt.document();
    doc.query(doc.root(), &Selector::tag("th").with_attr_eq("data-sort-key", key.to_owned()))
        .unwrap()
}

/// The label span inside a header, the innermost thing a user clicks.
fn label(rt: &Runtime<MemoryHost>, key: &str) -> NodeId {
    let doc = rt.document();
    doc.query(th(rt, key), &Selector::tag("span")).unwrap()
}

fn classes(rt: &Runtime<MemoryHost>, node: NodeId) -> Vec<&str> {
    let mut classes: Vec<_> = rt.document().classes(node).collect();
    classes.sort_unstable();
    classes
}

#[test]
fn numeric_columns_start_descending_with_tie_break() {
    let mut rt = page();
    assert_eq!(order(&rt), ["TP53", "BRCA2", "NOVEL", "BRCA1"], "nothing sorts at start");

    rt.click(label(&rt, "count"));
    assert_eq!(order(&rt), ["BRCA1", "BRCA2", "TP53", "NOVEL"]);
    assert_eq!(classes(&rt, th(&rt, "count")), ["sorted-column", "sorted-desc"]);
    assert!(classes(&rt, th(&rt, "name")).is_empty(), "old markers are cleared");
}

#[test]
fn second_click_reverses() {
    let mut rt = page();
    let target = label(&rt, "count");
    rt.click(target);
    rt.click(target);
    assert_eq!(order(&rt), ["NOVEL", "TP53", "BRCA2", "BRCA1"]);
    assert_eq!(classes(&rt, th(&rt, "count")), ["sorted-asc", "sorted-column"]);

    rt.click(target);
    assert_eq!(order(&rt), ["BRCA1", "BRCA2", "TP53", "NOVEL"]);
}

#[test]
fn server_markers_seed_the_initial_direction() {
    let mut rt = page();
    // The name column was rendered sorted descending, so it flips to ascending.
    rt.click(label(&rt, "name"));
    assert_eq!(order(&rt), ["BRCA1", "BRCA2", "NOVEL", "TP53"]);
    assert_eq!(classes(&rt, th(&rt, "name")), ["sorted-asc", "sorted-column"]);
}

#[test]
fn switching_columns_starts_fresh() {
    let mut rt = page();
    rt.click(label(&rt, "name"));
    rt.click(label(&rt, "count"));
    rt.click(label(&rt, "name"));
    assert_eq!(order(&rt), ["TP53", "NOVEL", "BRCA2", "BRCA1"]);
    assert_eq!(classes(&rt, th(&rt, "name")), ["sorted-column", "sorted-desc"]);
    assert!(classes(&rt, th(&rt, "count")).is_empty());
}

#[test]
fn headers_without_a_key_do_nothing() {
    let mut rt = page();
    let notes = {
        let doc = rt.document();
        doc.query(doc.root(), &Selector::class("notes")).unwrap()
    };
    let link = rt
        .document()
        .query(notes, &Selector::class("js-sortable-header"))
        .unwrap();
    rt.click(link);
    assert_eq!(order(&rt), ["TP53", "BRCA2", "NOVEL", "BRCA1"]);
    assert_eq!(classes(&rt, notes), ["notes"]);
}

#[test]
fn clicks_outside_headers_are_ignored() {
    let mut rt = page();
    let cell = {
        let doc = rt.document();
        doc.query(doc.root(), &Selector::tag("td")).unwrap()
    };
    rt.click(cell);
    assert_eq!(order(&rt), ["TP53", "BRCA2", "NOVEL", "BRCA1"]);
}

#[test]
fn replaced_table_contents_sort_with_fresh_columns() {
    let mut rt = page();
    rt.click(label(&rt, "count"));
    let listeners = rt.listener_count();

    let replaced = rt.splice_fragments([(
        "genes",
        vec![
            Markup::element("thead").child(Markup::element("tr").children([
                header("name", "Gene"),
                header("count", "Variants")
                    .attr("data-sort-type", "number")
                    .class("sorted-column sorted-desc"),
            ])),
            Markup::element("tbody").children([
                row("KRAS", "12"),
                row("APOE", "3"),
                row("EGFR", "7"),
            ]),
        ],
    )]);
    assert_eq!(replaced, 1);
    assert_eq!(rt.instance_count(), 1);
    assert_eq!(rt.listener_count(), listeners);

    // The new markup says descending, so the first click ascends.
    rt.click(label(&rt, "count"));
    assert_eq!(order(&rt), ["APOE", "EGFR", "KRAS"]);
    assert_eq!(classes(&rt, th(&rt, "count")), ["sorted-asc", "sorted-column"]);

    rt.click(label(&rt, "name"));
    assert_eq!(order(&rt), ["KRAS", "EGFR", "APOE"]);
    assert!(classes(&rt, th(&rt, "count")).is_empty());
}
