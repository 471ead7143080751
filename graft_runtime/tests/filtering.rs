// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filterable lists and tables, their counters, submit navigation and the
//! type filter.

use graft_document::{Document, Markup, NodeId, Selector};
use graft_runtime::{MemoryHost, Registry, Runtime};

fn runtime(doc: Document) -> Runtime<MemoryHost> {
    let mut runtime = Runtime::new(doc, MemoryHost::new(), Registry::builtin());
    runtime.start_app();
    runtime
}

fn find(runtime: &Runtime<MemoryHost>, selector: &Selector) -> NodeId {
    let doc = runtime.document();
    doc.query(doc.root(), selector).unwrap()
}

fn text_of(runtime: &Runtime<MemoryHost>, class: &'static str) -> String {
    runtime
        .document()
        .text_content(find(runtime, &Selector::class(class)))
}

/// Visible `data-text` (or text) of every `li`, in document order.
fn visible_items(runtime: &Runtime<MemoryHost>) -> Vec<String> {
    let doc = runtime.document();
    doc.query_all(doc.root(), &Selector::tag("li"))
        .into_iter()
        .filter(|&li| doc.is_rendered(li))
        .map(|li| {
            doc.attr(li, "data-text")
                .map_or_else(|| doc.text_content(li), str::to_owned)
        })
        .collect()
}

fn gene_item(name: &str) -> Markup {
    Markup::element("li")
        .attr("data-text", name)
        .child(Markup::element("a").attr("href", format!("/genes/{name}")).text(name))
}

fn gene_list_page() -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    doc.append(
        root,
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
            .child(Markup::element("ul").children([
                gene_item("BRCA1"),
                gene_item("BRCA2"),
                gene_item("TP53"),
                gene_item("ABRCA"),
                gene_item("HIDDEN").attr("data-filtered", "true").hidden(true),
            ])),
    )
    .unwrap();
    doc
}

#[test]
fn list_filters_by_prefix_ignoring_case() {
    let mut rt = runtime(gene_list_page());
    assert_eq!(text_of(&rt, "js-filter-list-count"), "4 genes");

    let input = find(&rt, &Selector::class("js-filter-list-input"));
    rt.type_text(input, "brca");
    assert_eq!(visible_items(&rt), ["BRCA1", "BRCA2"]);
    assert_eq!(text_of(&rt, "js-filter-list-count"), "2 genes");

    rt.type_text(input, "  Tp5 ");
    assert_eq!(visible_items(&rt), ["TP53"]);
    assert_eq!(text_of(&rt, "js-filter-list-count"), "1 gene");

    rt.type_text(input, "");
    assert_eq!(visible_items(&rt), ["BRCA1", "BRCA2", "TP53", "ABRCA"]);
}

#[test]
fn metacharacters_are_literal() {
    let mut rt = runtime(gene_list_page());
    let input = find(&rt, &Selector::class("js-filter-list-input"));
    rt.type_text(input, "(");
    assert!(visible_items(&rt).is_empty());
    assert_eq!(text_of(&rt, "js-filter-list-count"), "0 genes");

    rt.type_text(input, "brca.");
    assert!(visible_items(&rt).is_empty(), "`.` is not a wildcard");
}

#[test]
fn excluded_rows_stay_hidden_and_uncounted() {
    let mut rt = runtime(gene_list_page());
    let input = find(&rt, &Selector::class("js-filter-list-input"));
    rt.type_text(input, "hid");
    assert!(visible_items(&rt).is_empty());
    assert_eq!(text_of(&rt, "js-filter-list-count"), "0 genes");
}

#[test]
fn change_events_refilter_too() {
    let mut rt = runtime(gene_list_page());
    let input = find(&rt, &Selector::class("js-filter-list-input"));
    rt.document_mut().set_value(input, "tp").unwrap();
    rt.change(input);
    assert_eq!(visible_items(&rt), ["TP53"]);
}

#[test]
fn submitting_opens_the_first_visible_link() {
    let mut rt = runtime(gene_list_page());
    let input = find(&rt, &Selector::class("js-filter-list-input"));
    let form = find(&rt, &Selector::tag("form"));

    rt.type_text(input, "brca");
    assert!(rt.submit(form), "native submission is suppressed");
    assert_eq!(rt.host().navigations(), ["/genes/BRCA1"]);

    rt.type_text(input, "zzz");
    assert!(rt.submit(form));
    assert_eq!(rt.host().navigations().len(), 1, "nothing visible, nothing opened");
}

#[test]
fn replacing_the_list_contents_rewires_submit() {
    let mut doc = gene_list_page();
    let module = doc
        .query(doc.root(), &Selector::any().with_attr_eq("data-module", "filterable-list"))
        .unwrap();
    doc.set_attr(module, "id", "gene-list").unwrap();
    let mut rt = runtime(doc);
    let listeners = rt.listener_count();

    let replaced = rt.splice_fragments([(
        "gene-list",
        vec![
            Markup::element("form")
                .attr("action", "/search")
                .child(Markup::element("input").class("js-filter-list-input")),
            Markup::element("span")
                .class("js-filter-list-count")
                .attr("data-singular", "gene")
                .attr("data-plural", "genes"),
            Markup::element("ul").children([
                gene_item("APOE"),
                gene_item("APP"),
                gene_item("PSEN1"),
            ]),
        ],
    )]);
    assert_eq!(replaced, 1);
    assert_eq!(rt.listener_count(), listeners, "the new form is listened to instead");
    assert_eq!(text_of(&rt, "js-filter-list-count"), "3 genes");

    let input = find(&rt, &Selector::class("js-filter-list-input"));
    rt.type_text(input, "ap");
    assert_eq!(visible_items(&rt), ["APOE", "APP"]);
    assert_eq!(text_of(&rt, "js-filter-list-count"), "2 genes");

    let form = find(&rt, &Selector::tag("form"));
    assert!(rt.submit(form));
    assert_eq!(rt.host().navigations(), ["/genes/APOE"]);
}

fn variant_table(open_on_submit: bool) -> Document {
    let row = |gene: &str, effect: &str| {
        let link = Markup::element("a")
            .attr("href", format!("/variants/{gene}"))
            .text(gene);
        let link = if open_on_submit {
            link.class("js-open-on-submit")
        } else {
            link
        };
        Markup::element("tr").children([
            Markup::element("td").child(link),
            Markup::element("td").text(effect),
        ])
    };
    let mut doc = Document::new();
    let root = doc.root();
    doc.append(
        root,
        Markup::element("div")
            .attr("data-module", "filterable-table")
            .child(
                Markup::element("form")
                    .child(Markup::element("input").class("js-filter-table-input")),
            )
            .child(
                Markup::element("table")
                    .child(
                        Markup::element("thead").child(
                            Markup::element("tr")
                                .children([Markup::element("th").text("Gene")]),
                        ),
                    )
                    .child(Markup::element("tbody").children([
                        row("BRCA1", "missense"),
                        row("BRCA2", "nonsense"),
                        row("TP53", "missense"),
                    ])),
            ),
    )
    .unwrap();
    doc
}

fn visible_body_rows(rt: &Runtime<MemoryHost>) -> usize {
    let doc = rt.document();
    let body = doc.query(doc.root(), &Selector::tag("tbody")).unwrap();
    doc.element_children(body)
        .filter(|&tr| doc.is_rendered(tr))
        .count()
}

#[test]
fn table_filters_by_substring_without_a_counter() {
    let mut rt = runtime(variant_table(true));
    let input = find(&rt, &Selector::class("js-filter-table-input"));

    rt.type_text(input, "RCA");
    assert_eq!(visible_body_rows(&rt), 2);

    rt.type_text(input, "sense");
    assert_eq!(visible_body_rows(&rt), 3, "matches anywhere in the row text");

    rt.type_text(input, "nonsense");
    assert_eq!(visible_body_rows(&rt), 1);

    let head_row = find(&rt, &Selector::tag("thead"));
    assert!(rt.document().is_rendered(head_row), "header rows are not filtered");
}

#[test]
fn table_counter_is_updated_when_present() {
    let mut doc = variant_table(false);
    let module = doc.query(doc.root(), &Selector::tag("div")).unwrap();
    doc.append(
        module,
        Markup::element("p").class("js-filter-table-count"),
    )
    .unwrap();
    let mut rt = runtime(doc);
    assert_eq!(text_of(&rt, "js-filter-table-count"), "3 results");

    let input = find(&rt, &Selector::class("js-filter-table-input"));
    rt.type_text(input, "missense");
    assert_eq!(text_of(&rt, "js-filter-table-count"), "2 results");
}

#[test]
fn table_rows_filtered_elsewhere_stay_hidden() {
    let mut doc = variant_table(true);
    let module = doc.query(doc.root(), &Selector::tag("div")).unwrap();
    doc.append(module, Markup::element("p").class("js-filter-table-count"))
        .unwrap();
    let body = doc.query(doc.root(), &Selector::tag("tbody")).unwrap();
    let withdrawn = doc
        .append(
            body,
            Markup::element("tr")
                .attr("data-filtered", "true")
                .hidden(true)
                .child(
                    Markup::element("td").child(
                        Markup::element("a")
                            .class("js-open-on-submit")
                            .attr("href", "/variants/BRCA3")
                            .text("BRCA3"),
                    ),
                ),
        )
        .unwrap();
    let mut rt = runtime(doc);
    assert_eq!(text_of(&rt, "js-filter-table-count"), "3 results");
    assert!(!rt.document().is_rendered(withdrawn));

    let input = find(&rt, &Selector::class("js-filter-table-input"));
    rt.type_text(input, "BRCA");
    assert_eq!(visible_body_rows(&rt), 2);
    assert!(!rt.document().is_rendered(withdrawn));
    assert_eq!(text_of(&rt, "js-filter-table-count"), "2 results");

    rt.type_text(input, "brca3");
    assert_eq!(visible_body_rows(&rt), 0);
    let form = find(&rt, &Selector::tag("form"));
    assert!(rt.submit(form));
    assert!(rt.host().navigations().is_empty(), "hidden rows are never opened");
}

#[test]
fn table_submit_opens_marked_links_only() {
    let mut rt = runtime(variant_table(true));
    let input = find(&rt, &Selector::class("js-filter-table-input"));
    let form = find(&rt, &Selector::tag("form"));
    rt.type_text(input, "tp53");
    assert!(rt.submit(form));
    assert_eq!(rt.host().last_navigation(), Some("/variants/TP53"));

    let mut rt = runtime(variant_table(false));
    let form = find(&rt, &Selector::tag("form"));
    assert!(!rt.submit(form), "without marked links the form submits normally");
    assert!(rt.host().navigations().is_empty());
}

fn typed_list_page() -> Document {
    let item = |kind: &str, name: &str| gene_item(name).attr("data-type", kind);
    let mut doc = Document::new();
    let root = doc.root();
    doc.append(
        root,
        Markup::element("div")
            .attr("data-module", "type-filter")
            .children([
                Markup::element("input")
                    .id("show-genes")
                    .attr("data-filter-type", "gene")
                    .checked(true),
                Markup::element("input")
                    .id("show-proteins")
                    .attr("data-filter-type", "protein")
                    .checked(true),
            ])
            .child(
                Markup::element("div")
                    .attr("data-module", "filterable-list")
                    .child(Markup::element("input").class("js-filter-list-input"))
                    .child(
                        Markup::element("span")
                            .class("js-filter-list-count")
                            .attr("data-singular", "match")
                            .attr("data-plural", "matches"),
                    )
                    .child(Markup::element("ul").children([
                        item("gene", "BRCA1"),
                        item("gene", "BRCA2"),
                        item("protein", "BRCA1-P"),
                        item("protein", "P53"),
                    ])),
            ),
    )
    .unwrap();
    doc
}

#[test]
fn type_filter_hides_unchecked_types() {
    let mut rt = runtime(typed_list_page());
    let doc = rt.document();
    let marked = doc
        .query_all(doc.root(), &Selector::tag("li").with_attr_eq("data-filtered", "false"))
        .len();
    assert_eq!(marked, 4, "rows start unfiltered");

    let proteins = rt.document().element_by_id("show-proteins").unwrap();
    rt.set_checked(proteins, false);
    assert_eq!(visible_items(&rt), ["BRCA1", "BRCA2"]);
    assert_eq!(text_of(&rt, "js-filter-list-count"), "2 matches");

    rt.set_checked(proteins, true);
    assert_eq!(visible_items(&rt).len(), 4);
    assert_eq!(text_of(&rt, "js-filter-list-count"), "4 matches");
}

#[test]
fn text_filter_respects_type_filter() {
    let mut rt = runtime(typed_list_page());
    let proteins = rt.document().element_by_id("show-proteins").unwrap();
    rt.set_checked(proteins, false);

    let input = find(&rt, &Selector::class("js-filter-list-input"));
    rt.type_text(input, "brca1");
    assert_eq!(visible_items(&rt), ["BRCA1"], "filtered-out types stay hidden");
    assert_eq!(text_of(&rt, "js-filter-list-count"), "1 match");

    rt.set_checked(proteins, true);
    rt.key_up(input);
    assert_eq!(visible_items(&rt), ["BRCA1", "BRCA1-P"]);
    assert_eq!(text_of(&rt, "js-filter-list-count"), "2 matches");
}
