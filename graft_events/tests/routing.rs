// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing through a realistic page: two containers, delegated clicks and a
//! window-level hash listener.

use graft_document::{Document, Markup, NodeId, Selector};
use graft_events::{
    Event, EventKind, EventTarget, Listener, ListenerTag, Listeners, Outcome, Phase, dispatcher,
};

const HEADER: ListenerTag = ListenerTag(1);
const TAB: ListenerTag = ListenerTag(2);
const HASH: ListenerTag = ListenerTag(3);

struct Page {
    doc: Document,
    table: NodeId,
    tabs: NodeId,
}

fn page() -> Page {
    let mut doc = Document::new();
    let table = doc
        .append(
            doc.root(),
            Markup::element("div")
                .attr("data-module", "sortable-table")
                .child(
                    Markup::element("table").child(
                        Markup::element("thead").child(
                            Markup::element("tr").children([
                                Markup::element("th")
                                    .attr("data-sort-key", "name")
                                    .child(Markup::element("a").class("js-sortable-header").text("Name")),
                                Markup::element("th")
                                    .attr("data-sort-key", "score")
                                    .child(Markup::element("a").class("js-sortable-header").text("Score")),
                            ]),
                        ),
                    ),
                ),
        )
        .unwrap();
    let tabs = doc
        .append(
            doc.root(),
            Markup::element("div").attr("data-module", "tab-switcher").child(
                Markup::element("ul").children([
                    Markup::element("li").child(
                        Markup::element("a")
                            .attr("href", "#summary")
                            .attr("data-toggle", "tab")
                            .text("Summary"),
                    ),
                    Markup::element("li").child(
                        Markup::element("a")
                            .attr("href", "#reviews")
                            .attr("data-toggle", "tab")
                            .text("Reviews"),
                    ),
                ]),
            ),
        )
        .unwrap();
    Page { doc, table, tabs }
}

fn listeners(p: &Page) -> Listeners<u32> {
    let mut ls = Listeners::new();
    ls.add(Listener::delegated(
        10,
        p.table,
        EventKind::Click,
        Selector::class("js-sortable-header"),
        HEADER,
    ));
    ls.add(Listener::delegated(
        20,
        p.tabs,
        EventKind::Click,
        Selector::tag("a").with_attr_eq("data-toggle", "tab"),
        TAB,
    ));
    ls.add(Listener::window(20, EventKind::HashChange, HASH));
    ls
}

#[test]
fn clicks_reach_only_the_enclosing_container() {
    let p = page();
    let ls = listeners(&p);
    let header = p
        .doc
        .query_all(p.table, &Selector::class("js-sortable-header"))[1];

    let seq = ls.route(&p.doc, EventTarget::Node(header), EventKind::Click);
    assert_eq!(seq.len(), 1);
    assert_eq!(seq[0].owner, 10);
    assert_eq!(seq[0].tag, HEADER);
    assert_eq!(seq[0].current, EventTarget::Node(header));
    assert_eq!(seq[0].phase, Phase::Bubble);
    assert_eq!(
        p.doc.attr(p.doc.parent(header).unwrap(), "data-sort-key"),
        Some("score")
    );
}

#[test]
fn clicks_outside_delegates_are_not_routed() {
    let p = page();
    let ls = listeners(&p);
    let ul = p.doc.query(p.tabs, &Selector::tag("ul")).unwrap();
    assert!(ls.route(&p.doc, EventTarget::Node(ul), EventKind::Click).is_empty());
}

#[test]
fn hash_changes_go_to_window_listeners() {
    let p = page();
    let ls = listeners(&p);
    let seq = ls.route(&p.doc, EventTarget::Window, EventKind::HashChange);
    assert_eq!(seq.len(), 1);
    assert_eq!(seq[0].tag, HASH);
    assert_eq!(seq[0].phase, Phase::Target);
}

#[test]
fn handlers_can_prevent_default_and_stop() {
    let p = page();
    let mut ls = listeners(&p);
    ls.add(Listener::on(30, p.doc.root(), EventKind::Click, TAB));
    let link = p
        .doc
        .query(p.tabs, &Selector::tag("a").with_attr_eq("href", "#reviews"))
        .unwrap();

    let seq = ls.route(&p.doc, EventTarget::Node(link), EventKind::Click);
    assert_eq!(seq.iter().map(|d| d.owner).collect::<Vec<_>>(), [20, 30]);

    let mut ev = Event::new(EventKind::Click, EventTarget::Node(link));
    let mut seen = Vec::new();
    let stopped = dispatcher::run(&seq, &mut ev, |d, e| {
        seen.push(d.owner);
        e.prevent_default();
        Outcome::Stop
    });
    assert!(stopped);
    assert!(ev.is_default_prevented());
    assert_eq!(seen, [20]);
}

#[test]
fn replacing_a_container_drops_its_listeners() {
    let mut p = page();
    let mut ls = listeners(&p);
    let root = p.doc.root();
    p.doc.remove(p.table).unwrap();
    assert_eq!(ls.prune_dead(&p.doc), 1);
    assert_eq!(ls.len(), 2);
    assert!(ls.iter().all(|l| l.owner == 20));
    assert!(p.doc.is_alive(root));
}
