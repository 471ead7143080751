// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A gene page enhanced by the built-in behaviors.
//!
//! Filters the index, toggles a type, sorts the variant table, switches tabs
//! and follows a deep link, printing the page state after each step.
//!
//! Run:
//! - `cargo run -p graft_demos --example gene_page`

use graft_demos::{find, gene_page, init_logging, table_order, visible_items};
use graft_document::Selector;
use graft_runtime::{MemoryHost, Registry, Runtime};

fn main() {
    init_logging();

    let mut rt = Runtime::new(gene_page(), MemoryHost::new(), Registry::builtin());
    let summary = rt.start_app();
    println!("== Start ==\n  {summary:?}");

    let input = find(rt.document(), &Selector::class("js-filter-list-input")).unwrap();
    let count = find(rt.document(), &Selector::class("js-filter-list-count")).unwrap();

    rt.type_text(input, "brc");
    println!("== Filter \"brc\" ==");
    println!("  visible: {:?}", visible_items(rt.document()));
    println!("  counter: {}", rt.document().text_content(count));
    assert_eq!(visible_items(rt.document()), ["BRCA2", "BRCA1"]);

    let form = find(rt.document(), &Selector::tag("form")).unwrap();
    rt.submit(form);
    println!("== Submit ==\n  navigated to {:?}", rt.host().last_navigation());
    assert_eq!(rt.host().last_navigation(), Some("/genes/BRCA2"));

    rt.type_text(input, "");
    let pseudo = find(
        rt.document(),
        &Selector::tag("input").with_attr_eq("data-filter-type", "pseudogene"),
    )
    .unwrap();
    rt.set_checked(pseudo, false);
    println!("== Hide pseudogenes ==");
    println!("  visible: {:?}", visible_items(rt.document()));
    println!("  counter: {}", rt.document().text_content(count));

    let variants_header = find(
        rt.document(),
        &Selector::tag("th").with_attr_eq("data-sort-key", "variants"),
    )
    .unwrap();
    let link = rt
        .document()
        .query(variants_header, &Selector::class("js-sortable-header"))
        .unwrap();
    rt.click(link);
    println!("== Sort by variants ==\n  {:?}", table_order(rt.document()));
    assert_eq!(
        table_order(rt.document()),
        ["BRCA1", "BRCA2", "BRAF", "TP53", "PTENP1"]
    );
    rt.click(link);
    println!("== Sort by variants again ==\n  {:?}", table_order(rt.document()));

    let variants_tab = find(
        rt.document(),
        &Selector::tag("a").with_attr_eq("href", "#variants"),
    )
    .unwrap();
    rt.click(variants_tab);
    println!("== Variants tab ==");
    println!("  fragment writes: {:?}", rt.host().fragment_writes());
    let footer = find(rt.document(), &Selector::tag("footer")).unwrap();
    for a in rt.document().query_all(footer, &Selector::tag("a")) {
        println!("  footer link: {:?}", rt.document().attr(a, "href"));
    }

    rt.host_mut().load_fragment("!");
    rt.hash_changed();
    let index = rt.document().element_by_id("index").unwrap();
    println!("== Back to \"#!\" ==\n  index shown: {}", !rt.document().is_hidden(index));

    let mut deep = Runtime::new(
        gene_page(),
        MemoryHost::with_fragment("!variants"),
        Registry::builtin(),
    );
    deep.start_app();
    let pane = deep.document().element_by_id("variants").unwrap();
    println!("== Deep link \"#!variants\" ==\n  variants shown: {}", !deep.document().is_hidden(pane));
}
