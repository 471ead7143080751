// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replacing part of a page with server-rendered markup.
//!
//! The variant table is swapped for a new result set. The old table's
//! behavior and listeners are dropped and the new table is enhanced.
//!
//! Run:
//! - `cargo run -p graft_demos --example splice_results`

use graft_demos::{GENES, Gene, find, gene_page, init_logging, table_order, variant_table};
use graft_document::Selector;
use graft_runtime::{MemoryHost, Registry, Runtime};

fn main() {
    init_logging();

    let mut rt = Runtime::new(gene_page(), MemoryHost::new(), Registry::builtin());
    rt.start_app();
    println!(
        "== Before ==\n  instances={} listeners={} rows={:?}",
        rt.instance_count(),
        rt.listener_count(),
        table_order(rt.document())
    );

    let more = [
        GENES[0],
        Gene { name: "KRAS", variants: 12, kind: "gene" },
        Gene { name: "EGFR", variants: 3, kind: "gene" },
    ];
    let replaced = rt.splice_fragments([("variant-results", vec![variant_table(&more)])]);
    println!(
        "== After splicing {replaced} fragment ==\n  instances={} listeners={} rows={:?}",
        rt.instance_count(),
        rt.listener_count(),
        table_order(rt.document())
    );

    let header = find(
        rt.document(),
        &Selector::tag("th").with_attr_eq("data-sort-key", "variants"),
    )
    .unwrap();
    let link = rt
        .document()
        .query(header, &Selector::class("js-sortable-header"))
        .unwrap();
    rt.click(link);
    println!("== New table sorted ==\n  {:?}", table_order(rt.document()));
    assert_eq!(table_order(rt.document()), ["KRAS", "TP53", "EGFR"]);

    let again = rt.start_app();
    println!("== Restart ==\n  {again:?}");
    assert_eq!(again.started, 0);
}
