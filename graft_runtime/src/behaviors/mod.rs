// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in behaviors.
//!
//! | Name | Behavior |
//! | --- | --- |
//! | `filterable-list` | [`FilterableList`] |
//! | `filterable-table` | [`FilterableTable`] |
//! | `sortable-table` | [`SortableTable`] |
//! | `tab-switcher` | [`TabSwitcher`] |
//! | `fragment-links` | [`FragmentLinks`] |
//! | `type-filter` | [`TypeFilter`] |

mod filterable_list;
mod filterable_table;
mod fragment_links;
mod sortable_table;
mod tab_switcher;
mod type_filter;

pub use filterable_list::FilterableList;
pub use filterable_table::FilterableTable;
pub use fragment_links::FragmentLinks;
pub use sortable_table::SortableTable;
pub use tab_switcher::TabSwitcher;
pub use type_filter::TypeFilter;

use graft_document::{Document, DocumentError, NodeId, Selector};
use graft_rows::{CountLabel, FilterOutcome, RowDecision};

use crate::behavior::Behavior;
use crate::registry::Factory;

pub(crate) fn builtin() -> Vec<(&'static str, Factory)> {
    vec![
        (FilterableList::NAME, factory::<FilterableList>()),
        (FilterableTable::NAME, factory::<FilterableTable>()),
        (SortableTable::NAME, factory::<SortableTable>()),
        (TabSwitcher::NAME, factory::<TabSwitcher>()),
        (FragmentLinks::NAME, factory::<FragmentLinks>()),
        (TypeFilter::NAME, factory::<TypeFilter>()),
    ]
}

fn factory<B: Behavior + Default + 'static>() -> Factory {
    Box::new(|| -> Box<dyn Behavior> { Box::new(B::default()) })
}

/// Reads `data-singular` / `data-plural` from a counter element.
fn count_label(doc: &Document, counter: NodeId) -> CountLabel {
    let fallback = CountLabel::default();
    CountLabel::new(
        doc.attr(counter, "data-singular")
            .map_or(fallback.singular, str::to_owned),
        doc.attr(counter, "data-plural")
            .map_or(fallback.plural, str::to_owned),
    )
}

/// Writes `"<count> <noun>"` into `counter`.
fn render_count(doc: &mut Document, counter: NodeId, count: usize) -> Result<(), DocumentError> {
    let text = count_label(doc, counter).render(count);
    doc.set_text_content(counter, text)
}

/// Shows and hides `rows` according to `outcome`. Skipped rows are untouched.
fn apply_decisions(
    doc: &mut Document,
    rows: &[NodeId],
    outcome: &FilterOutcome,
) -> Result<(), DocumentError> {
    for (&row, decision) in rows.iter().zip(&outcome.decisions) {
        match decision {
            RowDecision::Show => doc.set_hidden(row, false)?,
            RowDecision::Hide => doc.set_hidden(row, true)?,
            RowDecision::Skip => {}
        }
    }
    Ok(())
}

/// The href of the first rendered element under `root` matching `selector`.
fn first_rendered_href(doc: &Document, root: NodeId, selector: &Selector) -> Option<String> {
    doc.query_all(root, selector)
        .into_iter()
        .find(|&n| doc.is_rendered(n))
        .and_then(|n| doc.attr(n, "href"))
        .map(str::to_owned)
}

/// Every `tr` inside a `tbody` under `table`, in document order.
fn body_rows(doc: &Document, table: NodeId) -> Vec<NodeId> {
    doc.query_all(table, &Selector::tag("tr"))
        .into_iter()
        .filter(|&tr| {
            doc.closest(tr, &Selector::tag("tbody"))
                .is_some_and(|body| body != table && doc.contains(table, body))
        })
        .collect()
}
