// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use graft_document::{NodeId, Selector};
use graft_events::{Dispatch, Event, EventKind, ListenerTag, Outcome};
use graft_rows::{MatchMode, Query, RowRecord, filter_rows};
use tracing::{debug, warn};

use super::{apply_decisions, first_rendered_href, render_count};
use crate::behavior::{Behavior, Context, InstanceId};

const INPUT: &str = "js-filter-list-input";
const COUNT: &str = "js-filter-list-count";

/// Prefix-filters the `li` rows of a list as the user types.
///
/// Markup hooks, all inside the container:
///
/// - `.js-filter-list-input`: the query input. Its enclosing form's submit
///   opens the first visible link.
/// - `.js-filter-list-count`: counter text, with optional `data-singular` and
///   `data-plural` nouns.
/// - `li[data-text]`: rows, matched on `data-text` (falling back to their
///   text). Rows with `data-filtered="true"` are excluded.
#[derive(Debug, Default)]
pub struct FilterableList {
    element: Option<NodeId>,
}

impl FilterableList {
    /// Registered name.
    pub const NAME: &'static str = "filterable-list";

    const FILTER: ListenerTag = ListenerTag(0);
    const SUBMIT: ListenerTag = ListenerTag(1);

    fn refilter(&self, cx: &mut Context<'_>) {
        let Some(element) = self.element else {
            return;
        };
        let doc = cx.document();
        let raw = doc
            .query(element, &Selector::class(INPUT))
            .map(|input| doc.value(input))
            .unwrap_or_default();
        let query = match Query::compile(raw, MatchMode::Prefix) {
            Ok(query) => query,
            Err(err) => {
                warn!(%element, %err, "list filter query rejected");
                return;
            }
        };
        let rows = doc.query_all(element, &Selector::tag("li"));
        let records: Vec<_> = rows
            .iter()
            .map(|&row| {
                let text = doc
                    .attr(row, "data-text")
                    .map_or_else(|| doc.text_content(row), str::to_owned);
                RowRecord::new(row, text).excluded(doc.attr(row, "data-filtered") == Some("true"))
            })
            .collect();
        let outcome = filter_rows(&query, &records);
        let counter = doc.query(element, &Selector::class(COUNT));

        let doc = cx.document_mut();
        let result = apply_decisions(doc, &rows, &outcome).and_then(|()| match counter {
            Some(counter) => render_count(doc, counter, outcome.count),
            None => Ok(()),
        });
        if let Err(err) = result {
            debug!(%element, %err, "list filter could not update rows");
        }
    }
}

impl Behavior for FilterableList {
    fn start(&mut self, cx: &mut Context<'_>, element: NodeId) {
        self.element = Some(element);
        for kind in [EventKind::KeyUp, EventKind::Change] {
            cx.listen_delegated(element, kind, Selector::class(INPUT), Self::FILTER);
        }
        self.refilter(cx);

        let doc = cx.document();
        let form = doc
            .query(element, &Selector::class(INPUT))
            .and_then(|input| doc.parent(input))
            .and_then(|parent| doc.closest(parent, &Selector::tag("form")));
        if let Some(form) = form {
            cx.listen(form, EventKind::Submit, Self::SUBMIT);
        }
    }

    fn handle(
        &mut self,
        cx: &mut Context<'_>,
        event: &mut Event,
        dispatch: &Dispatch<InstanceId>,
    ) -> Outcome {
        match dispatch.tag {
            Self::FILTER => self.refilter(cx),
            Self::SUBMIT => {
                event.prevent_default();
                let href = self.element.and_then(|element| {
                    first_rendered_href(cx.document(), element, &Selector::tag("a"))
                });
                if let Some(href) = href {
                    cx.navigate(&href);
                }
            }
            _ => {}
        }
        Outcome::Continue
    }
}
