// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use graft_document::{NodeId, Selector};
use graft_events::{Dispatch, Event, EventKind, ListenerTag, Outcome};
use graft_rows::{MatchMode, Query, RowRecord, filter_rows};
use tracing::{debug, warn};

use super::{apply_decisions, body_rows, first_rendered_href, render_count};
use crate::behavior::{Behavior, Context, InstanceId};

const INPUT: &str = "js-filter-table-input";
const COUNT: &str = "js-filter-table-count";
const OPEN_ON_SUBMIT: &str = "js-open-on-submit";

/// Substring-filters the body rows of a table as the user types.
///
/// Rows are every `tr` inside a `tbody`, matched on their full text. Rows
/// marked `data-filtered="true"` stay hidden and uncounted. The
/// `.js-filter-table-count` counter is optional. Submitting the input's form
/// opens the first visible `a.js-open-on-submit`; the form is only
/// intercepted when such links exist.
#[derive(Debug, Default)]
pub struct FilterableTable {
    element: Option<NodeId>,
}

impl FilterableTable {
    /// Registered name.
    pub const NAME: &'static str = "filterable-table";

    const FILTER: ListenerTag = ListenerTag(0);
    const SUBMIT: ListenerTag = ListenerTag(1);

    fn open_on_submit() -> Selector {
        Selector::tag("a").with_class(OPEN_ON_SUBMIT)
    }

    fn refilter(&self, cx: &mut Context<'_>) {
        let Some(element) = self.element else {
            return;
        };
        let doc = cx.document();
        let raw = doc
            .query(element, &Selector::class(INPUT))
            .map(|input| doc.value(input))
            .unwrap_or_default();
        let query = match Query::compile(raw, MatchMode::Substring) {
            Ok(query) => query,
            Err(err) => {
                warn!(%element, %err, "table filter query rejected");
                return;
            }
        };
        let rows = body_rows(doc, element);
        let records: Vec<_> = rows
            .iter()
            .map(|&row| {
                RowRecord::new(row, doc.text_content(row))
                    .excluded(doc.attr(row, "data-filtered") == Some("true"))
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
            debug!(%element, %err, "table filter could not update rows");
        }
    }
}

impl Behavior for FilterableTable {
    fn start(&mut self, cx: &mut Context<'_>, element: NodeId) {
        self.element = Some(element);
        for kind in [EventKind::KeyUp, EventKind::Change] {
            cx.listen_delegated(element, kind, Selector::class(INPUT), Self::FILTER);
        }
        self.refilter(cx);

        let doc = cx.document();
        if doc.query(element, &Self::open_on_submit()).is_none() {
            return;
        }
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
                    first_rendered_href(cx.document(), element, &Self::open_on_submit())
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
