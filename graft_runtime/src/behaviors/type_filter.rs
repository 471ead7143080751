// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use graft_document::{Document, DocumentError, NodeId, Selector};
use graft_events::{Dispatch, Event, EventKind, ListenerTag, Outcome};
use tracing::debug;

use super::render_count;
use crate::behavior::{Behavior, Context, InstanceId};

const FILTER_TYPE: &str = "data-filter-type";
const FILTERED: &str = "data-filtered";
const COUNT: &str = "js-filter-list-count";

/// Shows or hides list rows by type using checkboxes.
///
/// Each `input[data-filter-type]` in the container controls the `li` rows
/// whose `data-type` matches: unchecked hides them and marks them
/// `data-filtered="true"`, which also excludes them from a
/// [`FilterableList`](super::FilterableList) inside the container. The
/// `.js-filter-list-count` counter shows the number of visible rows.
#[derive(Debug, Default)]
pub struct TypeFilter {
    element: Option<NodeId>,
}

impl TypeFilter {
    /// Registered name.
    pub const NAME: &'static str = "type-filter";

    const TOGGLE: ListenerTag = ListenerTag(0);

    fn apply(doc: &mut Document, element: NodeId) -> Result<(), DocumentError> {
        let toggles: Vec<(String, bool)> = doc
            .query_all(element, &Selector::tag("input").with_attr(FILTER_TYPE))
            .into_iter()
            .filter_map(|input| {
                let kind = doc.attr(input, FILTER_TYPE)?.to_owned();
                Some((kind, doc.is_checked(input)))
            })
            .collect();
        for (kind, shown) in toggles {
            let rows = doc.query_all(element, &Selector::tag("li").with_attr_eq("data-type", kind));
            for row in rows {
                doc.set_attr(row, FILTERED, if shown { "false" } else { "true" })?;
                doc.set_hidden(row, !shown)?;
            }
        }
        let visible = doc
            .query_all(element, &Selector::tag("li"))
            .into_iter()
            .filter(|&li| doc.is_rendered(li))
            .count();
        if let Some(counter) = doc.query(element, &Selector::class(COUNT)) {
            render_count(doc, counter, visible)?;
        }
        Ok(())
    }
}

impl Behavior for TypeFilter {
    fn start(&mut self, cx: &mut Context<'_>, element: NodeId) {
        self.element = Some(element);
        let doc = cx.document_mut();
        for li in doc.query_all(element, &Selector::tag("li")) {
            if let Err(err) = doc.set_attr(li, FILTERED, "false") {
                debug!(%li, %err, "cannot reset row filter flag");
            }
        }
        cx.listen_delegated(
            element,
            EventKind::Change,
            Selector::tag("input").with_attr(FILTER_TYPE),
            Self::TOGGLE,
        );
    }

    fn handle(
        &mut self,
        cx: &mut Context<'_>,
        _event: &mut Event,
        dispatch: &Dispatch<InstanceId>,
    ) -> Outcome {
        if dispatch.tag == Self::TOGGLE
            && let Some(element) = self.element
            && let Err(err) = Self::apply(cx.document_mut(), element)
        {
            debug!(%element, %err, "type filter failed");
        }
        Outcome::Continue
    }
}
