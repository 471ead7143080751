// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use graft_document::{Document, DocumentError, NodeId, Selector};
use graft_events::{Dispatch, Event, EventKind, EventTarget, ListenerTag, Outcome};
use graft_rows::{
    ColumnDescriptor, ColumnState, Columns, Direction, RowRecord, SortType, sort_rows,
};
use tracing::debug;

use crate::behavior::{Behavior, Context, InstanceId};

const HEADER: &str = "js-sortable-header";
const SORTED: &str = "sorted-column";

/// Sorts the body rows of a table when a header is clicked.
///
/// - The container's `data-default-key` names the tie-break key.
/// - Clicking anything inside a `.js-sortable-header` sorts on its `th`:
///   `data-sort-key` names the key and `data-sort-type="number"` selects
///   numeric order.
/// - Row values are read from `data-<key>` on each `tr`.
/// - The sorted header carries `sorted-column` plus `sorted-asc` or
///   `sorted-desc`; server-rendered markers seed the initial state.
#[derive(Debug, Default)]
pub struct SortableTable {
    element: Option<NodeId>,
    default_key: String,
    columns: Columns,
    headers: Vec<NodeId>,
}

impl SortableTable {
    /// Registered name.
    pub const NAME: &'static str = "sortable-table";

    const SORT: ListenerTag = ListenerTag(0);

    fn column_for(&mut self, doc: &Document, th: NodeId) -> Option<usize> {
        if let Some(index) = self.headers.iter().position(|&h| h == th) {
            return Some(index);
        }
        let key = doc.attr(th, "data-sort-key")?;
        let sort_type = SortType::from_hint(doc.attr(th, "data-sort-type"));
        self.headers.push(th);
        Some(self.columns.push(ColumnDescriptor {
            state: initial_state(doc, th),
            ..ColumnDescriptor::new(key, sort_type)
        }))
    }

    fn sort(&mut self, cx: &mut Context<'_>, current: NodeId) -> Result<(), DocumentError> {
        let Some(element) = self.element else {
            return Ok(());
        };
        let th = if cx.document().tag(current) == Some("th") {
            Some(current)
        } else {
            cx.document().closest(current, &Selector::tag("th"))
        };
        let Some(th) = th else {
            return Ok(());
        };
        let Some(index) = self.column_for(cx.document(), th) else {
            debug!(%th, "sortable header has no sort key");
            return Ok(());
        };
        let Some(direction) = self.columns.activate(index) else {
            return Ok(());
        };
        let (key, sort_type) = match self.columns.get(index) {
            Some(column) => (column.key.clone(), column.sort_type),
            None => return Ok(()),
        };

        let doc = cx.document_mut();
        for marked in doc.query_all(element, &Selector::tag("th").with_class(SORTED)) {
            doc.remove_class(marked, SORTED)?;
            doc.remove_class(marked, Direction::Ascending.class_name())?;
            doc.remove_class(marked, Direction::Descending.class_name())?;
        }
        doc.add_class(th, SORTED)?;
        doc.add_class(th, direction.class_name())?;

        let Some(body) = doc.query(element, &Selector::tag("tbody")) else {
            return Ok(());
        };
        let rows: Vec<NodeId> = doc
            .element_children(body)
            .filter(|&r| doc.tag(r) == Some("tr"))
            .collect();
        let key_attr = format!("data-{key}");
        let tie_attr = format!("data-{}", self.default_key);
        let records: Vec<_> = rows
            .iter()
            .map(|&row| {
                let mut record = RowRecord::new(row, String::new());
                if let Some(v) = doc.attr(row, &key_attr) {
                    record = record.with_key(key.as_str(), v);
                }
                if let Some(v) = doc.attr(row, &tie_attr) {
                    record = record.with_key(self.default_key.as_str(), v);
                }
                record
            })
            .collect();
        let order: Vec<NodeId> =
            sort_rows(&records, &key, sort_type, &self.default_key, direction)
                .into_iter()
                .map(|i| rows[i])
                .collect();
        debug!(%element, key = key.as_str(), ?direction, rows = order.len(), "sorted table");
        doc.reorder_children(body, &order)
    }
}

fn initial_state(doc: &Document, th: NodeId) -> ColumnState {
    if !doc.has_class(th, SORTED) {
        ColumnState::Unset
    } else if doc.has_class(th, Direction::Descending.class_name()) {
        ColumnState::Sorted(Direction::Descending)
    } else {
        ColumnState::Sorted(Direction::Ascending)
    }
}

impl Behavior for SortableTable {
    fn start(&mut self, cx: &mut Context<'_>, element: NodeId) {
        self.element = Some(element);
        let doc = cx.document();
        self.default_key = doc
            .attr(element, "data-default-key")
            .unwrap_or_default()
            .to_owned();
        for th in doc.query_all(element, &Selector::tag("th").with_attr("data-sort-key")) {
            self.column_for(doc, th);
        }
        cx.listen_delegated(element, EventKind::Click, Selector::class(HEADER), Self::SORT);
    }

    fn handle(
        &mut self,
        cx: &mut Context<'_>,
        _event: &mut Event,
        dispatch: &Dispatch<InstanceId>,
    ) -> Outcome {
        if let (Self::SORT, EventTarget::Node(current)) = (dispatch.tag, dispatch.current)
            && let Err(err) = self.sort(cx, current)
        {
            debug!(%err, "table sort failed");
        }
        Outcome::Continue
    }
}
