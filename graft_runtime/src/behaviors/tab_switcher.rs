// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use graft_document::{Document, DocumentError, NodeId, Selector};
use graft_events::{Dispatch, Event, EventKind, EventTarget, ListenerTag, Outcome};
use graft_hash::{Applied, TabState};
use tracing::{debug, warn};

use crate::behavior::{Behavior, Context, InstanceId};

const ACTIVE: &str = "active";

/// Switches between tab panes and keeps the choice in the URL fragment.
///
/// Tabs are the `a[data-toggle="tab"]` links inside the container; each
/// `href="#id"` names the pane with that `id`. The container's
/// `data-default-tab` names the tab encoded as the bare `#!` fragment.
///
/// The active tab link and its pane carry the `active` class; other panes are
/// hidden. Clicking a tab pushes `#!id` (or `#!` for the default). Fragment
/// changes select the named tab without pushing anything back. Plain anchors
/// such as `#top` are ignored.
#[derive(Debug, Default)]
pub struct TabSwitcher {
    element: Option<NodeId>,
    state: Option<TabState>,
    tabs: Vec<(NodeId, String)>,
}

fn tab_selector() -> Selector {
    Selector::tag("a").with_attr_eq("data-toggle", "tab")
}

fn tab_id(doc: &Document, link: NodeId) -> Option<&str> {
    doc.attr(link, "href")?
        .split_once('#')
        .map(|(_, id)| id)
        .filter(|id| !id.is_empty())
}

impl TabSwitcher {
    /// Registered name.
    pub const NAME: &'static str = "tab-switcher";

    const CLICK: ListenerTag = ListenerTag(0);
    const HASH: ListenerTag = ListenerTag(1);

    /// Shows the active tab's pane and hides the others.
    fn render(&self, doc: &mut Document) -> Result<(), DocumentError> {
        let (Some(element), Some(state)) = (self.element, &self.state) else {
            return Ok(());
        };
        for (link, id) in &self.tabs {
            let active = id == state.active_id();
            set_class(doc, *link, ACTIVE, active)?;
            let pane = doc.query(element, &Selector::any().with_attr_eq("id", id.clone()));
            if let Some(pane) = pane {
                set_class(doc, pane, ACTIVE, active)?;
                doc.set_hidden(pane, !active)?;
            }
        }
        Ok(())
    }

    fn sync_from_fragment(&mut self, cx: &mut Context<'_>, eager: bool) {
        let fragment = cx.fragment().to_owned();
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let applied = state.apply_fragment(&fragment);
        debug!(
            instance = %cx.instance(),
            fragment = fragment.as_str(),
            ?applied,
            "tab fragment applied"
        );
        let changed = matches!(applied, Applied::Changed(_));
        if (changed || eager)
            && let Err(err) = self.render(cx.document_mut())
        {
            debug!(%err, "tab render failed");
        }
    }

    fn activate(&mut self, cx: &mut Context<'_>, link: NodeId) {
        let Some(id) = tab_id(cx.document(), link).map(str::to_owned) else {
            return;
        };
        let Some(fragment) = self.state.as_mut().and_then(|s| s.activate(&id)) else {
            return;
        };
        if let Err(err) = self.render(cx.document_mut()) {
            debug!(%err, "tab render failed");
        }
        cx.set_fragment(&fragment);
    }
}

fn set_class(doc: &mut Document, node: NodeId, class: &str, on: bool) -> Result<(), DocumentError> {
    if on {
        doc.add_class(node, class)?;
    } else {
        doc.remove_class(node, class)?;
    }
    Ok(())
}

impl Behavior for TabSwitcher {
    fn start(&mut self, cx: &mut Context<'_>, element: NodeId) {
        self.element = Some(element);
        let doc = cx.document();
        self.tabs = doc
            .query_all(element, &tab_selector())
            .into_iter()
            .filter_map(|link| Some((link, tab_id(doc, link)?.to_owned())))
            .collect();
        let default = doc.attr(element, "data-default-tab").unwrap_or_default();
        let ids = self.tabs.iter().map(|(_, id)| id.clone());
        match TabState::new(ids, default) {
            Ok(state) => self.state = Some(state.with_format(cx.fragment_format())),
            Err(err) => {
                warn!(%element, %err, "tab switcher disabled");
                return;
            }
        }

        cx.listen_delegated(element, EventKind::Click, tab_selector(), Self::CLICK);
        cx.listen_window(EventKind::HashChange, Self::HASH);
        self.sync_from_fragment(cx, true);
    }

    fn handle(
        &mut self,
        cx: &mut Context<'_>,
        event: &mut Event,
        dispatch: &Dispatch<InstanceId>,
    ) -> Outcome {
        match (dispatch.tag, dispatch.current) {
            (Self::CLICK, EventTarget::Node(link)) => {
                event.prevent_default();
                self.activate(cx, link);
            }
            (Self::HASH, _) => self.sync_from_fragment(cx, false),
            _ => {}
        }
        Outcome::Continue
    }
}
