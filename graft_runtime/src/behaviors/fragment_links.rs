// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use graft_document::{NodeId, Selector};
use graft_events::{Dispatch, Event, EventKind, ListenerTag, Outcome};
use tracing::debug;

use crate::behavior::{Behavior, Context, InstanceId};

/// Carries the current tab fragment on every link in the container.
///
/// Whenever the fragment is tab state (`#!…`), each `a[href]` inside the
/// container is rewritten to `<href without fragment>#!…`, so following it
/// lands on the same tab of the next page. Other fragments leave links alone.
#[derive(Debug, Default)]
pub struct FragmentLinks {
    element: Option<NodeId>,
}

impl FragmentLinks {
    /// Registered name.
    pub const NAME: &'static str = "fragment-links";

    const HASH: ListenerTag = ListenerTag(0);

    fn update(&self, cx: &mut Context<'_>) {
        let Some(element) = self.element else {
            return;
        };
        let format = cx.fragment_format();
        let fragment = cx.fragment();
        let doc = cx.document();
        let rewrites: Vec<(NodeId, String)> = doc
            .query_all(element, &Selector::tag("a").with_attr("href"))
            .into_iter()
            .filter_map(|link| {
                let href = doc.attr(link, "href")?;
                Some((link, format.propagate(href, fragment)?))
            })
            .collect();
        let doc = cx.document_mut();
        for (link, href) in rewrites {
            if let Err(err) = doc.set_attr(link, "href", href) {
                debug!(%link, %err, "link rewrite failed");
            }
        }
    }
}

impl Behavior for FragmentLinks {
    fn start(&mut self, cx: &mut Context<'_>, element: NodeId) {
        self.element = Some(element);
        cx.listen_window(EventKind::HashChange, Self::HASH);
        self.update(cx);
    }

    fn handle(
        &mut self,
        cx: &mut Context<'_>,
        _event: &mut Event,
        dispatch: &Dispatch<InstanceId>,
    ) -> Outcome {
        if dispatch.tag == Self::HASH {
            self.update(cx);
        }
        Outcome::Continue
    }
}
