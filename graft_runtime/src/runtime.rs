// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discovery, instantiation and event dispatch.

use graft_document::{Document, Markup, NodeId};
use graft_events::{Dispatch, Event, EventKind, EventTarget, Listeners, Outcome, dispatcher};
use hashbrown::HashMap;
use tracing::{debug, info, trace, warn};

use crate::behavior::{Behavior, Context, InstanceId};
use crate::config::RuntimeConfig;
use crate::host::Host;
use crate::registry::Registry;

/// Signal from the host: the children of `root` were replaced with new markup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ContentChanged {
    /// Root of the new content.
    pub root: NodeId,
}

/// What one [`Runtime::start`] pass did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StartSummary {
    /// Elements carrying the behavior attribute.
    pub discovered: usize,
    /// Behaviors instantiated and started.
    pub started: usize,
    /// Elements naming a behavior that is not registered.
    pub unknown: usize,
    /// Elements that already had a live behavior bound.
    pub already_bound: usize,
}

#[derive(Debug)]
struct Instance {
    name: String,
    element: NodeId,
    behavior: Box<dyn Behavior>,
}

/// Attaches registered behaviors to a document and routes host events to them.
///
/// ## Lifecycle
///
/// - [`Runtime::start`] discovers every element under a root carrying the
///   behavior attribute, in document order, and starts one behavior per
///   element. Elements that already have a live behavior are skipped, so a
///   repeated start is harmless.
/// - [`Runtime::on_content_changed`] drops instances and listeners whose nodes
///   were removed, then starts the new subtree only. A behavior bound to the
///   changed root or one of its ancestors is released and started again, since
///   whatever it found below its element at start may be gone.
///
/// ## Events
///
/// [`Runtime::click`], [`Runtime::key_up`], [`Runtime::change`],
/// [`Runtime::submit`] and [`Runtime::hash_changed`] route one event and report
/// whether a handler prevented the default action. Fragment writes made by
/// handlers are delivered as window hash-change events after the current
/// event, at most [`RuntimeConfig::fragment_cascade_limit`] times in a row.
#[derive(Debug)]
pub struct Runtime<H: Host> {
    doc: Document,
    host: H,
    registry: Registry,
    config: RuntimeConfig,
    listeners: Listeners<InstanceId>,
    instances: Vec<Option<Instance>>,
    bound: HashMap<NodeId, InstanceId>,
    fragment_dirty: bool,
}

impl<H: Host> Runtime<H> {
    /// Creates a runtime with the default configuration. Nothing is started.
    pub fn new(doc: Document, host: H, registry: Registry) -> Self {
        Self {
            doc,
            host,
            registry,
            config: RuntimeConfig::default(),
            listeners: Listeners::new(),
            instances: Vec::new(),
            bound: HashMap::new(),
            fragment_dirty: false,
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The document, mutably. Structural edits should be followed by
    /// [`Runtime::on_content_changed`].
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Number of live behavior instances.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instances.iter().flatten().count()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Name of the behavior bound to `element`, if any.
    #[must_use]
    pub fn behavior_at(&self, element: NodeId) -> Option<&str> {
        let id = self.bound.get(&element)?;
        self.instances
            .get(id.index())?
            .as_ref()
            .map(|i| i.name.as_str())
    }

    /// Elements under `root` (inclusive) carrying the behavior attribute, in
    /// document order.
    #[must_use]
    pub fn discover(&self, root: NodeId) -> Vec<NodeId> {
        let attr = self.config.behavior_attribute.as_str();
        self.doc
            .descendants(root)
            .filter(|&n| self.doc.attr(n, attr).is_some())
            .collect()
    }

    /// Starts the whole document.
    pub fn start_app(&mut self) -> StartSummary {
        self.start(self.doc.root())
    }

    /// Starts a behavior on every discovered element under `root`.
    pub fn start(&mut self, root: NodeId) -> StartSummary {
        let found = self.discover(root);
        self.start_elements(found)
    }

    fn start_elements(&mut self, found: Vec<NodeId>) -> StartSummary {
        let mut summary = StartSummary {
            discovered: found.len(),
            ..StartSummary::default()
        };
        for element in found {
            if !self.doc.is_alive(element) {
                continue;
            }
            if self.is_bound(element) {
                debug!(%element, "behavior already bound; skipping");
                summary.already_bound += 1;
                continue;
            }
            let Some(name) = self
                .doc
                .attr(element, &self.config.behavior_attribute)
                .map(str::to_owned)
            else {
                continue;
            };
            let Some(behavior) = self.registry.instantiate(&name) else {
                debug!(%element, behavior = %name, "no behavior registered; skipping");
                summary.unknown += 1;
                continue;
            };
            self.instantiate(name, element, behavior);
            summary.started += 1;
        }
        self.flush_fragment_changes();
        summary
    }

    /// Handles a content-changed signal.
    pub fn on_content_changed(&mut self, signal: ContentChanged) -> StartSummary {
        let (instances, listeners) = self.prune();
        let mut found = self.release_enclosing(signal.root);
        let restarted = found.len();
        found.extend(self.discover(signal.root));
        let summary = self.start_elements(found);
        info!(
            root = %signal.root,
            pruned_instances = instances,
            pruned_listeners = listeners,
            restarted,
            started = summary.started,
            "content changed"
        );
        summary
    }

    /// Splices server-rendered fragments into the page.
    ///
    /// Each entry maps an element id to the markup that replaces that
    /// element's children. Every replaced element gets its own
    /// [`ContentChanged`] signal. Ids with no matching element are skipped.
    /// Returns the number of elements replaced.
    pub fn splice_fragments<I, S>(&mut self, fragments: I) -> usize
    where
        I: IntoIterator<Item = (S, Vec<Markup>)>,
        S: AsRef<str>,
    {
        let mut replaced = 0;
        for (id, markup) in fragments {
            let id = id.as_ref();
            let Some(target) = self.doc.element_by_id(id) else {
                debug!(id, "no element for fragment; skipping");
                continue;
            };
            if let Err(err) = self.doc.replace_children(target, markup) {
                warn!(id, %err, "fragment splice failed");
                continue;
            }
            replaced += 1;
            self.on_content_changed(ContentChanged { root: target });
        }
        replaced
    }

    /// Leaves the page for `path`.
    pub fn navigate(&mut self, path: &str) {
        debug!(path, "navigate");
        self.host.navigate(path);
    }

    /// Routes a click on `target`. Returns `true` if the default was prevented.
    pub fn click(&mut self, target: NodeId) -> bool {
        self.dispatch(Event::new(EventKind::Click, EventTarget::Node(target)))
    }

    /// Routes a key release on `target`.
    pub fn key_up(&mut self, target: NodeId) -> bool {
        self.dispatch(Event::new(EventKind::KeyUp, EventTarget::Node(target)))
    }

    /// Routes a committed change on `target`.
    pub fn change(&mut self, target: NodeId) -> bool {
        self.dispatch(Event::new(EventKind::Change, EventTarget::Node(target)))
    }

    /// Routes a submission of `form`.
    pub fn submit(&mut self, form: NodeId) -> bool {
        self.dispatch(Event::new(EventKind::Submit, EventTarget::Node(form)))
    }

    /// Replaces the value of `input` and routes the key release that follows typing.
    pub fn type_text(&mut self, input: NodeId, text: &str) -> bool {
        if let Err(err) = self.doc.set_value(input, text) {
            debug!(%input, %err, "cannot type into node");
            return false;
        }
        self.key_up(input)
    }

    /// Sets the checked state of `input` and routes the resulting change.
    pub fn set_checked(&mut self, input: NodeId, checked: bool) -> bool {
        if let Err(err) = self.doc.set_checked(input, checked) {
            debug!(%input, %err, "cannot check node");
            return false;
        }
        self.change(input)
    }

    /// Routes a window hash change. The host must already hold the new fragment.
    pub fn hash_changed(&mut self) -> bool {
        self.dispatch(Event::new(EventKind::HashChange, EventTarget::Window))
    }

    fn is_bound(&self, element: NodeId) -> bool {
        self.bound
            .get(&element)
            .and_then(|id| self.instances.get(id.index()))
            .is_some_and(Option::is_some)
    }

    fn instantiate(&mut self, name: String, element: NodeId, mut behavior: Box<dyn Behavior>) {
        let id = InstanceId(self.instances.len());
        let mut cx = Context {
            doc: &mut self.doc,
            host: &mut self.host,
            listeners: &mut self.listeners,
            instance: id,
            format: self.config.fragment_format,
            fragment_dirty: &mut self.fragment_dirty,
        };
        behavior.start(&mut cx, element);
        debug!(%element, behavior = %name, instance = %id, "behavior started");
        self.instances.push(Some(Instance {
            name,
            element,
            behavior,
        }));
        self.bound.insert(element, id);
    }

    /// Drops instances bound to removed containers and every listener on a
    /// removed node or held by a dropped instance.
    fn prune(&mut self) -> (usize, usize) {
        let mut dropped = Vec::new();
        for (index, slot) in self.instances.iter_mut().enumerate() {
            if slot.as_ref().is_some_and(|i| !self.doc.is_alive(i.element)) {
                if let Some(instance) = slot.take() {
                    self.bound.remove(&instance.element);
                }
                dropped.push(InstanceId(index));
            }
        }
        let mut listeners = self.listeners.prune_dead(&self.doc);
        for &id in &dropped {
            listeners += self.listeners.remove_owner(id);
        }
        if !dropped.is_empty() || listeners > 0 {
            debug!(instances = dropped.len(), listeners, "pruned dead subscriptions");
        }
        (dropped.len(), listeners)
    }

    /// Releases the behaviors bound to `root` and its ancestors, dropping their
    /// listeners. Returns the released elements above `root`, outermost first;
    /// `root` itself is found again by discovery.
    fn release_enclosing(&mut self, root: NodeId) -> Vec<NodeId> {
        let mut enclosing: Vec<_> = self
            .doc
            .ancestors(root)
            .filter(|n| self.bound.contains_key(n))
            .collect();
        enclosing.reverse();
        let mut released = Vec::with_capacity(enclosing.len());
        for element in enclosing {
            let Some(id) = self.bound.remove(&element) else {
                continue;
            };
            let name = self
                .instances
                .get_mut(id.index())
                .and_then(Option::take)
                .map(|i| i.name);
            let listeners = self.listeners.remove_owner(id);
            debug!(
                %element,
                behavior = ?name,
                instance = %id,
                listeners,
                "released enclosing behavior"
            );
            if element != root {
                released.push(element);
            }
        }
        released
    }

    fn dispatch(&mut self, mut event: Event) -> bool {
        self.dispatch_one(&mut event);
        self.flush_fragment_changes();
        event.is_default_prevented()
    }

    fn dispatch_one(&mut self, event: &mut Event) {
        let seq = self.listeners.route(&self.doc, event.target, event.kind);
        trace!(kind = ?event.kind, event_target = ?event.target, listeners = seq.len(), "dispatch");
        dispatcher::run(&seq, event, |d, ev| self.invoke(d, ev));
    }

    fn invoke(&mut self, d: &Dispatch<InstanceId>, event: &mut Event) -> Outcome {
        let Some(mut instance) = self.instances.get_mut(d.owner.index()).and_then(Option::take)
        else {
            return Outcome::Continue;
        };
        let mut cx = Context {
            doc: &mut self.doc,
            host: &mut self.host,
            listeners: &mut self.listeners,
            instance: d.owner,
            format: self.config.fragment_format,
            fragment_dirty: &mut self.fragment_dirty,
        };
        let outcome = instance.behavior.handle(&mut cx, event, d);
        if let Some(slot) = self.instances.get_mut(d.owner.index()) {
            *slot = Some(instance);
        }
        outcome
    }

    fn flush_fragment_changes(&mut self) {
        let mut rounds = 0;
        while core::mem::take(&mut self.fragment_dirty) {
            if rounds == self.config.fragment_cascade_limit {
                warn!(
                    limit = self.config.fragment_cascade_limit,
                    fragment = self.host.fragment(),
                    "fragment cascade limit reached; dropping hash change"
                );
                break;
            }
            rounds += 1;
            let mut event = Event::new(EventKind::HashChange, EventTarget::Window);
            self.dispatch_one(&mut event);
        }
    }
}
