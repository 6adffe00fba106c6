//! Namespaced events: per-element handler registry plus synthetic
//! dispatch with bubbling.
//!
//! Event names carry an optional namespace ("click.menu"); either half
//! defaults to the wildcard `*` when absent. Dispatch matches
//! symmetrically, so `trigger("click.menu")` reaches handlers bound to
//! plain "click" as well as "click.menu". Unbinding wildcards only the
//! pattern side: `off(".menu")` clears the `menu` namespace and nothing
//! else, while `off("click")` clears every click handler.

use std::collections::HashMap;
use std::rc::Rc;

use pin_dom::NodeId;
use serde_json::Value;

use crate::Collection;

/// An event name split into its name and namespace halves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventName {
    pub name: String,
    pub namespace: String,
}

impl EventName {
    /// Parse "click.menu" / "click" / ".menu"; a missing half becomes `*`
    pub fn parse(s: &str) -> Self {
        let (name, namespace) = match s.split_once('.') {
            Some((n, ns)) => (n, ns),
            None => (s, ""),
        };
        let wildcard = |half: &str| {
            if half.is_empty() {
                "*".to_string()
            } else {
                half.to_string()
            }
        };
        Self {
            name: wildcard(name),
            namespace: wildcard(namespace),
        }
    }

    /// Symmetric wildcard matching for dispatch: each half matches when
    /// either side is `*` or the two are equal; both halves must match
    pub fn matches(&self, other: &EventName) -> bool {
        fn half(a: &str, b: &str) -> bool {
            a == "*" || b == "*" || a == b
        }
        half(&self.name, &other.name) && half(&self.namespace, &other.namespace)
    }

    /// One-directional matching for unbinding: a half of `self` (the
    /// pattern) matches when it is `*` or equal to the registration's.
    /// A registration bound without a namespace keeps its handlers when a
    /// namespace-only pattern like `.menu` is unbound.
    pub fn matches_pattern(&self, key: &EventName) -> bool {
        fn half(pattern: &str, key: &str) -> bool {
            pattern == "*" || pattern == key
        }
        half(&self.name, &key.name) && half(&self.namespace, &key.namespace)
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.name, self.namespace)
    }
}

/// A dispatched event
#[derive(Debug, Clone)]
pub struct Event {
    /// The full namespaced name the trigger carried
    pub name: EventName,
    /// The element the event was dispatched at
    pub target: NodeId,
    /// The element whose handlers are currently running (changes as the
    /// event bubbles)
    pub current_target: NodeId,
    propagation_stopped: bool,
}

impl Event {
    fn new(name: EventName, target: NodeId) -> Self {
        Self {
            name,
            target,
            current_target: target,
            propagation_stopped: false,
        }
    }

    /// Stop the event from bubbling past the current element
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

type Handler = Rc<dyn Fn(&mut Event, &[Value])>;

struct Registration {
    key: EventName,
    handler: Handler,
}

/// Per-element handler registry
#[derive(Default)]
pub(crate) struct EventRouter {
    by_node: HashMap<NodeId, Vec<Registration>>,
}

impl EventRouter {
    fn on(&mut self, node: NodeId, key: EventName, handler: Handler) {
        self.by_node
            .entry(node)
            .or_default()
            .push(Registration { key, handler });
    }

    fn off(&mut self, node: NodeId, pattern: &EventName) {
        if let Some(list) = self.by_node.get_mut(&node) {
            list.retain(|reg| !pattern.matches_pattern(&reg.key));
            if list.is_empty() {
                self.by_node.remove(&node);
            }
        }
    }

    /// Handlers on `node` whose registration matches the triggered name.
    /// Cloned out so no registry borrow is held during the calls.
    fn matching(&self, node: NodeId, trigger: &EventName) -> Vec<Handler> {
        self.by_node
            .get(&node)
            .map(|list| {
                list.iter()
                    .filter(|reg| trigger.matches(&reg.key))
                    .map(|reg| Rc::clone(&reg.handler))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of live registrations on a node (test hook)
    #[cfg(test)]
    pub(crate) fn count(&self, node: NodeId) -> usize {
        self.by_node.get(&node).map_or(0, Vec::len)
    }
}

impl Collection {
    /// Bind a handler. `name` may hold several whitespace-separated
    /// namespaced names ("click.menu keyup.menu").
    pub fn on<F>(&self, name: &str, handler: F) -> Collection
    where
        F: Fn(&mut Event, &[Value]) + 'static,
    {
        let handler: Handler = Rc::new(handler);
        let keys: Vec<EventName> = name.split_whitespace().map(EventName::parse).collect();

        let mut state = self.page().state_mut();
        for &node in self.nodes() {
            for key in &keys {
                state.router.on(node, key.clone(), Rc::clone(&handler));
            }
        }
        drop(state);
        self.page().collection(self.nodes().to_vec())
    }

    /// Unbind every handler whose registration the pattern covers
    /// ("click", ".menu", "click.menu", "*")
    pub fn off(&self, name: &str) -> Collection {
        let patterns: Vec<EventName> = name.split_whitespace().map(EventName::parse).collect();

        let mut state = self.page().state_mut();
        for &node in self.nodes() {
            for pattern in &patterns {
                state.router.off(node, pattern);
            }
        }
        drop(state);
        self.page().collection(self.nodes().to_vec())
    }

    /// Dispatch a synthetic event at every element, bubbling through
    /// ancestors. `args` are forwarded to handlers after the event.
    pub fn trigger(&self, name: &str, args: Vec<Value>) -> Collection {
        let trigger = EventName::parse(name);

        for &target in self.nodes() {
            // Snapshot the bubble path up front; handlers may mutate the
            // tree while the event runs.
            let path: Vec<NodeId> = {
                let state = self.page().state();
                std::iter::once(target)
                    .chain(state.doc.tree().ancestors(target))
                    .collect()
            };

            let mut event = Event::new(trigger.clone(), target);
            'bubble: for node in path {
                event.current_target = node;
                let handlers = self.page().state().router.matching(node, &trigger);
                for handler in handlers {
                    handler(&mut event, &args);
                }
                if event.is_propagation_stopped() {
                    break 'bubble;
                }
            }
        }
        self.page().collection(self.nodes().to_vec())
    }
}
