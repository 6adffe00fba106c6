//! Page - owns the document and hands out collections.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use pin_dom::{Document, NodeId};

use crate::Collection;

#[cfg(feature = "extended")]
use crate::events::EventRouter;
#[cfg(feature = "extended")]
use std::collections::HashMap;

/// A loaded HTML page.
///
/// Cloning a `Page` clones the handle, not the document; collections hold
/// such a handle, which is what lets handlers and chained calls re-enter
/// the page freely.
#[derive(Clone)]
pub struct Page {
    state: Rc<RefCell<PageState>>,
}

pub(crate) struct PageState {
    pub(crate) doc: Document,
    #[cfg(feature = "extended")]
    pub(crate) router: EventRouter,
    /// Per-element expando properties
    #[cfg(feature = "extended")]
    pub(crate) props: HashMap<(NodeId, String), serde_json::Value>,
}

impl Page {
    /// Create a page with an empty html/head/body document
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    /// Parse a full HTML document into a page
    pub fn from_html(html: &str) -> Self {
        Self::with_document(pin_html::parse_document(html))
    }

    fn with_document(doc: Document) -> Self {
        Self {
            state: Rc::new(RefCell::new(PageState {
                doc,
                #[cfg(feature = "extended")]
                router: EventRouter::default(),
                #[cfg(feature = "extended")]
                props: HashMap::new(),
            })),
        }
    }

    /// The `$()` dispatch: an empty input yields an empty collection, an
    /// input starting with `<` parses as a fragment, anything else is a
    /// selector matched from the document root.
    pub fn query(&self, input: &str) -> Collection {
        let input = input.trim();
        if input.is_empty() {
            return self.collection(Vec::new());
        }
        if input.starts_with('<') {
            return self.fragment(input);
        }
        let Some(list) = crate::collection::parse_selector(input) else {
            return self.collection(Vec::new());
        };
        let state = self.state();
        let nodes = pin_css::query(state.doc.tree(), state.doc.tree().root(), &list);
        drop(state);
        self.collection(nodes)
    }

    /// `$(selector, context)`: match within a context collection instead
    /// of the whole document
    pub fn query_in(&self, input: &str, context: &Collection) -> Collection {
        let input = input.trim();
        if input.starts_with('<') {
            return self.fragment(input);
        }
        context.find(input)
    }

    /// Parse an HTML fragment string into detached nodes
    pub fn fragment(&self, html: &str) -> Collection {
        let mut state = self.state_mut();
        let roots = pin_html::parse_fragment_into(state.doc.tree_mut(), html);
        drop(state);
        self.collection(roots)
    }

    /// Wrap an explicit node list in a collection
    pub fn collection(&self, nodes: Vec<NodeId>) -> Collection {
        Collection::new(self.clone(), nodes)
    }

    /// The document element (`<html>`)
    pub fn root(&self) -> Collection {
        let root = self.state().doc.document_element();
        self.collection(if root.is_valid() { vec![root] } else { Vec::new() })
    }

    /// The `<body>` element
    pub fn body(&self) -> Collection {
        let body = self.state().doc.body();
        self.collection(if body.is_valid() { vec![body] } else { Vec::new() })
    }

    /// Run a callback against the page. The document is fully parsed by
    /// the time a `Page` exists, so this is the DOMContentLoaded analogue
    /// and runs immediately.
    pub fn ready<F: FnOnce(&Page)>(&self, f: F) -> &Self {
        f(self);
        self
    }

    pub(crate) fn state(&self) -> Ref<'_, PageState> {
        self.state.borrow()
    }

    pub(crate) fn state_mut(&self) -> RefMut<'_, PageState> {
        self.state.borrow_mut()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
