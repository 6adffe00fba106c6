//! Collection - an ordered list of element handles with chainable
//! operations.

use pin_css::SelectorList;
use pin_dom::{uniq, NodeId};

use crate::Page;

/// An ordered collection of DOM element references.
///
/// Collections are cheap to clone and never mutated in place: every
/// traversal or mutation operation returns a new one.
#[derive(Clone)]
pub struct Collection {
    page: Page,
    nodes: Vec<NodeId>,
}

impl Collection {
    pub(crate) fn new(page: Page, nodes: Vec<NodeId>) -> Self {
        Self { page, nodes }
    }

    /// The page this collection belongs to
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The node ids, in collection order
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at `index`; negative indices count from the end
    pub fn get_node(&self, index: isize) -> Option<NodeId> {
        let len = self.nodes.len() as isize;
        let index = if index < 0 { index + len } else { index };
        if (0..len).contains(&index) {
            Some(self.nodes[index as usize])
        } else {
            None
        }
    }

    /// First node, if any
    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Call `f` with each (index, node) pair, returning the collection
    /// for chaining
    pub fn each<F: FnMut(usize, NodeId)>(&self, mut f: F) -> &Self {
        for (i, &node) in self.nodes.iter().enumerate() {
            f(i, node);
        }
        self
    }

    /// Map each node through `f`, dropping the `None`s
    pub fn map<F: FnMut(usize, NodeId) -> Option<NodeId>>(&self, mut f: F) -> Collection {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(i, &node)| f(i, node))
            .collect();
        self.page.collection(nodes)
    }

    /// Descendants of the collection's elements matching a selector,
    /// de-duplicated
    pub fn find(&self, selector: &str) -> Collection {
        let Some(list) = parse_selector(selector) else {
            return self.page.collection(Vec::new());
        };
        let state = self.page.state();
        let tree = state.doc.tree();
        let mut out = Vec::new();
        for &node in &self.nodes {
            out.extend(pin_css::query(tree, node, &list));
        }
        drop(state);
        self.page.collection(uniq(out))
    }

    /// Check a single node against a parsed selector
    #[cfg(feature = "extended")]
    pub(crate) fn node_matches(&self, node: NodeId, list: &SelectorList) -> bool {
        pin_css::matches(self.page.state().doc.tree(), node, list)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Collection").field(&self.nodes).finish()
    }
}

/// Parse a selector, logging and discarding failures (the permissive
/// policy: a selector that does not parse matches nothing)
pub(crate) fn parse_selector(selector: &str) -> Option<SelectorList> {
    match pin_css::parse(selector) {
        Ok(list) => Some(list),
        Err(error) => {
            tracing::debug!(selector, %error, "ignoring unparsable selector");
            None
        }
    }
}
