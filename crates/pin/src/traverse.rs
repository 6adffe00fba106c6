//! Traversal operations: walking the live tree from a collection.
//!
//! All of these de-duplicate their results where the same element can be
//! reached through several paths, and all of them treat an unparsable
//! selector as matching nothing.

use std::ops::RangeBounds;

use pin_dom::{uniq, NodeId};

use crate::collection::parse_selector;
use crate::Collection;

impl Collection {
    /// The nearest ancestor level with a match: immediate parents, or with
    /// a selector, the closest level where it matched anything. The
    /// document node itself is never returned.
    pub fn parent(&self, selector: Option<&str>) -> Collection {
        self.parents_impl(selector, true)
    }

    /// All ancestors (nearest level first), optionally filtered
    pub fn parents(&self, selector: Option<&str>) -> Collection {
        self.parents_impl(selector, false)
    }

    fn parents_impl(&self, selector: Option<&str>, first_only: bool) -> Collection {
        let list = match selector {
            Some(s) => match parse_selector(s) {
                Some(list) => Some(list),
                None => return self.page().collection(Vec::new()),
            },
            None => None,
        };

        let state = self.page().state();
        let tree = state.doc.tree();
        let root = tree.root();

        let mut found: Vec<NodeId> = Vec::new();
        let mut level: Vec<NodeId> = self.nodes().to_vec();
        while !level.is_empty() {
            let mut next: Vec<NodeId> = Vec::new();
            for &node in &level {
                let Some(parent) = tree.parent(node) else { continue };
                if parent == root || next.contains(&parent) {
                    continue;
                }
                let matched = list
                    .as_ref()
                    .map_or(true, |l| pin_css::matches(tree, parent, l));
                if matched && !found.contains(&parent) {
                    found.push(parent);
                }
                next.push(parent);
            }
            if first_only && !found.is_empty() {
                break;
            }
            level = next;
        }
        drop(state);
        self.page().collection(found)
    }

    /// Per element, the nearest self-or-ancestor matching the selector
    pub fn closest(&self, selector: &str) -> Collection {
        let Some(list) = parse_selector(selector) else {
            return self.page().collection(Vec::new());
        };
        let state = self.page().state();
        let tree = state.doc.tree();
        let root = tree.root();

        let mut out = Vec::new();
        for &node in self.nodes() {
            let hit = std::iter::once(node)
                .chain(tree.ancestors(node))
                .take_while(|&n| n != root)
                .find(|&n| pin_css::matches(tree, n, &list));
            if let Some(hit) = hit {
                out.push(hit);
            }
        }
        drop(state);
        self.page().collection(uniq(out))
    }

    /// Element children, optionally filtered by a selector
    pub fn children(&self, selector: Option<&str>) -> Collection {
        let list = match selector {
            Some(s) => match parse_selector(s) {
                Some(list) => Some(list),
                None => return self.page().collection(Vec::new()),
            },
            None => None,
        };

        let state = self.page().state();
        let tree = state.doc.tree();
        let mut out = Vec::new();
        for &node in self.nodes() {
            for child in tree.child_elements(node) {
                let matched = list
                    .as_ref()
                    .map_or(true, |l| pin_css::matches(tree, child, l));
                if matched {
                    out.push(child);
                }
            }
        }
        drop(state);
        self.page().collection(uniq(out))
    }

    /// Single-element collection at `index` (negative counts from the end)
    pub fn eq(&self, index: isize) -> Collection {
        let nodes = self.get_node(index).map(|n| vec![n]).unwrap_or_default();
        self.page().collection(nodes)
    }

    /// A sub-collection over the given range
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Collection {
        let len = self.len();
        let start = match range.start_bound() {
            std::ops::Bound::Included(&s) => s,
            std::ops::Bound::Excluded(&s) => s + 1,
            std::ops::Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            std::ops::Bound::Included(&e) => e + 1,
            std::ops::Bound::Excluded(&e) => e,
            std::ops::Bound::Unbounded => len,
        };
        let start = start.min(len);
        let end = end.min(len).max(start);
        self.page().collection(self.nodes()[start..end].to_vec())
    }

    /// Position of a node within this collection
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.nodes().iter().position(|&n| n == node)
    }

    /// Whether any element has a descendant matching the selector
    pub fn has(&self, selector: &str) -> bool {
        !self.find(selector).is_empty()
    }

    /// Whether any element itself matches the selector
    pub fn is(&self, selector: &str) -> bool {
        let Some(list) = parse_selector(selector) else {
            return false;
        };
        self.nodes().iter().any(|&n| self.node_matches(n, &list))
    }
}
