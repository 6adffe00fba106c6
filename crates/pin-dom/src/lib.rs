//! Pin DOM - the in-memory document tree the Pin collection API operates on.
//!
//! Nodes live in a flat arena and reference each other through `NodeId`
//! indices, so a "reference to an element" is a cheap copyable handle rather
//! than a borrow into the tree.

mod document;
mod node;
mod tree;

pub use document::Document;
pub use node::{Attribute, ElementData, Node, NodeData};
pub use tree::DomTree;

/// Node identifier (index into the tree arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);
    /// The document node, always at index 0
    pub const ROOT: NodeId = NodeId(0);

    /// Check whether this id refers to a node at all
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node not found")]
    NotFound,
    #[error("node is not a child of the given parent")]
    NotAChild,
    #[error("operation would make a node its own ancestor")]
    HierarchyRequest,
    #[error("node cannot have children")]
    InvalidNodeType,
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// Order-preserving de-duplication of a node list.
///
/// Traversal operations that can reach the same element through several
/// paths (`find`, `parents`, `closest`) run their results through this.
pub fn uniq(nodes: Vec<NodeId>) -> Vec<NodeId> {
    let mut seen = std::collections::HashSet::with_capacity(nodes.len());
    nodes.into_iter().filter(|n| seen.insert(*n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniq_preserves_order() {
        let nodes = vec![NodeId(3), NodeId(1), NodeId(3), NodeId(2), NodeId(1)];
        assert_eq!(uniq(nodes), vec![NodeId(3), NodeId(1), NodeId(2)]);
    }

    #[test]
    fn test_none_is_not_valid() {
        assert!(!NodeId::NONE.is_valid());
        assert!(NodeId::ROOT.is_valid());
    }
}
