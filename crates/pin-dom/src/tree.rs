//! DOM tree (arena-based allocation).
//!
//! Structural mutation keeps the sibling/child links consistent; a node is
//! always unlinked from its old position before being inserted somewhere
//! else, so "inserting" an attached node moves it.

use crate::{DomError, DomResult, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree containing only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by id
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_valid() {
            self.nodes.get(id.0 as usize)
        } else {
            None
        }
    }

    /// Get a mutable node by id
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_valid() {
            self.nodes.get_mut(id.0 as usize)
        } else {
            None
        }
    }

    /// Number of nodes in the arena (detached nodes included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node, returning its id
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    /// Element data of a node, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&crate::ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Mutable element data of a node
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut crate::ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id)?.parent;
        parent.is_valid().then_some(parent)
    }

    /// Next sibling, if any
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let next = self.get(id)?.next_sibling;
        next.is_valid().then_some(next)
    }

    /// Previous sibling, if any
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let prev = self.get(id)?.prev_sibling;
        prev.is_valid().then_some(prev)
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `new_child` into `parent` before `reference` (or at the end)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        if self.get(parent).is_none() || self.get(new_child).is_none() {
            return Err(DomError::NotFound);
        }
        match self.get(parent).map(|n| &n.data) {
            Some(NodeData::Text(_)) | Some(NodeData::Comment(_)) | Some(NodeData::Doctype { .. }) => {
                return Err(DomError::InvalidNodeType);
            }
            _ => {}
        }
        // The parent chain must not pass through the node being inserted.
        if parent == new_child || self.is_ancestor(new_child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        if let Some(r) = reference {
            if self.get(r).map(|n| n.parent) != Some(parent) {
                return Err(DomError::NotAChild);
            }
        }
        // Inserting a node before itself would link it to itself.
        if reference == Some(new_child) {
            return Ok(new_child);
        }

        self.detach(new_child);

        match reference {
            Some(r) => {
                let prev = self.nodes[r.0 as usize].prev_sibling;
                {
                    let node = &mut self.nodes[new_child.0 as usize];
                    node.parent = parent;
                    node.prev_sibling = prev;
                    node.next_sibling = r;
                }
                self.nodes[r.0 as usize].prev_sibling = new_child;
                if prev.is_valid() {
                    self.nodes[prev.0 as usize].next_sibling = new_child;
                } else {
                    self.nodes[parent.0 as usize].first_child = new_child;
                }
            }
            None => {
                let last = self.nodes[parent.0 as usize].last_child;
                {
                    let node = &mut self.nodes[new_child.0 as usize];
                    node.parent = parent;
                    node.prev_sibling = last;
                    node.next_sibling = NodeId::NONE;
                }
                if last.is_valid() {
                    self.nodes[last.0 as usize].next_sibling = new_child;
                } else {
                    self.nodes[parent.0 as usize].first_child = new_child;
                }
                self.nodes[parent.0 as usize].last_child = new_child;
            }
        }
        Ok(new_child)
    }

    /// Unlink a node from its parent. No-op for detached or unknown nodes;
    /// the node and its subtree stay alive in the arena.
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else {
            self.nodes[parent.0 as usize].last_child = prev;
        }

        let node = &mut self.nodes[id.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Check whether `ancestor` is an ancestor of `node`
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// Children of a node, in document order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE),
        }
    }

    /// Element children of a node
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(move |&c| self.get(c).is_some_and(Node::is_element))
    }

    /// Ancestors of a node, nearest first (the document node included)
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).map(|n| n.parent).unwrap_or(NodeId::NONE),
        }
    }

    /// Descendants of a node in pre-order, the node itself excluded
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack = Vec::new();
        if let Some(node) = self.get(id) {
            let mut child = node.last_child;
            while child.is_valid() {
                stack.push(child);
                child = self.nodes[child.0 as usize].prev_sibling;
            }
        }
        Descendants { tree: self, stack }
    }

    /// Descendant elements of a node in pre-order
    pub fn descendant_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(id)
            .filter(move |&d| self.get(d).is_some_and(Node::is_element))
    }

    /// Concatenated text of a node's subtree
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            out.push_str(text);
        }
        for d in self.descendants(id) {
            if let Some(text) = self.get(d).and_then(Node::as_text) {
                out.push_str(text);
            }
        }
        out
    }

    /// Position of a node among its parent's element children
    pub fn element_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.child_elements(parent).position(|c| c == id)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map(|n| n.next_sibling).unwrap_or(NodeId::NONE);
        Some(current)
    }
}

/// Iterator over a node's ancestors, nearest first
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map(|n| n.parent).unwrap_or(NodeId::NONE);
        Some(current)
    }
}

/// Pre-order iterator over a node's descendants
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        if let Some(node) = self.tree.get(current) {
            let mut child = node.last_child;
            while child.is_valid() {
                self.stack.push(child);
                child = self.tree.get(child).map(|n| n.prev_sibling).unwrap_or(NodeId::NONE);
            }
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let parent = tree.create_element("ul");
        let a = tree.create_element("li");
        let b = tree.create_element("li");
        tree.append_child(tree.root(), parent).unwrap();
        tree.append_child(parent, a).unwrap();
        tree.append_child(parent, b).unwrap();
        (tree, parent, a, b)
    }

    #[test]
    fn test_append_links_siblings() {
        let (tree, parent, a, b) = sample();
        assert_eq!(tree.children(parent).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(tree.next_sibling(a), Some(b));
        assert_eq!(tree.prev_sibling(b), Some(a));
        assert_eq!(tree.parent(a), Some(parent));
    }

    #[test]
    fn test_insert_before_reference() {
        let (mut tree, parent, a, b) = sample();
        let c = tree.create_element("li");
        tree.insert_before(parent, c, Some(b)).unwrap();
        assert_eq!(tree.children(parent).collect::<Vec<_>>(), vec![a, c, b]);
    }

    #[test]
    fn test_insert_before_self_is_a_no_op() {
        let (mut tree, parent, a, b) = sample();
        tree.insert_before(parent, a, Some(a)).unwrap();
        assert_eq!(tree.children(parent).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(tree.next_sibling(a), Some(b));
        assert_eq!(tree.prev_sibling(a), None);
    }

    #[test]
    fn test_insert_moves_attached_node() {
        let (mut tree, parent, a, b) = sample();
        // Re-inserting `a` at the end moves it rather than duplicating it.
        tree.append_child(parent, a).unwrap();
        assert_eq!(tree.children(parent).collect::<Vec<_>>(), vec![b, a]);
    }

    #[test]
    fn test_detach_unlinks() {
        let (mut tree, parent, a, b) = sample();
        tree.detach(a);
        assert_eq!(tree.children(parent).collect::<Vec<_>>(), vec![b]);
        assert_eq!(tree.parent(a), None);
        // Detaching again is a no-op.
        tree.detach(a);
        assert_eq!(tree.children(parent).collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let (mut tree, parent, a, _b) = sample();
        assert_eq!(
            tree.append_child(a, parent),
            Err(DomError::HierarchyRequest)
        );
        assert_eq!(tree.append_child(a, a), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_text_parent_is_rejected() {
        let (mut tree, _parent, a, _b) = sample();
        let t = tree.create_text("hi");
        let other = tree.create_element("span");
        assert_eq!(
            tree.append_child(t, other),
            Err(DomError::InvalidNodeType)
        );
        assert!(tree.append_child(a, t).is_ok());
    }

    #[test]
    fn test_descendants_pre_order() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let p = tree.create_element("p");
        let span = tree.create_element("span");
        let em = tree.create_element("em");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, p).unwrap();
        tree.append_child(p, span).unwrap();
        tree.append_child(div, em).unwrap();

        let order: Vec<_> = tree.descendants(div).collect();
        assert_eq!(order, vec![p, span, em]);
    }

    #[test]
    fn test_text_content() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let hello = tree.create_text("hello ");
        let b = tree.create_element("b");
        let world = tree.create_text("world");
        tree.append_child(div, hello).unwrap();
        tree.append_child(div, b).unwrap();
        tree.append_child(b, world).unwrap();

        assert_eq!(tree.text_content(div), "hello world");
    }

    #[test]
    fn test_element_index() {
        let (mut tree, parent, a, b) = sample();
        let text = tree.create_text("x");
        tree.insert_before(parent, text, Some(b)).unwrap();
        // Text nodes do not count.
        assert_eq!(tree.element_index(a), Some(0));
        assert_eq!(tree.element_index(b), Some(1));
    }
}
