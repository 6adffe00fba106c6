//! Document - high-level document API

use crate::{DomTree, NodeId};

/// HTML document: a tree plus cached references to the structural elements
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Cached reference to the <html> element
    html_element: NodeId,
    /// Cached reference to the <head> element
    head_element: NodeId,
    /// Cached reference to the <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with the basic html/head/body structure
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // These are freshly created nodes, insertion cannot fail.
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document with no structure (used by the parser)
    pub fn empty() -> Self {
        Self {
            tree: DomTree::new(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html/head/body after the parser has filled in the tree
    pub fn finalize(&mut self) {
        for id in self.tree.descendant_elements(self.tree.root()) {
            let Some(elem) = self.tree.element(id) else { continue };
            match elem.tag.as_str() {
                "html" if !self.html_element.is_valid() => self.html_element = id,
                "head" if !self.head_element.is_valid() => self.head_element = id,
                "body" if !self.body_element.is_valid() => self.body_element = id,
                _ => {}
            }
        }
        tracing::debug!(
            nodes = self.tree.len(),
            has_body = self.body_element.is_valid(),
            "document finalized"
        );
    }

    /// Get the <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get the <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get the <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get an element by id
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendant_elements(self.tree.root())
            .find(|&n| {
                self.tree
                    .element(n)
                    .and_then(|e| e.id.as_deref())
                    .is_some_and(|v| v == id)
            })
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.tree.len())
            .finish()
    }
}
