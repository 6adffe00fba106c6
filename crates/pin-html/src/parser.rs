//! HTML5 parser implementation.
//!
//! Uses html5ever's built-in RcDom and converts the result into the arena
//! tree. This is simpler and more reliable than implementing TreeSink
//! directly.

use html5ever::tendril::TendrilSink;
use html5ever::{ns, parse_document, parse_fragment, LocalName, QualName};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use pin_dom::{Document, DomTree, NodeId};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse an HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut document = Document::empty();
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root);
        document.finalize();

        tracing::debug!(nodes = document.tree().len(), "parsed document");
        document
    }

    /// Parse an HTML fragment into an existing tree as detached nodes.
    ///
    /// The fragment's root tag picks the parse context through a fixed
    /// lookup table; anything unrecognized parses inside a plain div.
    pub fn parse_fragment_into(&self, tree: &mut DomTree, html: &str) -> Vec<NodeId> {
        let context = fragment_context(html);
        let dom = parse_fragment(
            RcDom::default(),
            Default::default(),
            QualName::new(None, ns!(html), LocalName::from(context)),
            Vec::new(),
            false,
        )
        .one(html);

        // The fragment parser wraps its output in a synthetic <html>
        // element; the fragment's own nodes are that element's children.
        let mut roots = Vec::new();
        for child in dom.document.children.borrow().iter() {
            if let RcNodeData::Element { .. } = &child.data {
                for fragment_child in child.children.borrow().iter() {
                    if let Some(id) = self.convert_node(fragment_child, tree, NodeId::NONE) {
                        roots.push(id);
                    }
                }
            }
        }

        tracing::debug!(context, roots = roots.len(), "parsed fragment");
        roots
    }

    /// Convert an RcDom node into the arena, appending under `parent`
    /// (or leaving it detached when `parent` is NONE). Returns the new id
    /// for nodes that produce one.
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> Option<NodeId> {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
                None
            }
            RcNodeData::Doctype {
                name,
                public_id,
                system_id,
            } => {
                let id = tree.push(pin_dom::Node {
                    parent: NodeId::NONE,
                    first_child: NodeId::NONE,
                    last_child: NodeId::NONE,
                    prev_sibling: NodeId::NONE,
                    next_sibling: NodeId::NONE,
                    data: pin_dom::NodeData::Doctype {
                        name: name.to_string(),
                        public_id: public_id.to_string(),
                        system_id: system_id.to_string(),
                    },
                });
                self.attach(tree, parent, id);
                Some(id)
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if text.trim().is_empty() {
                    return None;
                }
                let id = tree.create_text(&text);
                self.attach(tree, parent, id);
                Some(id)
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                self.attach(tree, parent, id);
                Some(id)
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                if let Some(elem) = tree.element_mut(id) {
                    for attr in attrs.borrow().iter() {
                        elem.set_attr(&attr.name.local, &attr.value);
                    }
                    // Markup style declarations arrive hyphenated; store
                    // them under the engine's resolved property keys.
                    elem.rekey_style(pin_style::resolve);
                }
                self.attach(tree, parent, id);
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id);
                }
                Some(id)
            }
            RcNodeData::ProcessingInstruction { .. } => None,
        }
    }

    fn attach(&self, tree: &mut DomTree, parent: NodeId, child: NodeId) {
        if parent.is_valid() {
            // Freshly created nodes cannot produce hierarchy errors.
            let _ = tree.append_child(parent, child);
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the fragment parse context from the fragment's root tag.
///
/// Table rows and cells only parse inside their proper containers; the
/// default context is a plain div.
fn fragment_context(html: &str) -> &'static str {
    let trimmed = html.trim_start();
    let tag: String = trimmed
        .strip_prefix('<')
        .map(|rest| {
            rest.chars()
                .take_while(|c| c.is_ascii_alphanumeric())
                .collect()
        })
        .unwrap_or_default();

    match tag.to_ascii_lowercase().as_str() {
        "thead" | "tbody" | "tfoot" => "table",
        "tr" => "tbody",
        "td" | "th" => "tr",
        _ => "div",
    }
}
