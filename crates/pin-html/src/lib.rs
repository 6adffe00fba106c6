//! Pin HTML - HTML parsing built on html5ever.
//!
//! Two entry points: full documents, and fragments parsed inside the
//! container context their root tag requires (a `<tr>` fragment is only
//! valid HTML inside a `<tbody>`, and so on).

mod parser;

pub use parser::HtmlParser;

use pin_dom::{Document, DomTree, NodeId};

/// Parse a full HTML document
pub fn parse_document(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Parse an HTML fragment into `tree` as detached nodes, returning the
/// top-level node ids in document order
pub fn parse_fragment_into(tree: &mut DomTree, html: &str) -> Vec<NodeId> {
    HtmlParser::new().parse_fragment_into(tree, html)
}
