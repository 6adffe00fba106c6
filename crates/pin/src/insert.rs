//! Structural mutation: inserting, replacing, wrapping and removing nodes.
//!
//! Content is positional, not cloned. A single content node moves to its
//! new place, so inserting it at several targets leaves it under the last
//! one. Empty collections and detached targets no-op.

use pin_dom::NodeId;
use tracing::debug;

use crate::Collection;

/// What an insertion method accepts: a fragment string or nodes already
/// held in a collection
pub enum Content<'a> {
    Html(&'a str),
    Collection(&'a Collection),
}

impl<'a> From<&'a str> for Content<'a> {
    fn from(html: &'a str) -> Self {
        Content::Html(html)
    }
}

impl<'a> From<&'a Collection> for Content<'a> {
    fn from(collection: &'a Collection) -> Self {
        Content::Collection(collection)
    }
}

impl Collection {
    /// Insert the content as the last child of every element
    pub fn append<'a, C: Into<Content<'a>>>(&self, content: C) -> Collection {
        let Some(node) = self.resolve(content.into()) else {
            return self.page().collection(self.nodes().to_vec());
        };
        for &target in self.nodes() {
            let mut state = self.page().state_mut();
            if let Err(err) = state.doc.tree_mut().append_child(target, node) {
                debug!(?err, "append skipped");
            }
        }
        self.page().collection(self.nodes().to_vec())
    }

    /// Insert the content as the first child of every element
    pub fn prepend<'a, C: Into<Content<'a>>>(&self, content: C) -> Collection {
        let Some(node) = self.resolve(content.into()) else {
            return self.page().collection(self.nodes().to_vec());
        };
        for &target in self.nodes() {
            let mut state = self.page().state_mut();
            let first = state.doc.tree().children(target).next();
            if let Err(err) = state.doc.tree_mut().insert_before(target, node, first) {
                debug!(?err, "prepend skipped");
            }
        }
        self.page().collection(self.nodes().to_vec())
    }

    /// Insert the content as the previous sibling of every element
    pub fn before<'a, C: Into<Content<'a>>>(&self, content: C) -> Collection {
        let Some(node) = self.resolve(content.into()) else {
            return self.page().collection(self.nodes().to_vec());
        };
        for &target in self.nodes() {
            self.insert_beside(node, target, true);
        }
        self.page().collection(self.nodes().to_vec())
    }

    /// Insert the content as the next sibling of every element
    pub fn after<'a, C: Into<Content<'a>>>(&self, content: C) -> Collection {
        let Some(node) = self.resolve(content.into()) else {
            return self.page().collection(self.nodes().to_vec());
        };
        for &target in self.nodes() {
            self.insert_beside(node, target, false);
        }
        self.page().collection(self.nodes().to_vec())
    }

    /// Swap every element for the content
    pub fn replace<'a, C: Into<Content<'a>>>(&self, content: C) -> Collection {
        self.before(content);
        self.remove()
    }

    /// Put each element inside the content's innermost descendant: the
    /// wrapper goes where the element was, then the element is appended
    /// down the wrapper's first-child chain
    pub fn wrap<'a, C: Into<Content<'a>>>(&self, content: C) -> Collection {
        let Some(wrapper) = self.resolve(content.into()) else {
            return self.page().collection(self.nodes().to_vec());
        };
        for &target in self.nodes() {
            self.insert_beside(wrapper, target, true);
            let mut state = self.page().state_mut();
            let tree = state.doc.tree_mut();
            let mut innermost = wrapper;
            while let Some(child) = tree.child_elements(innermost).next() {
                innermost = child;
            }
            if let Err(err) = tree.append_child(innermost, target) {
                debug!(?err, "wrap skipped");
            }
        }
        self.page().collection(self.nodes().to_vec())
    }

    /// Detach every element from the tree. The nodes stay alive in the
    /// arena, so a held collection can re-insert them later.
    pub fn remove(&self) -> Collection {
        let mut state = self.page().state_mut();
        for &node in self.nodes() {
            state.doc.tree_mut().detach(node);
        }
        drop(state);
        self.page().collection(self.nodes().to_vec())
    }

    /// First node of the content, parsing fragments on demand
    fn resolve(&self, content: Content<'_>) -> Option<NodeId> {
        match content {
            Content::Html(html) => self.page().query(html).first(),
            Content::Collection(collection) => collection.first(),
        }
    }

    fn insert_beside(&self, node: NodeId, target: NodeId, before: bool) {
        let mut state = self.page().state_mut();
        let tree = state.doc.tree_mut();
        let Some(parent) = tree.parent(target) else {
            debug!("sibling insertion skipped, target is detached");
            return;
        };
        let reference = if before {
            Some(target)
        } else {
            tree.next_sibling(target)
        };
        if let Err(err) = tree.insert_before(parent, node, reference) {
            debug!(?err, "sibling insertion skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Page;

    fn tags_of_children(page: &Page, selector: &str) -> Vec<String> {
        let parent = page.query(selector).first().unwrap();
        let state = page.state();
        let tree = state.doc.tree();
        tree.child_elements(parent)
            .map(|c| tree.element(c).unwrap().tag.clone())
            .collect()
    }

    #[test]
    fn test_append_and_prepend() {
        let page = Page::from_html("<ul><li>a</li></ul>");
        let list = page.query("ul");
        list.append("<p>end</p>");
        list.prepend("<i>start</i>");
        assert_eq!(tags_of_children(&page, "ul"), vec!["i", "li", "p"]);
    }

    #[test]
    fn test_before_and_after() {
        let page = Page::from_html("<div><span>x</span></div>");
        let span = page.query("span");
        span.before("<b>b</b>");
        span.after("<i>i</i>");
        assert_eq!(tags_of_children(&page, "div"), vec!["b", "span", "i"]);
    }

    #[test]
    fn test_append_existing_collection_moves_it() {
        let page = Page::from_html("<div id='a'><span>x</span></div><div id='b'></div>");
        let span = page.query("span");
        page.query("#b").append(&span);
        assert_eq!(page.query("#a span").len(), 0);
        assert_eq!(page.query("#b span").len(), 1);
    }

    #[test]
    fn test_multi_target_insert_lands_on_last() {
        let page = Page::from_html("<div id='a'></div><div id='b'></div>");
        page.query("div").append("<em>x</em>");
        assert_eq!(page.query("#a em").len(), 0);
        assert_eq!(page.query("#b em").len(), 1);
    }

    #[test]
    fn test_replace() {
        let page = Page::from_html("<div><span>old</span></div>");
        page.query("span").replace("<b>new</b>");
        assert_eq!(page.query("span").len(), 0);
        assert_eq!(tags_of_children(&page, "div"), vec!["b"]);
    }

    #[test]
    fn test_wrap_descends_to_innermost() {
        let page = Page::from_html("<div><span>x</span></div>");
        page.query("span").wrap("<section><article></article></section>");
        assert_eq!(page.query("div > section > article > span").len(), 1);
    }

    #[test]
    fn test_remove_keeps_nodes_alive() {
        let page = Page::from_html("<div><span>x</span></div>");
        let span = page.query("span");
        span.remove();
        assert_eq!(page.query("span").len(), 0);
        page.query("div").append(&span);
        assert_eq!(page.query("div span").len(), 1);
    }

    #[test]
    fn test_insert_beside_self_leaves_tree_intact() {
        let page = Page::from_html("<div><span>x</span><b>y</b></div>");
        let span = page.query("span");
        span.before(&span);
        assert_eq!(page.query("div > *").len(), 2);
        span.after(&span);
        assert_eq!(tags_of_children(&page, "div"), vec!["span", "b"]);
    }

    #[test]
    fn test_empty_collection_no_ops() {
        let page = Page::from_html("<div></div>");
        page.query(".missing").append("<p>x</p>");
        page.query("div").append(&page.query(".missing"));
        assert_eq!(page.query("p").len(), 0);
    }
}
