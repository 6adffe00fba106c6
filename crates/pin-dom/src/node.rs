//! DOM node representation.
//!
//! A `Node` holds its tree links (parent/children/siblings as `NodeId`s) plus
//! a `NodeData` variant. Element nodes keep their `id`, class list and inline
//! style parsed out of the corresponding attributes so the hot lookups
//! (selector matching, class tests) never re-split attribute strings.

use crate::NodeId;

/// DOM node - tree links plus node-specific data
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn detached(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::detached(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self::detached(NodeData::Text(content))
    }

    /// Create a comment node
    pub fn comment(content: String) -> Self {
        Self::detached(NodeData::Comment(content))
    }

    /// Create the document node
    pub fn document() -> Self {
        Self::detached(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Attribute name/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Tag name, lowercase
    pub tag: String,
    /// Attributes in document order
    pub attrs: Vec<Attribute>,
    /// Cached id attribute (very common lookup)
    pub id: Option<String>,
    /// Cached class list, parsed from the class attribute
    pub classes: Vec<String>,
    /// Inline style, keyed by resolved property name
    pub style: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            id: None,
            classes: Vec::new(),
            style: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Set an attribute, updating the id/class/style caches
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attrs.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" => {
                self.classes = value.split_whitespace().map(str::to_string).collect();
            }
            "style" => self.style = parse_inline_style(value),
            _ => {}
        }
    }

    /// Remove an attribute, returning the old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|a| a.name == name)?;
        let attr = self.attrs.remove(idx);
        match name {
            "id" => self.id = None,
            "class" => self.classes.clear(),
            "style" => self.style.clear(),
            _ => {}
        }
        Some(attr.value)
    }

    /// Check class membership
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class (no-op if already present)
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
            self.sync_class_attr();
        }
    }

    /// Remove a class (no-op if absent)
    pub fn remove_class(&mut self, class: &str) {
        if self.has_class(class) {
            self.classes.retain(|c| c != class);
            self.sync_class_attr();
        }
    }

    /// Toggle class membership
    pub fn toggle_class(&mut self, class: &str) {
        if self.has_class(class) {
            self.remove_class(class);
        } else {
            self.add_class(class);
        }
    }

    /// Read an inline style property by its resolved key
    pub fn style_get(&self, key: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Write an inline style property, keeping the style attribute in sync
    pub fn style_set(&mut self, key: &str, value: &str) {
        match self.style.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.style.push((key.to_string(), value.to_string())),
        }
        self.sync_style_attr();
    }

    /// Remove an inline style property
    pub fn style_remove(&mut self, key: &str) {
        self.style.retain(|(k, _)| k != key);
        self.sync_style_attr();
    }

    /// Re-key the inline style entries through a resolver. Declarations
    /// parsed out of a markup `style` attribute carry hyphenated names;
    /// the parser runs them through the engine's property resolution so
    /// lookups use one key form.
    pub fn rekey_style<F: FnMut(&str) -> String>(&mut self, mut resolver: F) {
        for entry in &mut self.style {
            entry.0 = resolver(&entry.0);
        }
    }

    fn sync_class_attr(&mut self) {
        let value = self.classes.join(" ");
        match self.attrs.iter_mut().find(|a| a.name == "class") {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attribute {
                name: "class".to_string(),
                value,
            }),
        }
    }

    fn sync_style_attr(&mut self) {
        let value = self
            .style
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ");
        match self.attrs.iter_mut().find(|a| a.name == "style") {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attribute {
                name: "style".to_string(),
                value,
            }),
        }
    }
}

fn parse_inline_style(value: &str) -> Vec<(String, String)> {
    value
        .split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let k = k.trim();
            let v = v.trim();
            if k.is_empty() || v.is_empty() {
                None
            } else {
                Some((k.to_string(), v.to_string()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_caches_id_and_classes() {
        let mut elem = ElementData::new("DIV");
        assert_eq!(elem.tag, "div");

        elem.set_attr("id", "main");
        elem.set_attr("class", "btn btn-primary");

        assert_eq!(elem.id.as_deref(), Some("main"));
        assert!(elem.has_class("btn"));
        assert!(elem.has_class("btn-primary"));
        assert!(!elem.has_class("btn-pri"));
    }

    #[test]
    fn test_remove_attr_clears_cache() {
        let mut elem = ElementData::new("div");
        elem.set_attr("class", "active");
        assert_eq!(elem.remove_attr("class"), Some("active".to_string()));
        assert!(!elem.has_class("active"));
        assert!(elem.remove_attr("class").is_none());
    }

    #[test]
    fn test_class_toggle_round_trips() {
        let mut elem = ElementData::new("div");
        elem.set_attr("class", "a b");

        elem.toggle_class("b");
        assert!(!elem.has_class("b"));
        elem.toggle_class("b");
        assert!(elem.has_class("b"));
        assert_eq!(elem.attr("class"), Some("a b"));
    }

    #[test]
    fn test_style_attribute_parsing() {
        let mut elem = ElementData::new("div");
        elem.set_attr("style", "width: 10px; color: red");

        assert_eq!(elem.style_get("width"), Some("10px"));
        assert_eq!(elem.style_get("color"), Some("red"));

        elem.style_set("width", "20px");
        assert_eq!(elem.style_get("width"), Some("20px"));
        assert_eq!(elem.attr("style"), Some("width: 20px; color: red"));

        elem.style_remove("color");
        assert!(elem.style_get("color").is_none());
    }
}
