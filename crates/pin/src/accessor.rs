//! Tagged accessors over attributes, classes, inline style and expando
//! properties.
//!
//! The string forms are `@name` for attributes, `.name` for classes,
//! `:name` for style and a bare `name` for properties stored on the page.
//! [`Key`] parses those forms once so the setters and getters dispatch on
//! an enum instead of re-sniffing the prefix at every element.

use pin_dom::NodeId;
use serde_json::Value;

use crate::Collection;

/// Which facet of an element an accessor touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// HTML attribute (`@href`)
    Attr(String),
    /// Class list entry (`.active`)
    Class(String),
    /// Inline style property (`:color`), resolved through the style
    /// registry so vendor-prefixed names work
    Style(String),
    /// Expando property kept on the page, off the markup (`count`)
    Prop(String),
}

impl Key {
    pub fn parse(s: &str) -> Key {
        match s.as_bytes().first() {
            Some(b'@') => Key::Attr(s[1..].to_string()),
            Some(b'.') => Key::Class(s[1..].to_string()),
            Some(b':') => Key::Style(pin_style::resolve(&s[1..])),
            _ => Key::Prop(s.to_string()),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Key {
        Key::parse(s)
    }
}

/// Stringify a value the way markup expects it: strings bare, the rest
/// as JSON text
fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Collection {
    /// Write one facet on every element. `None` removes an attribute,
    /// style property or expando; for a class it removes the class.
    ///
    /// Class values are verbs: `"remove"` drops the class, `"toggle"`
    /// flips it, any other value adds it.
    pub fn set<K: Into<Key>>(&self, key: K, value: Option<Value>) -> Collection {
        let key = key.into();
        for &node in self.nodes() {
            self.set_node(node, &key, value.as_ref());
        }
        self.page().collection(self.nodes().to_vec())
    }

    /// Write several facets at once from `(key, value)` pairs
    pub fn set_many<'a, I>(&self, entries: I) -> Collection
    where
        I: IntoIterator<Item = (&'a str, Option<Value>)>,
    {
        for (key, value) in entries {
            let key = Key::parse(key);
            for &node in self.nodes() {
                self.set_node(node, &key, value.as_ref());
            }
        }
        self.page().collection(self.nodes().to_vec())
    }

    /// Write one facet with a per-element value. The closure sees the
    /// element's index; `None` removes as in [`set`](Self::set).
    pub fn set_with<K, F>(&self, key: K, mut f: F) -> Collection
    where
        K: Into<Key>,
        F: FnMut(usize) -> Option<Value>,
    {
        let key = key.into();
        for (i, &node) in self.nodes().iter().enumerate() {
            let value = f(i);
            self.set_node(node, &key, value.as_ref());
        }
        self.page().collection(self.nodes().to_vec())
    }

    /// Read one facet from the first element. Class keys answer with a
    /// boolean; the others answer `None` when the facet is absent.
    pub fn get<K: Into<Key>>(&self, key: K) -> Option<Value> {
        let key = key.into();
        let node = self.first()?;
        match &key {
            Key::Attr(name) => {
                let state = self.page().state();
                let element = state.doc.tree().element(node)?;
                element.attr(name).map(|v| Value::String(v.to_string()))
            }
            Key::Class(name) => {
                let state = self.page().state();
                let has = state
                    .doc
                    .tree()
                    .element(node)
                    .is_some_and(|el| el.has_class(name));
                Some(Value::Bool(has))
            }
            Key::Style(name) => {
                let state = self.page().state();
                let element = state.doc.tree().element(node)?;
                element.style_get(name).map(|v| Value::String(v.to_string()))
            }
            Key::Prop(name) => {
                let state = self.page().state();
                state.props.get(&(node, name.clone())).cloned()
            }
        }
    }

    fn set_node(&self, node: NodeId, key: &Key, value: Option<&Value>) {
        let mut state = self.page().state_mut();
        match key {
            Key::Attr(name) => {
                let Some(element) = state.doc.tree_mut().element_mut(node) else {
                    return;
                };
                match value {
                    Some(v) => element.set_attr(name, &to_text(v)),
                    None => {
                        element.remove_attr(name);
                    }
                }
            }
            Key::Class(name) => {
                let Some(element) = state.doc.tree_mut().element_mut(node) else {
                    return;
                };
                match value.map(to_text).as_deref() {
                    None | Some("remove") => element.remove_class(name),
                    Some("toggle") => element.toggle_class(name),
                    Some(_) => element.add_class(name),
                }
            }
            Key::Style(name) => {
                let Some(element) = state.doc.tree_mut().element_mut(node) else {
                    return;
                };
                match value {
                    Some(v) => element.style_set(name, &to_text(v)),
                    None => element.style_remove(name),
                }
            }
            Key::Prop(name) => match value {
                Some(v) => {
                    state.props.insert((node, name.clone()), v.clone());
                }
                None => {
                    state.props.remove(&(node, name.clone()));
                }
            },
        }
    }
}
