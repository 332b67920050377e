//! Tree node and attribute types produced by the markup parser.

use std::fmt::Write;

/// Ordered attribute list.
///
/// Keys keep the case they were written with. A `None` value is a bare
/// attribute (`v-else`, `scoped`), which is distinct from an explicit empty
/// string only when serializing element attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, Option<String>)>,
}

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is present, with or without a value.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Value of `key`; bare attributes read as `""`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    /// Insert or replace `key`, keeping its original position when replacing.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Write ` k="v"` for valued and ` k` for bare entries.
    pub(crate) fn write_markup(&self, out: &mut String) {
        for (key, value) in self.iter() {
            match value {
                Some(value) => write_pair(out, key, value),
                None => {
                    out.push(' ');
                    out.push_str(key);
                }
            }
        }
    }

    /// Write ` k="v"` for every entry, bare ones as `k=""`.
    pub(crate) fn write_markup_valued(&self, out: &mut String) {
        for (key, value) in self.iter() {
            write_pair(out, key, value.unwrap_or(""));
        }
    }
}

/// Double quotes unless the value holds `"` and no `'`. A value holding both
/// is double quoted with `"` written as `&quot;`.
fn write_pair(out: &mut String, key: &str, value: &str) {
    if !value.contains('"') {
        let _ = write!(out, " {key}=\"{value}\"");
    } else if !value.contains('\'') {
        let _ = write!(out, " {key}='{value}'");
    } else {
        let _ = write!(out, " {key}=\"{}\"", value.replace('"', "&quot;"));
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.insert(k, Some(v.into()));
        }
        attrs
    }
}

/// A node of a parsed template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Attributes,
    pub children: Vec<Node>,
    /// Written as `<name/>` in the source.
    pub self_closing: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Attributes::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key, Some(value.into()));
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn retag(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}
