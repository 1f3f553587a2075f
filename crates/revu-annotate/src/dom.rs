//! Minimal owned element tree.
//!
//! The annotation API operates on individually rendered diff lines, not
//! a full document. This module carries exactly the surface those
//! operations need: tagged elements with attributes, a class list, and
//! ordered mixed text/element children.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// One node in the tree: a run of text or a nested element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A run of text.
    Text(String),
    /// A nested element.
    Element(Element),
}

impl Node {
    /// Length in characters of the flattened text under this node.
    #[must_use]
    pub fn text_len(&self) -> usize {
        match self {
            Self::Text(s) => s.chars().count(),
            Self::Element(el) => el.text_len(),
        }
    }
}

/// An element node: tag, attributes, class list, and ordered children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// The element's tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value, if set.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Whether the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add `class` to the class list. Idempotent, like `classList.add`.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// The class list, in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Child nodes, in document order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Mutable access to the children, for the annotator.
    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Append a run of text.
    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Append a child element.
    pub fn append_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// The flattened text under this element.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Length in characters of the flattened text.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.children
            .iter()
            .fold(0usize, |acc, node| acc.saturating_add(node.text_len()))
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for node in &element.children {
        match node {
            Node::Text(s) => out.push_str(s),
            Node::Element(el) => collect_text(el, out),
        }
    }
}

/// Shared handle to an element, with document-reference semantics.
///
/// Handles are cheap to clone and are what crosses the plugin boundary.
/// A poisoned lock is treated as an absent element: accessors return
/// `None` or no-op instead of panicking, matching the rule that nothing
/// in the annotation API throws toward plugin code.
#[derive(Debug, Clone, Default)]
pub struct ElementRef(Arc<RwLock<Element>>);

impl ElementRef {
    /// Wrap an element in a shared handle.
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self(Arc::new(RwLock::new(element)))
    }

    /// Run `f` against the element, if the handle is readable.
    pub fn with<R>(&self, f: impl FnOnce(&Element) -> R) -> Option<R> {
        self.0.read().ok().map(|guard| f(&guard))
    }

    /// Run `f` against the element mutably, if the handle is writable.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
        self.0.write().ok().map(|mut guard| f(&mut guard))
    }

    /// The flattened text under the element.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.with(Element::text_content).unwrap_or_default()
    }

    /// Attribute value, if set.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.with(|el| el.attribute(name).map(str::to_string))
            .flatten()
    }

    /// Whether the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.with(|el| el.has_class(class)).unwrap_or(false)
    }

    /// Add `class` to the class list. Idempotent.
    pub fn add_class(&self, class: &str) {
        let _ = self.with_mut(|el| el.add_class(class));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_flattens_nested_children() {
        let mut inner = Element::new("hl");
        inner.append_text("cd");

        let mut el = Element::new("div");
        el.append_text("ab");
        el.append_child(inner);
        el.append_text("ef");

        assert_eq!(el.text_content(), "abcdef");
        assert_eq!(el.text_len(), 6);
    }

    #[test]
    fn add_class_is_idempotent() {
        let mut el = Element::new("td");
        el.add_class("right");
        el.add_class("right");
        assert_eq!(el.classes(), ["right"]);
    }

    #[test]
    fn attributes_replace() {
        let mut el = Element::new("div");
        el.set_attribute("data-side", "left");
        el.set_attribute("data-side", "right");
        assert_eq!(el.attribute("data-side"), Some("right"));
        assert_eq!(el.attribute("missing"), None);
    }

    #[test]
    fn handle_shares_one_element() {
        let handle = ElementRef::new(Element::new("div"));
        let other = handle.clone();
        handle.add_class("x");
        assert!(other.has_class("x"));
    }

    #[test]
    fn text_len_counts_characters_not_bytes() {
        let mut el = Element::new("div");
        el.append_text("héllo");
        assert_eq!(el.text_len(), 5);
    }
}
