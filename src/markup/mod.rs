//! Generic markup elements and their textual encoding.
//!
//! An [`Element`] is the pivot between the department tree and the text
//! stored in the database: a tag, an insertion-ordered attribute list, and an
//! ordered list of child elements. The model carries no text nodes.

mod reader;
mod writer;

/// A markup element: tag name, ordered attributes, ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    /// Create an element with no attributes and no children.
    pub fn new(tag: impl Into<String>) -> Self {
        Element { tag: tag.into(), attributes: Vec::new(), children: Vec::new() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Set an attribute, replacing the value if the name is already present.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Builder form of [`Element::set_attribute`].
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Builder form of [`Element::push_child`].
    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_keep_insertion_order() {
        let element = Element::new("node")
            .with_attribute("b", "2")
            .with_attribute("a", "1");
        let names: Vec<&str> = element.attributes().map(|(n, _)| n).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn set_attribute_replaces_in_place() {
        let mut element = Element::new("node");
        element.set_attribute("name", "old");
        element.set_attribute("name", "new");
        assert_eq!(element.attribute("name"), Some("new"));
        assert_eq!(element.attributes().count(), 1);
    }

    #[test]
    fn children_keep_append_order() {
        let element = Element::new("parent")
            .with_child(Element::new("first"))
            .with_child(Element::new("second"));
        let tags: Vec<&str> = element.children().iter().map(Element::tag).collect();
        assert_eq!(tags, ["first", "second"]);
    }

    #[test]
    fn missing_attribute_is_none() {
        assert_eq!(Element::new("node").attribute("name"), None);
    }
}
