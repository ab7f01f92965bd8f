//! DOM Node
//!
//! Nodes live in the `DomTree` arena and link to each other by `NodeId`.
//! Element nodes keep their class list and inline style parsed alongside
//! the raw attributes so selector matching and layout never re-parse.

use crate::{DOMTokenList, ElementGeometry, InlineStyle, NamedNodeMap, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (None for the document root and detached nodes)
    pub parent: Option<NodeId>,
    /// Children in document order
    pub children: Vec<NodeId>,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::with_data(NodeData::Text(content.to_string()))
    }

    /// Create a comment node
    pub fn comment(content: &str) -> Self {
        Self::with_data(NodeData::Comment(content.to_string()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    fn with_data(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
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
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Raw attributes in insertion order
    pub attrs: NamedNodeMap,
    /// Parsed `class` attribute
    pub class_list: DOMTokenList,
    /// Parsed `style` attribute
    pub style: InlineStyle,
    /// Layout results
    pub geometry: ElementGeometry,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: NamedNodeMap::new(),
            class_list: DOMTokenList::new(),
            style: InlineStyle::default(),
            geometry: ElementGeometry::default(),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attribute(name)
    }

    /// Set an attribute, keeping the class and style caches in sync
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "class" => self.class_list.set_value(value),
            "style" => self.style = InlineStyle::parse(value),
            _ => {}
        }
        self.attrs.set_attribute(name, value);
    }

    /// Remove an attribute, returning whether it was present
    pub fn remove_attr(&mut self, name: &str) -> bool {
        match name {
            "class" => self.class_list.set_value(""),
            "style" => self.style = InlineStyle::default(),
            _ => {}
        }
        self.attrs.remove_named_item(name).is_some()
    }

    /// Element id attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Toggle a class and write the result back to the `class` attribute
    pub fn toggle_class(&mut self, class: &str, force: Option<bool>) -> bool {
        let state = self.class_list.toggle(class, force);
        let value = self.class_list.value();
        self.attrs.set_attribute("class", &value);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_attribute_feeds_class_list() {
        let mut elem = ElementData::new("DIV");
        elem.set_attr("class", "track hide-controls");

        assert_eq!(elem.tag, "div");
        assert!(elem.class_list.contains("track"));
        assert!(elem.class_list.contains("hide-controls"));
    }

    #[test]
    fn test_toggle_class_updates_attribute() {
        let mut elem = ElementData::new("button");
        elem.toggle_class("active", Some(true));
        assert_eq!(elem.get_attr("class"), Some("active"));

        elem.toggle_class("active", Some(false));
        assert_eq!(elem.get_attr("class"), Some(""));
    }

    #[test]
    fn test_style_attribute_is_parsed() {
        let mut elem = ElementData::new("div");
        elem.set_attr("style", "padding-left: 24px; --visible-panels: 3");

        assert_eq!(elem.style.px("padding-left"), Some(24.0));
        assert_eq!(elem.style.get("--visible-panels"), Some("3"));
    }
}
