//! Document - High-level document API

use crate::{DomTree, ElementQuery, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
}

impl Document {
    /// Create a new document with `<html><head/><body/></html>`
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");
        // Fresh nodes under a fresh root cannot violate the hierarchy
        let _ = tree.append_child(NodeId::ROOT, html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);
        Self::from_tree(tree, url)
    }

    /// Wrap an already built tree
    pub fn from_tree(tree: DomTree, url: &str) -> Self {
        Self {
            tree,
            url: url.to_string(),
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        self.tree.query_selector(NodeId::ROOT, "body")
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.get_element_by_id(id)
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
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_body() {
        let doc = Document::default();
        let body = doc.body().expect("body");
        assert_eq!(doc.tree().tag_name(body), Some("body"));
        assert_eq!(doc.url(), "about:blank");
    }
}
