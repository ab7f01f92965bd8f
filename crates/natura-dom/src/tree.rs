//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed; removing a node detaches it and leaves the slot
//! in the arena so stale `NodeId`s stay harmless.

use crate::{
    DOMTokenList, DomError, DomResult, ElementData, ElementGeometry, InlineStyle, Node,
    NodeId,
};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree only holds the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::comment(text))
    }

    /// Append `child` to `parent`, moving it if already attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.get(parent).ok_or(DomError::NotFound(parent))?;
        self.get(child).ok_or(DomError::NotFound(child))?;
        if child == NodeId::ROOT || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        self.detach(child);
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = Some(parent);
        Ok(child)
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild(child));
        }
        self.detach(child);
        Ok(child)
    }

    /// Detach every child of `parent` (`innerHTML = ''`)
    pub fn clear_children(&mut self, parent: NodeId) {
        let Some(node) = self.get_mut(parent) else {
            return;
        };
        let children = std::mem::take(&mut node.children);
        for child in children {
            self.nodes[child.index()].parent = None;
        }
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|&c| c != child);
        }
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children in document order (empty for unknown ids)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Element children in document order
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
    }

    /// All descendants in pre-order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Ancestors from parent up to the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor == node || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(NodeId::ROOT, id)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// Element data of a node
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Mutable element data of a node
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    fn element_mut_or_err(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        match self.get_mut(id) {
            None => Err(DomError::NotFound(id)),
            Some(node) => node.as_element_mut().ok_or(DomError::InvalidNodeType(id)),
        }
    }

    /// Lowercase tag name
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut_or_err(id)?.set_attr(name, value);
        Ok(())
    }

    /// Remove an attribute; absent attributes are not an error
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<bool> {
        Ok(self.element_mut_or_err(id)?.remove_attr(name))
    }

    /// Set or remove a boolean attribute such as `disabled`
    pub fn toggle_attribute(&mut self, id: NodeId, name: &str, on: bool) -> DomResult<()> {
        let elem = self.element_mut_or_err(id)?;
        if on {
            if elem.get_attr(name).is_none() {
                elem.set_attr(name, "");
            }
        } else {
            elem.remove_attr(name);
        }
        Ok(())
    }

    pub fn class_list(&self, id: NodeId) -> Option<&DOMTokenList> {
        self.element(id).map(|e| &e.class_list)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.class_list(id).is_some_and(|c| c.contains(class))
    }

    pub fn toggle_class(&mut self, id: NodeId, class: &str, force: Option<bool>) -> DomResult<bool> {
        Ok(self.element_mut_or_err(id)?.toggle_class(class, force))
    }

    pub fn style(&self, id: NodeId) -> Option<&InlineStyle> {
        self.element(id).map(|e| &e.style)
    }

    /// Custom properties inherit from ancestors; everything else is own-only
    pub fn computed_property(&self, id: NodeId, name: &str) -> Option<&str> {
        let own = self.style(id).and_then(|s| s.get(name));
        if own.is_some() || !name.starts_with("--") {
            return own;
        }
        self.ancestors(id)
            .find_map(|a| self.style(a).and_then(|s| s.get(name)))
    }

    pub fn geometry(&self, id: NodeId) -> Option<&ElementGeometry> {
        self.element(id).map(|e| &e.geometry)
    }

    pub fn geometry_mut(&mut self, id: NodeId) -> Option<&mut ElementGeometry> {
        self.element_mut(id).map(|e| &mut e.geometry)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    /// Replace all children with a single text node (no node for empty text)
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        self.get(id).ok_or(DomError::NotFound(id))?;
        self.clear_children(id);
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node)?;
        }
        Ok(())
    }

    /// Find an element by `id` attribute among connected nodes
    pub fn get_element_by_id(&self, value: &str) -> Option<NodeId> {
        self.descendants(NodeId::ROOT)
            .into_iter()
            .find(|&n| self.element(n).and_then(ElementData::id) == Some(value))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let ul = tree.create_element("ul");
        let li = tree.create_element("li");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, ul).unwrap();
        tree.append_child(ul, li).unwrap();
        (tree, div, ul, li)
    }

    #[test]
    fn test_append_and_descendants() {
        let (tree, div, ul, li) = sample();
        assert_eq!(tree.descendants(tree.root()), vec![div, ul, li]);
        assert_eq!(tree.ancestors(li).collect::<Vec<_>>(), vec![ul, div, NodeId::ROOT]);
        assert!(tree.is_connected(li));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let (mut tree, div, _, li) = sample();
        assert_eq!(tree.append_child(li, div), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_clear_children_detaches() {
        let (mut tree, div, ul, li) = sample();
        tree.clear_children(div);
        assert!(tree.children(div).is_empty());
        assert_eq!(tree.parent(ul), None);
        assert!(!tree.is_connected(li));
    }

    #[test]
    fn test_text_content_round_trip() {
        let (mut tree, div, _, _) = sample();
        tree.set_text_content(div, "Page 1 of 3").unwrap();
        assert_eq!(tree.text_content(div), "Page 1 of 3");
        assert_eq!(tree.children(div).len(), 1);

        tree.set_text_content(div, "").unwrap();
        assert_eq!(tree.text_content(div), "");
        assert!(tree.children(div).is_empty());
    }

    #[test]
    fn test_attribute_on_text_node_fails() {
        let mut tree = DomTree::new();
        let text = tree.create_text("hi");
        assert_eq!(
            tree.set_attribute(text, "id", "x"),
            Err(DomError::InvalidNodeType(text))
        );
    }

    #[test]
    fn test_custom_properties_inherit() {
        let (mut tree, div, ul, li) = sample();
        tree.set_attribute(div, "style", "--visible-panels: 3; width: 10px").unwrap();
        assert_eq!(tree.computed_property(li, "--visible-panels"), Some("3"));
        assert_eq!(tree.computed_property(ul, "width"), None);
    }

    #[test]
    fn test_get_element_by_id() {
        let (mut tree, _, ul, _) = sample();
        tree.set_attribute(ul, "id", "pages").unwrap();
        assert_eq!(tree.get_element_by_id("pages"), Some(ul));
        assert_eq!(tree.get_element_by_id("nope"), None);
    }
}
