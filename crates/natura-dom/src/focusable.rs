//! Focusable enumeration
//!
//! Lists the elements inside a subtree that take part in sequential focus
//! navigation, whatever their current `tabindex` says, so callers can flip
//! them between reachable and unreachable.

use crate::{DomTree, NodeId};

fn is_focusable(tree: &DomTree, id: NodeId) -> bool {
    let Some(elem) = tree.element(id) else {
        return false;
    };
    if elem.get_attr("tabindex").is_some() {
        return true;
    }
    if elem.get_attr("disabled").is_some() {
        return false;
    }
    match elem.tag.as_str() {
        "a" | "area" => elem.get_attr("href").is_some(),
        "button" | "select" | "textarea" | "iframe" => true,
        "input" => elem.get_attr("type") != Some("hidden"),
        _ => elem
            .get_attr("contenteditable")
            .is_some_and(|v| v != "false"),
    }
}

/// Focusable descendants of `root` in document order
pub fn focusable_elements(tree: &DomTree, root: NodeId) -> Vec<NodeId> {
    tree.descendants(root)
        .into_iter()
        .filter(|&n| is_focusable(tree, n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(tree: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = tree.create_element(tag);
        for (k, v) in attrs {
            tree.set_attribute(id, k, v).unwrap();
        }
        tree.append_child(parent, id).unwrap();
        id
    }

    #[test]
    fn test_collects_interactive_elements() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let panel = add(&mut tree, root, "li", &[]);
        let link = add(&mut tree, panel, "a", &[("href", "#x")]);
        add(&mut tree, panel, "a", &[]);
        let button = add(&mut tree, panel, "button", &[]);
        add(&mut tree, panel, "button", &[("disabled", "")]);
        add(&mut tree, panel, "input", &[("type", "hidden")]);
        let div = add(&mut tree, panel, "div", &[("tabindex", "-1")]);
        let editable = add(&mut tree, panel, "p", &[("contenteditable", "true")]);

        assert_eq!(
            focusable_elements(&tree, panel),
            vec![link, button, div, editable]
        );
    }

    #[test]
    fn test_nested_order() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let panel = add(&mut tree, root, "li", &[]);
        let wrapper = add(&mut tree, panel, "div", &[]);
        let inner = add(&mut tree, wrapper, "button", &[]);
        let after = add(&mut tree, panel, "textarea", &[]);
        assert_eq!(focusable_elements(&tree, panel), vec![inner, after]);
    }
}
