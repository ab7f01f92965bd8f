//! Pagination Controller
//!
//! One button per page inside the pagination list, plus the container's
//! control visibility.

use natura_a11y::aria_bool;
use natura_dom::{DomResult, DomTree, ElementQuery, NodeId, parse_int};

pub(crate) const PAGE_INDEX_ATTR: &str = "data-page-index";
const PAGE_CONTROL: &str = "[data-page-index]";

/// Replace the list's content with one control per page, page 0 active
pub(crate) fn build(tree: &mut DomTree, list: NodeId, page_count: usize) -> DomResult<()> {
    tree.clear_children(list);
    for i in 0..page_count {
        let item = tree.create_element("li");
        let button = tree.create_element("button");
        tree.set_attribute(button, "type", "button")?;
        tree.set_attribute(button, PAGE_INDEX_ATTR, &i.to_string())?;
        tree.set_attribute(button, "aria-label", &format!("Go to page {}", i + 1))?;

        let number = tree.create_element("span");
        tree.set_attribute(number, "class", "pagination__number")?;
        tree.set_text_content(number, &(i + 1).to_string())?;

        tree.append_child(button, number)?;
        tree.append_child(item, button)?;
        tree.append_child(list, item)?;
    }
    update(tree, list, 0)
}

/// Mark exactly the control at `active` as current
pub(crate) fn update(tree: &mut DomTree, list: NodeId, active: usize) -> DomResult<()> {
    for (i, control) in tree.query_selector_all(list, PAGE_CONTROL).into_iter().enumerate() {
        let is_active = i == active;
        tree.toggle_class(control, "active", Some(is_active))?;
        tree.set_attribute(control, "aria-current", aria_bool(is_active))?;
    }
    Ok(())
}

pub(crate) fn clear(tree: &mut DomTree, list: NodeId) {
    tree.clear_children(list);
}

/// Page index carried by a pagination control
pub(crate) fn page_index(tree: &DomTree, control: NodeId) -> Option<isize> {
    parse_int(tree.attribute(control, PAGE_INDEX_ATTR)?).and_then(|n| isize::try_from(n).ok())
}

/// Hide pagination and disable prev/next when there is nothing to page
pub(crate) fn set_controls_visibility(
    tree: &mut DomTree,
    container: NodeId,
    list: Option<NodeId>,
    arrows: &[NodeId],
    page_count: usize,
) -> DomResult<()> {
    let hidden = page_count <= 1;
    tree.toggle_class(container, "hide-controls", Some(hidden))?;
    for &arrow in arrows {
        tree.toggle_attribute(arrow, "disabled", hidden)?;
    }
    if let Some(list) = list {
        tree.toggle_attribute(list, "hidden", hidden)?;
    }
    Ok(())
}
