//! Strip layout
//!
//! Minimal layout for horizontally scrolling strips: any element whose
//! inline style sets `overflow-x: auto|scroll` places its element
//! children side by side, `--visible-panels` columns per client width,
//! inset by `padding-left` on both sides.

use crate::{DomTree, NodeId, parse_int};

/// Custom property that sets how many children share the client width
pub const COLUMNS_PROPERTY: &str = "--visible-panels";

/// Whether the element scrolls on the inline axis
pub fn is_scroll_strip(tree: &DomTree, id: NodeId) -> bool {
    tree.style(id)
        .and_then(|s| s.get("overflow-x"))
        .is_some_and(|v| v == "auto" || v == "scroll")
}

/// Lay out every connected strip; returns how many were laid out
pub fn layout_document(tree: &mut DomTree, viewport_width: f64) -> usize {
    let strips: Vec<NodeId> = tree
        .descendants(tree.root())
        .into_iter()
        .filter(|&n| is_scroll_strip(tree, n))
        .collect();
    for &strip in &strips {
        layout_strip(tree, strip, viewport_width);
    }
    tracing::debug!("Layout complete: {} strips", strips.len());
    strips.len()
}

/// Lay out one strip's children and clamp its scroll offset
pub fn layout_strip(tree: &mut DomTree, strip: NodeId, viewport_width: f64) {
    let Some(style) = tree.style(strip) else {
        return;
    };
    let client_width = style.px("width").unwrap_or(viewport_width).max(0.0);
    let height = style.px("height").unwrap_or(0.0);
    let padding = style.px("padding-left").unwrap_or(0.0).max(0.0);
    let columns = tree
        .computed_property(strip, COLUMNS_PROPERTY)
        .and_then(parse_int)
        .filter(|&n| n > 0)
        .unwrap_or(1);

    let panel_width = ((client_width - 2.0 * padding) / columns as f64).max(0.0);
    let children: Vec<NodeId> = tree.element_children(strip).collect();
    for (i, &child) in children.iter().enumerate() {
        if let Some(geom) = tree.geometry_mut(child) {
            geom.offset_left = padding + i as f64 * panel_width;
            geom.offset_top = 0.0;
            geom.offset_width = panel_width;
            geom.offset_height = height;
            geom.client_width = panel_width;
            geom.client_height = height;
        }
    }

    if let Some(geom) = tree.geometry_mut(strip) {
        geom.client_width = client_width;
        geom.client_height = height;
        geom.offset_width = client_width;
        geom.offset_height = height;
        geom.scroll_width = (2.0 * padding + children.len() as f64 * panel_width).max(client_width);
        geom.scroll_left = geom.clamp_scroll_left(geom.scroll_left);
    }
}
