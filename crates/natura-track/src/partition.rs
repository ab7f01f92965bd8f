//! Page Partitioner
//!
//! Splits a strip's panels into pages of `--visible-panels` panels.

use natura_dom::{DomResult, DomTree, NodeId, parse_int};

/// Consecutive panels shown together at one scroll position (never empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub(crate) panels: Vec<NodeId>,
}

impl Page {
    pub fn panels(&self) -> &[NodeId] {
        &self.panels
    }

    /// Panel whose leading edge the page scrolls to
    pub fn first_panel(&self) -> NodeId {
        self.panels[0]
    }

    pub fn contains(&self, panel: NodeId) -> bool {
        self.panels.contains(&panel)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

/// Visible panel count from the raw property value; 1 when absent,
/// unparsable or not positive
pub fn visible_panel_count(raw: Option<&str>) -> usize {
    raw.and_then(parse_int)
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(1)
}

/// Chunk `items` into groups of `per_page`, in order; the last may be short
pub fn partition<T: Copy>(items: &[T], per_page: usize) -> Vec<Vec<T>> {
    items.chunks(per_page.max(1)).map(<[T]>::to_vec).collect()
}

/// Assign `<track-id>-panel-<i>` ids to the strip's panels and page them
pub(crate) fn paginate(
    tree: &mut DomTree,
    track_id: &str,
    strip: NodeId,
    property: &str,
) -> DomResult<Vec<Page>> {
    let raw = tree.computed_property(strip, property);
    let per_page = visible_panel_count(raw);
    if let Some(raw) = raw.filter(|r| parse_int(r).is_none_or(|n| n <= 0)) {
        tracing::warn!("{}: invalid {} value {:?}, showing 1 panel", track_id, property, raw);
    }

    let panels: Vec<NodeId> = tree.element_children(strip).collect();
    for (i, &panel) in panels.iter().enumerate() {
        tree.set_attribute(panel, "id", &format!("{track_id}-panel-{i}"))?;
    }

    let pages: Vec<Page> = partition(&panels, per_page)
        .into_iter()
        .map(|panels| Page { panels })
        .collect();
    tracing::debug!(
        "{}: {} panels in {} pages of {}",
        track_id,
        panels.len(),
        pages.len(),
        per_page
    );
    Ok(pages)
}

/// Horizontal padding that lets neighbouring panels peek into view
pub(crate) fn peeking_padding(tree: &DomTree, strip: NodeId) -> f64 {
    tree.style(strip)
        .and_then(|s| s.px("padding-left"))
        .unwrap_or(0.0)
        .max(0.0)
}
