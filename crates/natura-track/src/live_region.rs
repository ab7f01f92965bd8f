//! Live Region Announcer

use natura_a11y::{AriaRole, LiveRegionMode, aria_bool};
use natura_dom::{DomResult, DomTree, ElementQuery, NodeId};

use crate::TrackConfig;

/// Find the container's live region, creating one if configured to
pub(crate) fn ensure(
    tree: &mut DomTree,
    container: NodeId,
    config: &TrackConfig,
) -> DomResult<Option<NodeId>> {
    if let Some(region) = tree.query_selector(container, &config.live_region_selector) {
        return Ok(Some(region));
    }
    if !config.create_live_region {
        return Ok(None);
    }

    let region = tree.create_element("div");
    tree.set_attribute(region, "class", "liveregion screen-reader-only")?;
    tree.set_attribute(region, "role", AriaRole::Status.as_str())?;
    tree.set_attribute(region, "aria-live", LiveRegionMode::Polite.as_str())?;
    tree.set_attribute(region, "aria-atomic", aria_bool(true))?;
    tree.append_child(container, region)?;
    Ok(Some(region))
}

pub(crate) fn status_text(active: usize, total: usize) -> String {
    format!("Page {} of {}", active + 1, total)
}

/// Rewrite the status text
pub(crate) fn announce(tree: &mut DomTree, region: NodeId, active: usize, total: usize) -> DomResult<()> {
    tree.set_text_content(region, &status_text(active, total))
}

pub(crate) fn clear(tree: &mut DomTree, region: NodeId) -> DomResult<()> {
    tree.set_text_content(region, "")
}
