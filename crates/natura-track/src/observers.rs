//! Visibility Observers
//!
//! The settle observer watches the first panel of every page and decides
//! which page a scroll came to rest on. The tabbing observer watches every
//! panel and keeps only fully visible panels keyboard reachable.

use natura_a11y::{TabIndex, aria_bool};
use natura_dom::{
    DomResult, DomTree, IntersectionObserverEntry, IntersectionObserverInit, NodeId, RootMargin,
    Window, focusable_elements,
};

use crate::navigator::{Navigator, ObserverPair};
use crate::{Page, TrackConfig};

/// Create both observers for a navigator with a strip
pub(crate) fn attach(window: &mut Window, nav: &Navigator, config: &TrackConfig) -> Option<ObserverPair> {
    let strip = nav.strip?;

    let settle = window.create_observer(IntersectionObserverInit {
        root: strip,
        root_margin: RootMargin::horizontal(-nav.padding * config.settle_margin_factor),
        threshold: config.settle_threshold,
    });
    for page in &nav.pages {
        window.observe(settle, page.first_panel());
    }

    let tabbing = window.create_observer(IntersectionObserverInit {
        root: strip,
        root_margin: RootMargin::horizontal(-nav.padding * config.tabbing_margin_factor),
        threshold: config.tabbing_threshold,
    });
    for panel in nav.pages.iter().flat_map(Page::panels) {
        window.observe(tabbing, *panel);
    }

    tracing::debug!(
        "{}: observing {} pages, {} panels",
        nav.id,
        nav.pages.len(),
        nav.pages.iter().map(Page::len).sum::<usize>()
    );
    Some(ObserverPair { settle, tabbing })
}

pub(crate) fn detach(window: &mut Window, pair: ObserverPair) {
    window.disconnect_observer(pair.settle);
    window.disconnect_observer(pair.tabbing);
}

/// Apply a settle delivery to the armed page. Returns true when a page
/// was (re)armed.
///
/// The last first panel to start intersecting wins. When the armed
/// page's panel leaves, a page still in view takes over, or nothing
/// stays armed.
pub(crate) fn rearm(nav: &mut Navigator, entries: &[IntersectionObserverEntry]) -> bool {
    let mut entered = None;
    for entry in entries {
        let Some(page) = nav.page_of(entry.target) else {
            continue;
        };
        if let Some(seen) = nav.in_view.get_mut(page) {
            *seen = entry.is_intersecting;
        }
        if entry.is_intersecting {
            entered = Some(page);
        }
    }
    if entered.is_some() {
        nav.armed = entered;
        return true;
    }

    let still_armed = nav
        .armed
        .is_some_and(|page| nav.in_view.get(page).copied().unwrap_or(false));
    if still_armed {
        return false;
    }
    nav.armed = nav.in_view.iter().rposition(|&seen| seen);
    nav.armed.is_some()
}

/// Apply a tabbing delivery
pub(crate) fn apply_tabbing(tree: &mut DomTree, entries: &[IntersectionObserverEntry]) -> DomResult<()> {
    for entry in entries {
        set_panel_reachable(tree, entry.target, entry.is_intersecting)?;
    }
    Ok(())
}

/// Coarse pass: only the active page's panels are reachable
pub(crate) fn apply_page_reachability(tree: &mut DomTree, pages: &[Page], active: usize) -> DomResult<()> {
    for (i, page) in pages.iter().enumerate() {
        for &panel in page.panels() {
            set_panel_reachable(tree, panel, i == active)?;
        }
    }
    Ok(())
}

fn set_panel_reachable(tree: &mut DomTree, panel: NodeId, reachable: bool) -> DomResult<()> {
    tree.set_attribute(panel, "aria-hidden", aria_bool(!reachable))?;
    let tabindex = TabIndex::from_reachable(reachable).to_attr();
    for el in focusable_elements(tree, panel) {
        tree.set_attribute(el, "tabindex", &tabindex)?;
    }
    Ok(())
}
