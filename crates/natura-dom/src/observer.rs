//! Intersection observers
//!
//! Observers watch targets against a scrolling root. Only the inline
//! axis is measured: strips scroll horizontally and panels fill the
//! strip's height. An entry is produced when a target is first observed
//! and whenever its threshold state flips afterwards.

use crate::{DOMRect, DomTree, NodeId};

/// Observer handle issued by the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u32);

/// `rootMargin`: positive values grow the root box, negative shrink it
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    /// `0px {px}px` shorthand
    pub fn horizontal(px: f64) -> Self {
        Self {
            right: px,
            left: px,
            ..Default::default()
        }
    }
}

/// Observer options
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionObserverInit {
    /// Scroll container the targets are measured against
    pub root: NodeId,
    pub root_margin: RootMargin,
    /// Visible fraction at which a target counts as intersecting
    pub threshold: f64,
}

/// Intersection observer entry
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionObserverEntry {
    pub target: NodeId,
    pub bounding_client_rect: DOMRect,
    pub intersection_rect: Option<DOMRect>,
    pub root_bounds: DOMRect,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
    pub time: u64,
}

#[derive(Debug, Clone)]
struct Observed {
    target: NodeId,
    last: Option<bool>,
}

/// Intersection observer
#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    id: ObserverId,
    init: IntersectionObserverInit,
    observed: Vec<Observed>,
}

impl IntersectionObserver {
    pub fn new(id: ObserverId, init: IntersectionObserverInit) -> Self {
        Self {
            id,
            init,
            observed: Vec::new(),
        }
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }

    pub fn root(&self) -> NodeId {
        self.init.root
    }

    pub fn threshold(&self) -> f64 {
        self.init.threshold
    }

    pub fn observe(&mut self, target: NodeId) {
        if !self.observed.iter().any(|o| o.target == target) {
            self.observed.push(Observed { target, last: None });
        }
    }

    /// Root box in the root's own viewport coordinates, margins applied
    pub fn root_bounds(&self, tree: &DomTree) -> DOMRect {
        let geom = tree.geometry(self.init.root).cloned().unwrap_or_default();
        let m = self.init.root_margin;
        DOMRect::from_xywh(
            -m.left,
            -m.top,
            geom.client_width + m.left + m.right,
            geom.client_height + m.top + m.bottom,
        )
    }

    /// Measure one target against the root
    pub fn measure(&self, tree: &DomTree, target: NodeId, time: u64) -> IntersectionObserverEntry {
        let root_bounds = self.root_bounds(tree);
        let scroll_left = tree
            .geometry(self.init.root)
            .map(|g| g.scroll_left)
            .unwrap_or(0.0);
        let mut rect = tree
            .geometry(target)
            .map(|g| g.offset_rect())
            .unwrap_or_default();
        rect.x -= scroll_left;

        let connected = tree.is_connected(target)
            && tree.is_inclusive_ancestor(self.init.root, target);
        let intersection_rect = if connected {
            rect.horizontal_intersection(&root_bounds)
        } else {
            None
        };
        let ratio = match intersection_rect {
            Some(hit) if rect.width > 0.0 => hit.width / rect.width,
            _ => 0.0,
        };
        IntersectionObserverEntry {
            target,
            bounding_client_rect: rect,
            intersection_rect,
            root_bounds,
            is_intersecting: ratio > 0.0 && ratio >= self.init.threshold,
            intersection_ratio: ratio,
            time,
        }
    }

    /// Entries for targets that are new or crossed the threshold
    pub fn take_entries(&mut self, tree: &DomTree, time: u64) -> Vec<IntersectionObserverEntry> {
        let mut entries = Vec::new();
        for i in 0..self.observed.len() {
            let entry = self.measure(tree, self.observed[i].target, time);
            let slot = &mut self.observed[i];
            if slot.last != Some(entry.is_intersecting) {
                slot.last = Some(entry.is_intersecting);
                entries.push(entry);
            }
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout_document;

    fn strip(panels: usize) -> (DomTree, NodeId, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let root = tree.create_element("ul");
        tree.set_attribute(root, "style", "overflow-x: auto; padding-left: 50px; --visible-panels: 2")
            .unwrap();
        tree.append_child(tree.root(), root).unwrap();
        let mut kids = Vec::new();
        for _ in 0..panels {
            let li = tree.create_element("li");
            tree.append_child(root, li).unwrap();
            kids.push(li);
        }
        layout_document(&mut tree, 1000.0);
        (tree, root, kids)
    }

    fn observer(root: NodeId, margin: f64) -> IntersectionObserver {
        IntersectionObserver::new(
            ObserverId(1),
            IntersectionObserverInit {
                root,
                root_margin: RootMargin::horizontal(-margin),
                threshold: 0.5,
            },
        )
    }

    #[test]
    fn test_first_delivery_reports_every_target() {
        let (tree, root, kids) = strip(4);
        let mut obs = observer(root, 50.0);
        for &k in &kids {
            obs.observe(k);
        }
        let entries = obs.take_entries(&tree, 0);
        assert_eq!(entries.len(), 4);
        let visible: Vec<bool> = entries.iter().map(|e| e.is_intersecting).collect();
        assert_eq!(visible, vec![true, true, false, false]);

        // Nothing moved, nothing to report
        assert!(obs.take_entries(&tree, 1).is_empty());
    }

    #[test]
    fn test_scroll_flips_threshold_state() {
        let (mut tree, root, kids) = strip(4);
        let mut obs = observer(root, 50.0);
        for &k in &kids {
            obs.observe(k);
        }
        obs.take_entries(&tree, 0);

        tree.geometry_mut(root).unwrap().scroll_left = 900.0;
        let entries = obs.take_entries(&tree, 1);
        let flipped: Vec<(NodeId, bool)> =
            entries.iter().map(|e| (e.target, e.is_intersecting)).collect();
        assert_eq!(
            flipped,
            vec![(kids[0], false), (kids[1], false), (kids[2], true), (kids[3], true)]
        );
    }

    #[test]
    fn test_partial_visibility_ratio() {
        let (mut tree, root, kids) = strip(4);
        tree.geometry_mut(root).unwrap().scroll_left = 275.0;
        let obs = observer(root, 0.0);
        let entry = obs.measure(&tree, kids[0], 0);
        assert!((entry.intersection_ratio - 0.5).abs() < 1e-9);
        assert!(entry.is_intersecting);
    }

    #[test]
    fn test_detached_target_never_intersects() {
        let (mut tree, root, kids) = strip(2);
        tree.remove_child(root, kids[0]).unwrap();
        let obs = observer(root, 0.0);
        assert!(!obs.measure(&tree, kids[0], 0).is_intersecting);
    }
}
