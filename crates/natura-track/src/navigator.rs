//! Navigator state
//!
//! One record per track container, owned by the manager and rebuilt in
//! full on reset.

use natura_dom::{DomTree, NodeId, ObserverId, SubscriptionId, TimerId};

use crate::Page;

/// Map an out-of-range page request onto the circular page sequence:
/// below 0 goes to the last page, past the end to the first
pub fn wrap_index(index: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    match usize::try_from(index) {
        Ok(i) if i < len => i,
        Ok(_) => 0,
        Err(_) => len - 1,
    }
}

/// The settle and tabbing observers of one navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ObserverPair {
    pub settle: ObserverId,
    pub tabbing: ObserverId,
}

/// A tracked container
#[derive(Debug, Clone)]
pub struct Navigator {
    pub(crate) id: String,
    pub(crate) container: NodeId,
    pub(crate) strip: Option<NodeId>,
    pub(crate) pagination: Option<NodeId>,
    pub(crate) live_region: Option<NodeId>,
    pub(crate) pages: Vec<Page>,
    pub(crate) active: usize,
    pub(crate) padding: f64,
    pub(crate) observers: Option<ObserverPair>,
    /// Pending re-render for a requested page
    pub(crate) confirm: Option<(TimerId, usize)>,
    /// Pending settle debounce
    pub(crate) settle: Option<TimerId>,
    /// Page the settle observer last saw centred
    pub(crate) armed: Option<usize>,
    /// Latest settle state of each page's first panel
    pub(crate) in_view: Vec<bool>,
    /// Scroll activity since the last confirmation
    pub(crate) scrolling: bool,
    pub(crate) subscriptions: Vec<SubscriptionId>,
    pub(crate) destroyed: bool,
}

impl Navigator {
    pub(crate) fn new(id: String, container: NodeId) -> Self {
        Self {
            id,
            container,
            strip: None,
            pagination: None,
            live_region: None,
            pages: Vec::new(),
            active: 0,
            padding: 0.0,
            observers: None,
            confirm: None,
            settle: None,
            armed: None,
            in_view: Vec::new(),
            scrolling: false,
            subscriptions: Vec::new(),
            destroyed: false,
        }
    }

    /// `data-track-id` of the container
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The scrolling strip, if the container has one
    pub fn strip(&self) -> Option<NodeId> {
        self.strip
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn active_page(&self) -> usize {
        self.active
    }

    pub fn live_region(&self) -> Option<NodeId> {
        self.live_region
    }

    pub fn pagination(&self) -> Option<NodeId> {
        self.pagination
    }

    /// Navigation requests are no-ops
    pub fn is_inert(&self) -> bool {
        self.pages.len() <= 1
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Delegated event subscriptions currently held
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub(crate) fn observer_ids(&self) -> Option<(ObserverId, ObserverId)> {
        self.observers.map(|o| (o.settle, o.tabbing))
    }

    /// Page holding `panel`
    pub fn page_of(&self, panel: NodeId) -> Option<usize> {
        self.pages.iter().position(|p| p.contains(panel))
    }

    /// Scroll offset that puts the page's first panel at the viewport start
    pub(crate) fn scroll_target(&self, tree: &DomTree, page: usize) -> Option<f64> {
        let first = self.pages.get(page)?.first_panel();
        let offset = tree.geometry(first)?.offset_left;
        Some((offset - self.padding).max(0.0))
    }
}
