//! Toolkit
//!
//! Ties a host window, the track manager and live-region tracking
//! together and drives the event loop.

use anyhow::Context;
use natura_a11y::{
    LiveRegionAttributes, LiveRegionChange, LiveRegionConfig, LiveRegionMode, LiveRegionTracker,
};
use natura_dom::{Document, DomTree, ElementQuery, HostEvent, Key, NodeId, ScrollBehavior, Window};
use natura_html::HtmlParser;
use natura_track::{Navigator, TrackError, TrackManager};

use crate::ToolkitConfig;

/// A document with its widgets
#[derive(Debug)]
pub struct Toolkit {
    window: Window,
    tracks: TrackManager,
    announcer: LiveRegionTracker,
}

impl Toolkit {
    pub fn new(document: Document, config: ToolkitConfig) -> Self {
        Self {
            window: Window::new(document, config.host),
            tracks: TrackManager::new(config.track),
            announcer: LiveRegionTracker::new(),
        }
    }

    /// Parse markup into a new toolkit
    pub fn from_html(html: &str, config: ToolkitConfig) -> anyhow::Result<Self> {
        let document = HtmlParser::new()
            .parse(html)
            .context("failed to parse toolkit document")?;
        Ok(Self::new(document, config))
    }

    /// Set up all widgets; returns the number of tracks
    pub fn init(&mut self) -> usize {
        let count = self.tracks.init(&mut self.window);
        self.sync_announcements();
        count
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn tracks(&self) -> &TrackManager {
        &self.tracks
    }

    pub fn track(&self, id: &str) -> Option<&Navigator> {
        self.tracks.navigator(id)
    }

    /// First element matching `selector`
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        self.window.tree().query_selector(NodeId::ROOT, selector)
    }

    pub fn now(&self) -> u64 {
        self.window.now()
    }

    /// Advance the clock by `ms`, handling every event that comes due.
    /// Returns the number of events handled.
    pub fn run_for(&mut self, ms: u64) -> usize {
        let deadline = self.window.now() + ms;
        let mut handled = 0;
        while let Some(event) = self.window.next_event(deadline) {
            self.handle(&event);
            handled += 1;
        }
        handled
    }

    fn handle(&mut self, event: &HostEvent) {
        tracing::trace!("{:?}", event);
        self.tracks.handle_event(&mut self.window, event);
        self.sync_announcements();
    }

    // Input

    pub fn click(&mut self, target: NodeId) {
        self.window.click(target);
    }

    pub fn key_down(&mut self, target: NodeId, key: Key) {
        self.window.key_down(target, key);
    }

    pub fn resize(&mut self, width: f64) {
        self.window.resize(width);
    }

    /// Smooth-scroll a strip as a user would
    pub fn scroll_to(&mut self, strip: NodeId, left: f64) {
        self.window.scroll_to(strip, left, ScrollBehavior::Smooth);
    }

    // Track operations

    pub fn go_to(&mut self, id: &str, page: isize) -> Result<bool, TrackError> {
        let moved = self.tracks.go_to(&mut self.window, id, page)?;
        self.sync_announcements();
        Ok(moved)
    }

    pub fn next(&mut self, id: &str) -> Result<bool, TrackError> {
        let moved = self.tracks.next(&mut self.window, id)?;
        self.sync_announcements();
        Ok(moved)
    }

    pub fn prev(&mut self, id: &str) -> Result<bool, TrackError> {
        let moved = self.tracks.prev(&mut self.window, id)?;
        self.sync_announcements();
        Ok(moved)
    }

    pub fn reset(&mut self, id: &str) -> Result<(), TrackError> {
        self.tracks.reset(&mut self.window, id)?;
        self.sync_announcements();
        Ok(())
    }

    pub fn destroy(&mut self, id: &str) -> Result<(), TrackError> {
        self.tracks.destroy(&mut self.window, id)?;
        if let Some(region) = self.tracks.navigator(id).and_then(Navigator::live_region) {
            self.announcer.unregister(region_key(region));
        }
        Ok(())
    }

    // Announcements

    /// Current live-region text of a track
    pub fn live_text(&self, id: &str) -> Option<String> {
        let region = self.tracks.navigator(id)?.live_region()?;
        Some(self.window.tree().text_content(region))
    }

    /// Drain queued announcements in speaking order
    pub fn announcements(&mut self) -> Vec<LiveRegionChange> {
        std::iter::from_fn(|| self.announcer.next_change()).collect()
    }

    pub fn pending_announcements(&self) -> usize {
        self.announcer.pending_count()
    }

    /// Drop queued announcements without speaking them
    pub fn discard_announcements(&mut self) {
        self.announcer.clear_pending();
    }

    fn sync_announcements(&mut self) {
        let now = self.window.now();
        for nav in self.tracks.navigators() {
            if nav.is_destroyed() {
                continue;
            }
            let Some(region) = nav.live_region() else {
                continue;
            };
            let key = region_key(region);
            let tree = self.window.tree();
            if !self.announcer.is_live_region(key) {
                self.announcer.register(key, region_config(tree, region));
            }
            let text = tree.text_content(region);
            let busy = tree.attribute(region, "aria-busy") == Some("true");
            self.announcer.set_busy(key, busy, &text, now);
            self.announcer
                .update_content(key, &text, tree.children(region).len(), now);
        }
    }
}

fn region_key(region: NodeId) -> u64 {
    region.index() as u64
}

/// Announcement settings for a region, from its own ARIA attributes.
/// Regions that say nothing are spoken politely.
fn region_config(tree: &DomTree, region: NodeId) -> LiveRegionConfig {
    let attrs = LiveRegionAttributes {
        live: tree.attribute(region, "aria-live"),
        role: tree.attribute(region, "role"),
        atomic: tree.attribute(region, "aria-atomic"),
        relevant: tree.attribute(region, "aria-relevant"),
        busy: tree.attribute(region, "aria-busy"),
    };
    LiveRegionConfig::from_attributes(&attrs, LiveRegionMode::Polite).unwrap_or_else(|err| {
        tracing::warn!("Live region {:?}: {}", region, err);
        LiveRegionConfig::polite().with_atomic(true)
    })
}
