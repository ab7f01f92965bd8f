//! Host window
//!
//! A deterministic stand-in for the browser's event loop: a virtual
//! millisecond clock, one-shot timers, frame-stepped smooth scrolling,
//! optional `scrollend` support and intersection observer delivery.
//! Callers pull events one at a time with `next_event` and handle each
//! before asking for the next, so reactions (new timers, new scrolls)
//! are ordered correctly against later events.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::layout::layout_document;
use crate::{
    Document, DomTree, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Key, NodeId, ObserverId, ScrollBehavior, UiEvent,
};

/// Host environment options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Layout viewport width in px
    pub viewport_width: f64,
    /// Whether `scrollend` events are fired
    pub supports_scroll_end: bool,
    /// Duration of a smooth scroll
    pub smooth_scroll_ms: u64,
    /// Animation frame interval
    pub frame_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1024.0,
            supports_scroll_end: true,
            smooth_scroll_ms: 240,
            frame_ms: 16,
        }
    }
}

/// One-shot timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Something the host wants handled
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Dom(UiEvent),
    Timer(TimerId),
    Intersection {
        observer: ObserverId,
        entries: Vec<IntersectionObserverEntry>,
    },
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due: u64,
}

#[derive(Debug, Clone)]
struct ScrollAnimation {
    node: NodeId,
    from: f64,
    to: f64,
    start: u64,
}

/// Host window owning the document
#[derive(Debug)]
pub struct Window {
    document: Document,
    config: HostConfig,
    now: u64,
    timers: Vec<Timer>,
    next_timer: u64,
    animations: Vec<ScrollAnimation>,
    last_frame: u64,
    observers: Vec<IntersectionObserver>,
    next_observer: u32,
    queue: VecDeque<HostEvent>,
    pending_scroll_ends: Vec<NodeId>,
    intersections_dirty: bool,
}

impl Window {
    /// Wrap a document and run the initial layout
    pub fn new(document: Document, config: HostConfig) -> Self {
        let mut window = Self {
            document,
            config,
            now: 0,
            timers: Vec::new(),
            next_timer: 1,
            animations: Vec::new(),
            last_frame: 0,
            observers: Vec::new(),
            next_observer: 1,
            queue: VecDeque::new(),
            pending_scroll_ends: Vec::new(),
            intersections_dirty: false,
        };
        window.layout();
        window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tree(&self) -> &DomTree {
        &self.document.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.document.tree
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Virtual clock (ms)
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn supports_scroll_end(&self) -> bool {
        self.config.supports_scroll_end
    }

    /// Re-run strip layout for the current viewport
    pub fn layout(&mut self) {
        layout_document(&mut self.document.tree, self.config.viewport_width);
        self.intersections_dirty = true;
    }

    /// Change the viewport width, relayout and queue a `resize` event
    pub fn resize(&mut self, width: f64) {
        tracing::debug!("Viewport resized to {}px", width);
        self.config.viewport_width = width;
        self.layout();
        self.queue
            .push_back(HostEvent::Dom(UiEvent::resize(NodeId::ROOT, self.now)));
    }

    /// Queue a DOM event
    pub fn dispatch(&mut self, event: UiEvent) {
        self.queue.push_back(HostEvent::Dom(event));
    }

    pub fn click(&mut self, target: NodeId) {
        self.dispatch(UiEvent::click(target, self.now));
    }

    pub fn key_down(&mut self, target: NodeId, key: Key) {
        self.dispatch(UiEvent::key_down(target, key, self.now));
    }

    /// Schedule a one-shot timer
    pub fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.push(Timer {
            id,
            due: self.now + delay_ms,
        });
        id
    }

    /// Cancel a timer; returns whether it was still pending
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Timers that have not fired yet
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn scroll_left(&self, node: NodeId) -> f64 {
        self.tree().geometry(node).map(|g| g.scroll_left).unwrap_or(0.0)
    }

    /// Whether a smooth scroll is running on `node`
    pub fn is_scrolling(&self, node: NodeId) -> bool {
        self.animations.iter().any(|a| a.node == node)
    }

    /// Scroll `node` horizontally; a new request interrupts a running one
    pub fn scroll_to(&mut self, node: NodeId, left: f64, behavior: ScrollBehavior) {
        let Some(geom) = self.document.tree.geometry(node) else {
            return;
        };
        let target = geom.clamp_scroll_left(left);
        let current = geom.scroll_left;
        self.animations.retain(|a| a.node != node);
        if (target - current).abs() < f64::EPSILON {
            return;
        }

        match behavior {
            ScrollBehavior::Auto => {
                if let Some(geom) = self.document.tree.geometry_mut(node) {
                    geom.scroll_left = target;
                }
                self.queue
                    .push_back(HostEvent::Dom(UiEvent::scroll(node, self.now)));
                if self.config.supports_scroll_end {
                    self.pending_scroll_ends.push(node);
                }
                self.intersections_dirty = true;
            }
            ScrollBehavior::Smooth => {
                if self.animations.is_empty() {
                    self.last_frame = self.now;
                }
                self.animations.push(ScrollAnimation {
                    node,
                    from: current,
                    to: target,
                    start: self.now,
                });
            }
        }
    }

    /// Register a new intersection observer
    pub fn create_observer(&mut self, init: IntersectionObserverInit) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push(IntersectionObserver::new(id, init));
        id
    }

    /// Start observing `target`; false if the observer is gone
    pub fn observe(&mut self, observer: ObserverId, target: NodeId) -> bool {
        match self.observers.iter_mut().find(|o| o.id() == observer) {
            Some(obs) => {
                obs.observe(target);
                self.intersections_dirty = true;
                true
            }
            None => false,
        }
    }

    /// Disconnect and drop an observer, discarding undelivered entries
    pub fn disconnect_observer(&mut self, observer: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id() != observer);
        self.queue.retain(|e| {
            !matches!(e, HostEvent::Intersection { observer: o, .. } if *o == observer)
        });
        self.observers.len() != before
    }

    pub fn observer(&self, observer: ObserverId) -> Option<&IntersectionObserver> {
        self.observers.iter().find(|o| o.id() == observer)
    }

    /// Connected observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Pull the next event due at or before `deadline`, advancing the clock.
    /// Returns `None` once nothing else is due; the clock then rests at
    /// `deadline`.
    pub fn next_event(&mut self, deadline: u64) -> Option<HostEvent> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(event);
            }
            if self.intersections_dirty {
                self.intersections_dirty = false;
                self.deliver_intersections();
                for node in std::mem::take(&mut self.pending_scroll_ends) {
                    self.queue
                        .push_back(HostEvent::Dom(UiEvent::scroll_end(node, self.now)));
                }
                continue;
            }

            let next_timer = self.timers.iter().map(|t| (t.due, t.id)).min();
            let next_frame = (!self.animations.is_empty())
                .then(|| self.last_frame + self.config.frame_ms.max(1));

            match (next_timer, next_frame) {
                (Some((due, id)), frame) if frame.is_none_or(|f| due <= f) && due <= deadline => {
                    self.now = self.now.max(due);
                    self.timers.retain(|t| t.id != id);
                    return Some(HostEvent::Timer(id));
                }
                (_, Some(frame)) if frame <= deadline => {
                    self.now = self.now.max(frame);
                    self.step_animations();
                }
                _ => {
                    self.now = self.now.max(deadline);
                    return None;
                }
            }
        }
    }

    fn step_animations(&mut self) {
        self.last_frame = self.now;
        let duration = self.config.smooth_scroll_ms.max(1) as f64;
        let mut running = Vec::new();
        for anim in std::mem::take(&mut self.animations) {
            let progress = ((self.now - anim.start) as f64 / duration).min(1.0);
            let position = anim.from + (anim.to - anim.from) * progress;
            if let Some(geom) = self.document.tree.geometry_mut(anim.node) {
                geom.scroll_left = geom.clamp_scroll_left(position);
            }
            self.queue
                .push_back(HostEvent::Dom(UiEvent::scroll(anim.node, self.now)));
            if progress < 1.0 {
                running.push(anim);
            } else if self.config.supports_scroll_end {
                self.pending_scroll_ends.push(anim.node);
            }
        }
        self.animations = running;
        self.intersections_dirty = true;
    }

    fn deliver_intersections(&mut self) {
        for obs in &mut self.observers {
            let entries = obs.take_entries(&self.document.tree, self.now);
            if !entries.is_empty() {
                self.queue.push_back(HostEvent::Intersection {
                    observer: obs.id(),
                    entries,
                });
            }
        }
    }
}
