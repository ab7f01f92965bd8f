//! Lifecycle Manager
//!
//! Owns every navigator (arena + lookup by track id), the delegated
//! event subscriptions and the settle capability. All host events are
//! routed through `handle_event`.

use std::collections::HashMap;

use natura_dom::{
    DomResult, DomTree, ElementQuery, EventDelegator, EventType, HostEvent,
    IntersectionObserverEntry, NodeId, ObserverId, ScrollBehavior, TimerId, UiEvent, Window,
};

use crate::keyboard::{self, KeyboardIntent};
use crate::navigator::Navigator;
use crate::settle::{self, SettleAction, SettleSignal};
use crate::{
    TrackConfig, TrackError, TrackResult, live_region, observers, pagination, partition,
    wrap_index,
};

/// What a delegated subscription does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackAction {
    /// Click on a `[data-page-index]` control
    PageControl,
    Prev,
    Next,
    /// Key press on the prev/next controls
    Keyboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Handler {
    track: usize,
    action: TrackAction,
}

/// Track lifecycle manager
#[derive(Debug)]
pub struct TrackManager {
    config: TrackConfig,
    navigators: Vec<Navigator>,
    by_id: HashMap<String, usize>,
    delegator: EventDelegator<Handler>,
    signal: Option<Box<dyn SettleSignal>>,
}

impl TrackManager {
    pub fn new(config: TrackConfig) -> Self {
        Self {
            config,
            navigators: Vec::new(),
            by_id: HashMap::new(),
            delegator: EventDelegator::new(),
            signal: None,
        }
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Set up every track container without a live navigator. A
    /// destroyed container is picked up again under a new id.
    /// Returns the number of tracks set up by this call.
    pub fn init(&mut self, window: &mut Window) -> usize {
        if self.signal.is_none() {
            let signal = settle::select(window.supports_scroll_end(), self.config.scroll_debounce_ms);
            tracing::debug!("Settle detection: {}", signal.name());
            self.signal = Some(signal);
        }

        let containers = window
            .tree()
            .query_selector_all(NodeId::ROOT, &self.config.track_selector);
        let mut count = 0;
        for container in containers {
            if self
                .navigators
                .iter()
                .any(|n| n.container == container && !n.destroyed)
            {
                continue;
            }
            let idx = self.navigators.len();
            let id = format!("track-{idx}");
            if let Err(err) = window.tree_mut().set_attribute(container, "data-track-id", &id) {
                tracing::warn!("Skipping track container: {}", err);
                continue;
            }
            self.navigators.push(Navigator::new(id.clone(), container));
            self.by_id.insert(id.clone(), idx);
            if let Err(err) = self.setup(window, idx) {
                tracing::warn!("{}: setup failed: {}", id, err);
            }
            count += 1;
        }
        tracing::info!("Initialized {} tracks", count);
        count
    }

    /// Tear a track down and rebuild it from scratch (the resize path)
    pub fn reset(&mut self, window: &mut Window, id: &str) -> TrackResult<()> {
        let idx = self.live_index(id)?;
        self.teardown(window, idx);

        let nav = &mut self.navigators[idx];
        if let Some(strip) = nav.strip {
            window.scroll_to(strip, 0.0, ScrollBehavior::Auto);
        }
        if let Some(list) = nav.pagination {
            pagination::clear(window.tree_mut(), list);
        }
        if let Some(region) = nav.live_region {
            live_region::clear(window.tree_mut(), region)?;
        }
        nav.active = 0;

        self.setup(window, idx)?;
        tracing::info!("{}: reset", id);
        Ok(())
    }

    /// Disconnect observers, cancel timers and drop subscriptions.
    /// Markup is left in place.
    pub fn destroy(&mut self, window: &mut Window, id: &str) -> TrackResult<()> {
        let idx = self.live_index(id)?;
        self.teardown(window, idx);
        self.navigators[idx].destroyed = true;
        tracing::info!("{}: destroyed", id);
        Ok(())
    }

    /// Navigate to a page, wrapping out-of-range indices.
    /// Returns false when the track has at most one page.
    pub fn go_to(&mut self, window: &mut Window, id: &str, page: isize) -> TrackResult<bool> {
        let idx = self.live_index(id)?;
        self.navigate(window, idx, page)
    }

    pub fn next(&mut self, window: &mut Window, id: &str) -> TrackResult<bool> {
        let idx = self.live_index(id)?;
        self.step(window, idx, 1)
    }

    pub fn prev(&mut self, window: &mut Window, id: &str) -> TrackResult<bool> {
        let idx = self.live_index(id)?;
        self.step(window, idx, -1)
    }

    pub fn navigator(&self, id: &str) -> Option<&Navigator> {
        self.by_id.get(id).map(|&idx| &self.navigators[idx])
    }

    /// All navigators in document order, destroyed ones included
    pub fn navigators(&self) -> &[Navigator] {
        &self.navigators
    }

    /// Live delegated subscriptions across all tracks
    pub fn subscription_count(&self) -> usize {
        self.delegator.len()
    }

    /// React to one host event
    pub fn handle_event(&mut self, window: &mut Window, event: &HostEvent) {
        let result = match event {
            HostEvent::Dom(ui) => match ui.event_type {
                EventType::Click | EventType::KeyDown => self.handle_delegated(window, ui),
                EventType::Scroll => self.handle_scroll(window, ui.target, false),
                EventType::ScrollEnd => self.handle_scroll(window, ui.target, true),
                EventType::Resize => {
                    self.handle_resize(window);
                    Ok(())
                }
            },
            HostEvent::Timer(timer) => self.handle_timer(window, *timer),
            HostEvent::Intersection { observer, entries } => {
                self.handle_intersection(window, *observer, entries)
            }
        };
        if let Err(err) = result {
            tracing::warn!("Track event handling failed: {}", err);
        }
    }

    // Lifecycle

    fn live_index(&self, id: &str) -> TrackResult<usize> {
        let idx = *self
            .by_id
            .get(id)
            .ok_or_else(|| TrackError::UnknownTrack(id.to_string()))?;
        if self.navigators[idx].destroyed {
            return Err(TrackError::Destroyed(id.to_string()));
        }
        Ok(idx)
    }

    fn setup(&mut self, window: &mut Window, idx: usize) -> TrackResult<()> {
        let config = &self.config;
        let nav = &mut self.navigators[idx];
        let tree = window.tree_mut();

        nav.strip = tree.query_selector(nav.container, &config.panels_selector);
        nav.pagination = tree.query_selector(nav.container, &config.pagination_selector);
        nav.active = 0;
        nav.armed = None;
        nav.scrolling = false;

        match nav.strip {
            Some(strip) => {
                nav.padding = partition::peeking_padding(tree, strip);
                nav.pages =
                    partition::paginate(tree, &nav.id, strip, &config.visible_panels_property)?;
            }
            None => {
                tracing::warn!("{}: no {} element, track is inert", nav.id, config.panels_selector);
                nav.padding = 0.0;
                nav.pages.clear();
            }
        }

        nav.in_view = vec![false; nav.pages.len()];

        if let Some(list) = nav.pagination {
            pagination::build(tree, list, nav.pages.len())?;
        }
        let arrow_selector = format!("{}, {}", config.prev_selector, config.next_selector);
        let arrows = tree.query_selector_all(nav.container, &arrow_selector);
        pagination::set_controls_visibility(tree, nav.container, nav.pagination, &arrows, nav.pages.len())?;
        observers::apply_page_reachability(tree, &nav.pages, 0)?;
        nav.live_region = live_region::ensure(tree, nav.container, config)?;

        nav.observers = observers::attach(window, nav, config);

        let page_control = format!("[{}]", pagination::PAGE_INDEX_ATTR);
        let subscriptions = [
            (EventType::Click, page_control.as_str(), TrackAction::PageControl),
            (EventType::Click, config.prev_selector.as_str(), TrackAction::Prev),
            (EventType::Click, config.next_selector.as_str(), TrackAction::Next),
            (EventType::KeyDown, arrow_selector.as_str(), TrackAction::Keyboard),
        ];
        for (event_type, selector, action) in subscriptions {
            let handler = Handler { track: idx, action };
            let sub = self
                .delegator
                .subscribe(nav.container, event_type, selector, handler)?;
            nav.subscriptions.push(sub);
        }

        tracing::info!("{}: {} pages", nav.id, nav.pages.len());
        Ok(())
    }

    fn teardown(&mut self, window: &mut Window, idx: usize) {
        let nav = &mut self.navigators[idx];
        if let Some(pair) = nav.observers.take() {
            observers::detach(window, pair);
        }
        cancel_timers(window, nav);
        for sub in nav.subscriptions.drain(..) {
            self.delegator.unsubscribe(sub);
        }
        nav.armed = None;
        nav.in_view.clear();
        nav.scrolling = false;
    }

    // Navigation

    fn step(&mut self, window: &mut Window, idx: usize, delta: isize) -> TrackResult<bool> {
        let active = self.navigators[idx].active as isize;
        self.navigate(window, idx, active + delta)
    }

    fn navigate(&mut self, window: &mut Window, idx: usize, page: isize) -> TrackResult<bool> {
        let nav = &mut self.navigators[idx];
        if nav.is_inert() {
            tracing::debug!("{}: navigation ignored with {} pages", nav.id, nav.pages.len());
            return Ok(false);
        }

        let page = wrap_index(page, nav.pages.len());
        nav.active = page;
        cancel_timers(window, nav);

        if let (Some(strip), Some(left)) = (nav.strip, nav.scroll_target(window.tree(), page)) {
            window.scroll_to(strip, left, ScrollBehavior::Smooth);
        }
        render(window.tree_mut(), nav)?;

        let timer = window.set_timeout(self.config.confirm_debounce_ms);
        nav.confirm = Some((timer, page));
        tracing::debug!("{}: navigating to page {}", nav.id, page);
        Ok(true)
    }

    /// Commit the page the settle observer armed. A settled scroll
    /// supersedes any pending confirmation of an earlier request.
    fn confirm_armed(&mut self, window: &mut Window, idx: usize) -> DomResult<()> {
        let nav = &mut self.navigators[idx];
        let Some(page) = nav.armed else {
            return Ok(());
        };
        if let Some((timer, _)) = nav.confirm.take() {
            window.clear_timeout(timer);
        }
        nav.active = page;
        nav.scrolling = false;
        tracing::debug!("{}: settled on page {}", nav.id, page);
        render(window.tree_mut(), nav)
    }

    fn apply_settle(&mut self, window: &mut Window, idx: usize, action: SettleAction) -> DomResult<()> {
        match action {
            SettleAction::Ignore => Ok(()),
            SettleAction::ConfirmNow => self.confirm_armed(window, idx),
            SettleAction::Debounce(delay) => {
                let nav = &mut self.navigators[idx];
                if let Some(timer) = nav.settle.take() {
                    window.clear_timeout(timer);
                }
                nav.settle = Some(window.set_timeout(delay));
                Ok(())
            }
        }
    }

    // Event routing

    fn handle_delegated(&mut self, window: &mut Window, ui: &UiEvent) -> TrackResult<()> {
        for hit in self.delegator.dispatch(window.tree(), ui) {
            let Handler { track, action } = hit.handler;
            let page = match action {
                TrackAction::PageControl => {
                    match pagination::page_index(window.tree(), hit.current_target) {
                        Some(page) => page,
                        None => {
                            tracing::debug!("Ignoring pagination control without a page index");
                            continue;
                        }
                    }
                }
                TrackAction::Prev => self.navigators[track].active as isize - 1,
                TrackAction::Next => self.navigators[track].active as isize + 1,
                TrackAction::Keyboard => {
                    let Some(key) = ui.key.as_ref() else {
                        continue;
                    };
                    let active = self.navigators[track].active as isize;
                    match keyboard::intent(window.tree(), ui.target, key, &self.config) {
                        Some(KeyboardIntent::Next) => active + 1,
                        Some(KeyboardIntent::Prev) => active - 1,
                        None => continue,
                    }
                }
            };
            self.navigate(window, track, page)?;
        }
        Ok(())
    }

    fn handle_scroll(&mut self, window: &mut Window, target: NodeId, ended: bool) -> TrackResult<()> {
        let Some(signal) = self.signal.as_deref() else {
            return Ok(());
        };
        let mut actions = Vec::new();
        for (idx, nav) in self.navigators.iter_mut().enumerate() {
            if nav.destroyed || nav.strip != Some(target) {
                continue;
            }
            let armed = nav.armed.is_some();
            let action = if ended {
                signal.on_scroll_end(armed)
            } else {
                nav.scrolling = true;
                signal.on_scroll(armed)
            };
            actions.push((idx, action));
        }
        for (idx, action) in actions {
            self.apply_settle(window, idx, action)?;
        }
        Ok(())
    }

    fn handle_intersection(
        &mut self,
        window: &mut Window,
        observer: ObserverId,
        entries: &[IntersectionObserverEntry],
    ) -> TrackResult<()> {
        let Some(idx) = self
            .navigators
            .iter()
            .position(|n| !n.destroyed && n.observer_ids().is_some_and(|(s, t)| s == observer || t == observer))
        else {
            return Ok(());
        };
        let nav = &mut self.navigators[idx];
        let Some((settle_observer, _)) = nav.observer_ids() else {
            return Ok(());
        };

        if observer != settle_observer {
            observers::apply_tabbing(window.tree_mut(), entries)?;
            return Ok(());
        }
        if !observers::rearm(nav, entries) {
            return Ok(());
        }
        let scrolling = nav.scrolling;
        let action = match self.signal.as_deref() {
            Some(signal) => signal.on_armed(scrolling),
            None => SettleAction::Ignore,
        };
        self.apply_settle(window, idx, action)?;
        Ok(())
    }

    fn handle_timer(&mut self, window: &mut Window, timer: TimerId) -> TrackResult<()> {
        for idx in 0..self.navigators.len() {
            let nav = &mut self.navigators[idx];
            if let Some((_, page)) = nav.confirm.filter(|&(t, _)| t == timer) {
                nav.confirm = None;
                nav.active = page;
                render(window.tree_mut(), nav)?;
                return Ok(());
            }
            if nav.settle == Some(timer) {
                nav.settle = None;
                self.confirm_armed(window, idx)?;
                return Ok(());
            }
        }
        Ok(())
    }

    /// Reset every live track; one failing track does not stop the rest
    fn handle_resize(&mut self, window: &mut Window) {
        let ids: Vec<String> = self
            .navigators
            .iter()
            .filter(|n| !n.destroyed)
            .map(|n| n.id.clone())
            .collect();
        for id in ids {
            if let Err(err) = self.reset(window, &id) {
                tracing::warn!("{}: reset on resize failed: {}", id, err);
            }
        }
    }
}

impl Default for TrackManager {
    fn default() -> Self {
        Self::new(TrackConfig::default())
    }
}

fn cancel_timers(window: &mut Window, nav: &mut Navigator) {
    if let Some((timer, _)) = nav.confirm.take() {
        window.clear_timeout(timer);
    }
    if let Some(timer) = nav.settle.take() {
        window.clear_timeout(timer);
    }
}

/// Reflect the active page in pagination and the live region
fn render(tree: &mut DomTree, nav: &Navigator) -> DomResult<()> {
    if let Some(list) = nav.pagination {
        pagination::update(tree, list, nav.active)?;
    }
    if let Some(region) = nav.live_region {
        live_region::announce(tree, region, nav.active, nav.pages.len())?;
    }
    Ok(())
}
