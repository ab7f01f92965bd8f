//! Scroll settle detection
//!
//! A page armed by the settle observer is confirmed once scrolling has
//! settled. Hosts that fire `scrollend` confirm on that event; others
//! treat a quiet period after the last scroll or visibility change as
//! the end of the scroll.

use std::fmt;

/// What the navigator should do in response to a settle input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleAction {
    Ignore,
    /// Confirm the armed page now
    ConfirmNow,
    /// (Re)start the settle timer
    Debounce(u64),
}

/// Scroll settle capability, chosen once per manager
pub trait SettleSignal: fmt::Debug {
    /// A `scroll` event on the strip
    fn on_scroll(&self, armed: bool) -> SettleAction;

    /// A `scrollend` event on the strip
    fn on_scroll_end(&self, armed: bool) -> SettleAction;

    /// The settle observer armed a page
    fn on_armed(&self, scrolling: bool) -> SettleAction;

    fn name(&self) -> &'static str;
}

/// Uses the host's `scrollend` event
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeScrollEnd;

impl SettleSignal for NativeScrollEnd {
    fn on_scroll(&self, _armed: bool) -> SettleAction {
        SettleAction::Ignore
    }

    fn on_scroll_end(&self, armed: bool) -> SettleAction {
        if armed {
            SettleAction::ConfirmNow
        } else {
            SettleAction::Ignore
        }
    }

    fn on_armed(&self, _scrolling: bool) -> SettleAction {
        SettleAction::Ignore
    }

    fn name(&self) -> &'static str {
        "scrollend"
    }
}

/// Debounces scroll and visibility activity
#[derive(Debug, Clone, Copy)]
pub struct ScrollDebounce {
    pub delay_ms: u64,
}

impl SettleSignal for ScrollDebounce {
    fn on_scroll(&self, armed: bool) -> SettleAction {
        if armed {
            SettleAction::Debounce(self.delay_ms)
        } else {
            SettleAction::Ignore
        }
    }

    fn on_scroll_end(&self, _armed: bool) -> SettleAction {
        SettleAction::Ignore
    }

    fn on_armed(&self, scrolling: bool) -> SettleAction {
        if scrolling {
            SettleAction::Debounce(self.delay_ms)
        } else {
            SettleAction::Ignore
        }
    }

    fn name(&self) -> &'static str {
        "scroll-debounce"
    }
}

/// Pick the settle capability for a host
pub(crate) fn select(supports_scroll_end: bool, debounce_ms: u64) -> Box<dyn SettleSignal> {
    if supports_scroll_end {
        Box::new(NativeScrollEnd)
    } else {
        Box::new(ScrollDebounce {
            delay_ms: debounce_ms,
        })
    }
}
