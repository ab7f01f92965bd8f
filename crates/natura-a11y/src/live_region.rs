//! Live Region Support
//!
//! Change detection for ARIA live regions. The tracker is fed the text of
//! each registered region after every mutation and queues what a screen
//! reader would speak.

use std::collections::VecDeque;

use crate::A11yError;
use crate::aria::{AriaRole, LiveRegionMode, LiveRelevant};

const MAX_PENDING: usize = 100;

/// Live region configuration
#[derive(Debug, Clone)]
pub struct LiveRegionConfig {
    pub politeness: LiveRegionMode,
    /// Announce the whole region instead of the delta
    pub atomic: bool,
    pub relevant: RelevantFlags,
    /// `aria-busy`: changes are held back while set
    pub busy: bool,
}

impl Default for LiveRegionConfig {
    fn default() -> Self {
        Self {
            politeness: LiveRegionMode::Off,
            atomic: false,
            relevant: RelevantFlags::additions_text(),
            busy: false,
        }
    }
}

impl LiveRegionConfig {
    pub fn polite() -> Self {
        Self {
            politeness: LiveRegionMode::Polite,
            ..Default::default()
        }
    }

    /// Build from a region's ARIA attributes. An explicit `aria-live` wins
    /// over the role; `fallback` applies when neither gives a politeness.
    pub fn from_attributes(
        attrs: &LiveRegionAttributes<'_>,
        fallback: LiveRegionMode,
    ) -> Result<Self, A11yError> {
        let role = attrs.role.and_then(AriaRole::parse);
        let politeness = match attrs.live {
            Some(value) => LiveRegionMode::parse(value)?,
            None => role.map_or(fallback, |r| r.implicit_live_mode()),
        };
        let atomic = match attrs.atomic {
            Some(value) => value.trim() == "true",
            None => role.is_some_and(|r| r.implicit_atomic()),
        };
        let relevant = attrs
            .relevant
            .map_or_else(RelevantFlags::additions_text, |value| {
                RelevantFlags::from_aria(&LiveRelevant::parse_list(value))
            });
        Ok(Self {
            politeness,
            atomic,
            relevant,
            busy: attrs.busy.is_some_and(|value| value.trim() == "true"),
        })
    }

    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }
}

/// Raw ARIA attribute values of a live region element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveRegionAttributes<'a> {
    pub live: Option<&'a str>,
    pub role: Option<&'a str>,
    pub atomic: Option<&'a str>,
    pub relevant: Option<&'a str>,
    pub busy: Option<&'a str>,
}

/// `aria-relevant` flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelevantFlags {
    pub additions: bool,
    pub removals: bool,
    pub text: bool,
}

impl RelevantFlags {
    pub fn all() -> Self {
        Self { additions: true, removals: true, text: true }
    }

    pub fn additions_text() -> Self {
        Self { additions: true, removals: false, text: true }
    }

    pub fn from_aria(relevant: &[LiveRelevant]) -> Self {
        let mut flags = Self::default();
        for r in relevant {
            match r {
                LiveRelevant::Additions => flags.additions = true,
                LiveRelevant::Removals => flags.removals = true,
                LiveRelevant::Text => flags.text = true,
                LiveRelevant::All => return Self::all(),
            }
        }
        if flags == Self::default() {
            Self::additions_text()
        } else {
            flags
        }
    }
}

/// Type of change detected in live region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Addition,
    Removal,
    TextChange,
}

/// A queued announcement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveRegionChange {
    pub region_id: u64,
    pub change_type: ChangeType,
    pub text: String,
    pub politeness: LiveRegionMode,
    /// Assertive changes flush queued polite ones
    pub interrupt: bool,
    pub timestamp_ms: u64,
}

#[derive(Debug)]
struct RegisteredRegion {
    id: u64,
    config: LiveRegionConfig,
    last_content: String,
    last_child_count: usize,
}

/// Live region tracker
#[derive(Debug, Default)]
pub struct LiveRegionTracker {
    regions: Vec<RegisteredRegion>,
    pending: VecDeque<LiveRegionChange>,
}

impl LiveRegionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-register) a region. `Off` regions are never tracked.
    pub fn register(&mut self, id: u64, config: LiveRegionConfig) {
        self.regions.retain(|r| r.id != id);
        if config.politeness == LiveRegionMode::Off {
            return;
        }
        tracing::trace!(region = id, politeness = config.politeness.as_str(), "live region registered");
        self.regions.push(RegisteredRegion {
            id,
            config,
            last_content: String::new(),
            last_child_count: 0,
        });
    }

    pub fn unregister(&mut self, id: u64) {
        self.regions.retain(|r| r.id != id);
    }

    pub fn is_live_region(&self, id: u64) -> bool {
        self.regions.iter().any(|r| r.id == id)
    }

    /// Feed the region's current text. Clearing a region is recorded but
    /// produces no announcement.
    pub fn update_content(&mut self, id: u64, content: &str, child_count: usize, now_ms: u64) {
        let Some(region) = self.regions.iter_mut().find(|r| r.id == id) else {
            return;
        };

        let change_type = if region.config.busy || content.trim().is_empty() {
            None
        } else if region.config.relevant.text && content != region.last_content {
            Some(ChangeType::TextChange)
        } else if child_count > region.last_child_count && region.config.relevant.additions {
            Some(ChangeType::Addition)
        } else if child_count < region.last_child_count && region.config.relevant.removals {
            Some(ChangeType::Removal)
        } else {
            None
        };

        let change = change_type.map(|change_type| LiveRegionChange {
            region_id: id,
            change_type,
            text: content.to_string(),
            politeness: region.config.politeness,
            interrupt: region.config.politeness == LiveRegionMode::Assertive,
            timestamp_ms: now_ms,
        });

        if !region.config.busy {
            region.last_content = content.to_string();
            region.last_child_count = child_count;
        }

        if let Some(change) = change {
            self.queue_change(change);
        }
    }

    /// Set `aria-busy`. Clearing it announces the settled content.
    pub fn set_busy(&mut self, id: u64, busy: bool, content: &str, now_ms: u64) {
        let Some(region) = self.regions.iter_mut().find(|r| r.id == id) else {
            return;
        };
        let was_busy = region.config.busy;
        region.config.busy = busy;
        if was_busy && !busy {
            let child_count = region.last_child_count;
            region.last_content.clear();
            self.update_content(id, content, child_count, now_ms);
        }
    }

    fn queue_change(&mut self, change: LiveRegionChange) {
        tracing::debug!(region = change.region_id, text = %change.text, "live region change");
        if change.interrupt {
            self.pending.retain(|c| c.politeness == LiveRegionMode::Assertive);
        }
        self.pending.push_back(change);
        while self.pending.len() > MAX_PENDING {
            self.pending.pop_front();
        }
    }

    /// Next announcement, assertive first
    pub fn next_change(&mut self) -> Option<LiveRegionChange> {
        if let Some(pos) = self
            .pending
            .iter()
            .position(|c| c.politeness == LiveRegionMode::Assertive)
        {
            return self.pending.remove(pos);
        }
        self.pending.pop_front()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevant_flags() {
        assert_eq!(RelevantFlags::from_aria(&[]), RelevantFlags::additions_text());
        assert_eq!(RelevantFlags::from_aria(&[LiveRelevant::All]), RelevantFlags::all());
        let removals = RelevantFlags::from_aria(&[LiveRelevant::Removals]);
        assert!(removals.removals && !removals.text);
    }

    #[test]
    fn test_config_from_attributes() {
        let explicit = LiveRegionAttributes {
            live: Some("assertive"),
            role: Some("status"),
            relevant: Some("removals"),
            ..Default::default()
        };
        let config = LiveRegionConfig::from_attributes(&explicit, LiveRegionMode::Off).unwrap();
        assert_eq!(config.politeness, LiveRegionMode::Assertive);
        assert!(config.atomic);
        assert!(config.relevant.removals && !config.relevant.text);

        let bare = LiveRegionAttributes {
            busy: Some("true"),
            ..Default::default()
        };
        let config = LiveRegionConfig::from_attributes(&bare, LiveRegionMode::Polite).unwrap();
        assert_eq!(config.politeness, LiveRegionMode::Polite);
        assert!(!config.atomic && config.busy);
        assert_eq!(config.relevant, RelevantFlags::additions_text());

        let bad = LiveRegionAttributes {
            live: Some("loud"),
            ..Default::default()
        };
        assert!(matches!(
            LiveRegionConfig::from_attributes(&bad, LiveRegionMode::Polite),
            Err(A11yError::InvalidLiveMode(_))
        ));
    }

    #[test]
    fn test_registration() {
        let mut tracker = LiveRegionTracker::new();
        tracker.register(1, LiveRegionConfig::polite());
        tracker.register(2, LiveRegionConfig::default());
        assert!(tracker.is_live_region(1));
        assert!(!tracker.is_live_region(2));

        tracker.unregister(1);
        assert!(!tracker.is_live_region(1));
    }

    #[test]
    fn test_text_changes_are_queued() {
        let mut tracker = LiveRegionTracker::new();
        tracker.register(1, LiveRegionConfig::polite().with_atomic(true));

        tracker.update_content(1, "Page 1 of 3", 1, 10);
        tracker.update_content(1, "Page 2 of 3", 1, 20);
        // Unchanged text is not repeated
        tracker.update_content(1, "Page 2 of 3", 1, 30);

        assert_eq!(tracker.pending_count(), 2);
        let first = tracker.next_change().unwrap();
        assert_eq!(first.text, "Page 1 of 3");
        assert_eq!(first.timestamp_ms, 10);
        let second = tracker.next_change().unwrap();
        assert_eq!(second.text, "Page 2 of 3");
        assert_eq!(second.change_type, ChangeType::TextChange);
        assert_eq!(tracker.pending_count(), 0);
    }

    #[test]
    fn test_clearing_is_silent() {
        let mut tracker = LiveRegionTracker::new();
        tracker.register(1, LiveRegionConfig::polite());
        tracker.update_content(1, "Page 1 of 2", 1, 0);
        tracker.clear_pending();

        tracker.update_content(1, "", 0, 5);
        assert_eq!(tracker.pending_count(), 0);

        // Same text after a clear is announced again
        tracker.update_content(1, "Page 1 of 2", 1, 10);
        assert_eq!(tracker.pending_count(), 1);
    }

    #[test]
    fn test_assertive_priority() {
        let mut tracker = LiveRegionTracker::new();
        tracker.register(1, LiveRegionConfig::polite());
        let alert = LiveRegionAttributes {
            role: Some("alert"),
            ..Default::default()
        };
        tracker.register(2, LiveRegionConfig::from_attributes(&alert, LiveRegionMode::Off).unwrap());

        tracker.update_content(1, "Polite message", 1, 0);
        tracker.update_content(2, "Assertive message", 1, 0);

        let change = tracker.next_change().unwrap();
        assert_eq!(change.politeness, LiveRegionMode::Assertive);
        // Assertive flushed the polite queue
        assert_eq!(tracker.pending_count(), 0);
    }

    #[test]
    fn test_busy_state() {
        let mut tracker = LiveRegionTracker::new();
        tracker.register(1, LiveRegionConfig::polite());

        tracker.set_busy(1, true, "", 0);
        tracker.update_content(1, "During busy", 1, 1);
        assert_eq!(tracker.pending_count(), 0);

        tracker.set_busy(1, false, "During busy", 2);
        assert_eq!(tracker.next_change().unwrap().text, "During busy");
    }
}
