//! natura Accessibility
//!
//! Accessibility primitives shared by natura widgets:
//! - ARIA roles and live-region politeness values
//! - Tab index / keyboard reachability
//! - Live region change detection (what assistive technology would announce)

pub mod aria;
pub mod focus;
pub mod live_region;

pub use aria::{AriaRole, LiveRegionMode, LiveRelevant, aria_bool};
pub use focus::TabIndex;
pub use live_region::{
    ChangeType, LiveRegionAttributes, LiveRegionChange, LiveRegionConfig, LiveRegionTracker,
    RelevantFlags,
};

/// Accessibility error
#[derive(Debug, thiserror::Error)]
pub enum A11yError {
    #[error("Invalid aria-live value: {0}")]
    InvalidLiveMode(String),
}
