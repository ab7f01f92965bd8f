//! Track configuration

use serde::{Deserialize, Serialize};

/// Selectors, timings and observer tuning for tracks
///
/// The observer thresholds and margin factors are empirically tuned and
/// kept as defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Track containers
    pub track_selector: String,
    /// Scrolling strip inside a container
    pub panels_selector: String,
    pub pagination_selector: String,
    pub live_region_selector: String,
    pub prev_selector: String,
    pub next_selector: String,
    /// Custom property holding the visible panel count
    pub visible_panels_property: String,

    /// Delay before a requested page is confirmed (ms)
    pub confirm_debounce_ms: u64,
    /// Quiet period that counts as a settled scroll without `scrollend` (ms)
    pub scroll_debounce_ms: u64,

    pub settle_threshold: f64,
    /// Settle observer margin, as a fraction of the peeking padding
    pub settle_margin_factor: f64,
    pub tabbing_threshold: f64,
    /// Tabbing observer margin, as a fraction of the peeking padding
    pub tabbing_margin_factor: f64,

    /// Append a live region when the container has none
    pub create_live_region: bool,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            track_selector: ".track".into(),
            panels_selector: ".track__panels".into(),
            pagination_selector: "[data-track-pagination]".into(),
            live_region_selector: ".liveregion".into(),
            prev_selector: "[data-track-prev]".into(),
            next_selector: "[data-track-next]".into(),
            visible_panels_property: "--visible-panels".into(),
            confirm_debounce_ms: 300,
            scroll_debounce_ms: 250,
            settle_threshold: 0.5,
            settle_margin_factor: 0.5,
            tabbing_threshold: 0.5,
            tabbing_margin_factor: 1.0,
            create_live_region: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: TrackConfig =
            serde_json::from_str(r#"{ "confirm_debounce_ms": 500, "create_live_region": false }"#)
                .unwrap();
        assert_eq!(config.confirm_debounce_ms, 500);
        assert!(!config.create_live_region);
        assert_eq!(config.scroll_debounce_ms, 250);
        assert_eq!(config.panels_selector, ".track__panels");
        assert_eq!(config.settle_margin_factor, 0.5);
    }
}
