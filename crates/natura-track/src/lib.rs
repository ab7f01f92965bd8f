//! natura Track
//!
//! Paginated viewport navigator. A track is a container holding a
//! horizontally scrolling strip of panels; the navigator groups the panels
//! into pages and keeps pagination controls, keyboard navigation, the
//! screen-reader status and keyboard reachability of off-screen panels in
//! step with the scroll position.
//!
//! ```text
//! <div class="track" style="--visible-panels: 2">
//!   <ul class="track__panels" style="overflow-x: auto">
//!     <li>...</li> <li>...</li> ...
//!   </ul>
//!   <button data-track-prev>Prev</button>
//!   <button data-track-next>Next</button>
//!   <ol data-track-pagination></ol>
//! </div>
//! ```

mod config;
mod keyboard;
mod live_region;
mod manager;
mod navigator;
mod observers;
mod pagination;
mod partition;
mod settle;

pub use config::TrackConfig;
pub use keyboard::KeyboardIntent;
pub use manager::{TrackAction, TrackManager};
pub use navigator::{Navigator, wrap_index};
pub use partition::{Page, partition, visible_panel_count};
pub use settle::{NativeScrollEnd, ScrollDebounce, SettleAction, SettleSignal};

use natura_dom::DomError;

/// Track error
///
/// Only API misuse is reported; missing markup degrades the navigator instead.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Unknown track: {0}")]
    UnknownTrack(String),

    #[error("Track has been destroyed: {0}")]
    Destroyed(String),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
}

pub type TrackResult<T> = Result<T, TrackError>;
