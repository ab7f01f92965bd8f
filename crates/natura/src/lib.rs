//! natura
//!
//! Accessible widget toolkit. The core widget is the track, a paginated
//! viewport navigator over a horizontally scrolling strip of panels.
//!
//! # Example
//! ```rust,ignore
//! use natura::{Toolkit, ToolkitConfig};
//!
//! natura::init_logging();
//! let mut toolkit = Toolkit::from_html(html, ToolkitConfig::default())?;
//! toolkit.init();
//! toolkit.next("track-0")?;
//! toolkit.run_for(500);
//! for change in toolkit.announcements() {
//!     println!("{}", change.text);
//! }
//! ```

mod config;
mod logging;
mod toolkit;

pub use config::ToolkitConfig;
pub use logging::init_logging;
pub use toolkit::Toolkit;

// Re-export sub-crates for advanced usage
pub use natura_a11y as a11y;
pub use natura_dom as dom;
pub use natura_html as html;
pub use natura_track as track;

/// Toolkit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
