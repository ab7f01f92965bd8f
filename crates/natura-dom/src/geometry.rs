//! Geometry APIs
//!
//! DOMRect plus the offset/client/scroll box an element exposes after
//! layout.

/// DOMRect - rectangle geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Left edge (same as x)
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Overlap on the horizontal axis only, keeping this rect's vertical extent
    pub fn horizontal_intersection(&self, other: &DOMRect) -> Option<DOMRect> {
        let x = self.x.max(other.x);
        let right = self.right().min(other.right());
        (right > x).then(|| DOMRect::from_xywh(x, self.y, right - x, self.height))
    }
}

/// Element geometry state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementGeometry {
    // Offset properties (relative to the containing scroll strip)
    pub offset_left: f64,
    pub offset_top: f64,
    pub offset_width: f64,
    pub offset_height: f64,

    // Client properties (content + padding, no scrollbar)
    pub client_width: f64,
    pub client_height: f64,

    // Scroll properties
    pub scroll_left: f64,
    pub scroll_width: f64,
}

impl ElementGeometry {
    /// Largest reachable `scroll_left`
    pub fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    /// Clamp a requested horizontal offset into the scrollable range
    pub fn clamp_scroll_left(&self, x: f64) -> f64 {
        x.max(0.0).min(self.max_scroll_left())
    }

    /// Border box relative to the offset parent
    pub fn offset_rect(&self) -> DOMRect {
        DOMRect::from_xywh(
            self.offset_left,
            self.offset_top,
            self.offset_width,
            self.offset_height,
        )
    }
}

/// Scroll behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump immediately
    #[default]
    Auto,
    /// Animate over several frames
    Smooth,
}
