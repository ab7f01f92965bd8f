//! Focus Management
//!
//! Tab index values as they control keyboard reachability.

/// Tab index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    /// `tabindex="-1"`: focusable by script, skipped by Tab
    NotFocusable,
    /// `tabindex="0"` or positive
    Sequential(i32),
}

impl TabIndex {
    /// Tab index for a reachability flag
    pub fn from_reachable(reachable: bool) -> Self {
        if reachable {
            Self::Sequential(0)
        } else {
            Self::NotFocusable
        }
    }

    /// Attribute value
    pub fn to_attr(&self) -> String {
        match self {
            Self::NotFocusable => "-1".to_string(),
            Self::Sequential(n) => n.to_string(),
        }
    }
}
