//! UI Events
//!
//! The user-input and scroll events the host window delivers.

use crate::NodeId;

/// Event type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyDown,
    Scroll,
    ScrollEnd,
    Resize,
}

impl EventType {
    /// Check if this event type bubbles to ancestors
    pub fn bubbles(&self) -> bool {
        matches!(self, EventType::Click | EventType::KeyDown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Scroll => "scroll",
            Self::ScrollEnd => "scrollend",
            Self::Resize => "resize",
        }
    }
}

/// Physical key code of a keyboard event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    Space,
    Tab,
    Escape,
    Other(String),
}

impl Key {
    /// Parse a `KeyboardEvent.code` value
    pub fn from_code(code: &str) -> Self {
        match code {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "Enter" => Self::Enter,
            "Space" => Self::Space,
            "Tab" => Self::Tab,
            "Escape" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }
}

/// UI event
#[derive(Debug, Clone, PartialEq)]
pub struct UiEvent {
    pub event_type: EventType,
    pub target: NodeId,
    /// Key code for keyboard events
    pub key: Option<Key>,
    /// Host clock at dispatch (ms)
    pub timestamp: u64,
}

impl UiEvent {
    fn new(event_type: EventType, target: NodeId, timestamp: u64) -> Self {
        Self {
            event_type,
            target,
            key: None,
            timestamp,
        }
    }

    pub fn click(target: NodeId, timestamp: u64) -> Self {
        Self::new(EventType::Click, target, timestamp)
    }

    pub fn key_down(target: NodeId, key: Key, timestamp: u64) -> Self {
        Self {
            key: Some(key),
            ..Self::new(EventType::KeyDown, target, timestamp)
        }
    }

    pub fn scroll(target: NodeId, timestamp: u64) -> Self {
        Self::new(EventType::Scroll, target, timestamp)
    }

    pub fn scroll_end(target: NodeId, timestamp: u64) -> Self {
        Self::new(EventType::ScrollEnd, target, timestamp)
    }

    pub fn resize(target: NodeId, timestamp: u64) -> Self {
        Self::new(EventType::Resize, target, timestamp)
    }
}
