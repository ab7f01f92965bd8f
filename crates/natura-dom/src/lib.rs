//! natura DOM - Document Object Model
//!
//! Arena-backed DOM tree plus the pieces of the browser host the widget
//! toolkit talks to: selectors, geometry, strip layout, UI events, event
//! delegation, focusable enumeration, intersection observers and the
//! `Window` event loop.

mod node;
mod tree;
mod document;
mod attributes;
mod classlist;
mod style;
pub mod selector;
pub mod geometry;
pub mod layout;
pub mod events;
pub mod delegation;
pub mod focusable;
pub mod observer;
pub mod window;

pub use node::{Node, NodeData, ElementData};
pub use tree::DomTree;
pub use document::Document;
pub use attributes::{Attr, NamedNodeMap};
pub use classlist::DOMTokenList;
pub use style::{InlineStyle, parse_int};
pub use selector::{ElementQuery, Selector};
pub use geometry::{DOMRect, ElementGeometry, ScrollBehavior};
pub use events::{EventType, Key, UiEvent};
pub use delegation::{DelegatedMatch, EventDelegator, SubscriptionId};
pub use focusable::focusable_elements;
pub use observer::{
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ObserverId,
    RootMargin,
};
pub use window::{HostConfig, HostEvent, TimerId, Window};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Arena slot of this node
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("node {0:?} not found")]
    NotFound(NodeId),

    /// Hierarchy error (e.g., inserting an ancestor)
    #[error("hierarchy request error")]
    HierarchyRequest,

    /// Operation needs an element
    #[error("node {0:?} is not an element")]
    InvalidNodeType(NodeId),

    /// Node is not a child of the given parent
    #[error("node {0:?} is not a child")]
    NotAChild(NodeId),

    /// Selector could not be parsed
    #[error("invalid selector: {0}")]
    InvalidSelector(String),
}
