//! Keyboard Navigation Handler

use natura_dom::{DomTree, ElementQuery, Key, NodeId};

use crate::TrackConfig;

/// Page step requested from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardIntent {
    Next,
    Prev,
}

/// ArrowRight on the next control or ArrowLeft on the prev control;
/// every other key/target pair is ignored
pub(crate) fn intent(
    tree: &DomTree,
    target: NodeId,
    key: &Key,
    config: &TrackConfig,
) -> Option<KeyboardIntent> {
    match key {
        Key::ArrowRight if tree.matches(target, &config.next_selector) => Some(KeyboardIntent::Next),
        Key::ArrowLeft if tree.matches(target, &config.prev_selector) => Some(KeyboardIntent::Prev),
        _ => None,
    }
}
