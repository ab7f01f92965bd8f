//! Event delegation
//!
//! One subscription per (scope, event type, selector); dispatch walks from
//! the event target up to the scope and reports the closest match for
//! every subscription, like a single listener on the scope element.

use crate::{DomResult, DomTree, EventType, NodeId, Selector, UiEvent};

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone)]
struct Subscription<H> {
    id: SubscriptionId,
    scope: NodeId,
    event_type: EventType,
    selector: Selector,
    handler: H,
}

/// A subscription that matched a dispatched event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegatedMatch<H> {
    pub subscription: SubscriptionId,
    pub handler: H,
    /// Element that matched the selector (the delegate target)
    pub current_target: NodeId,
}

/// Delegated event subscriptions
#[derive(Debug, Clone)]
pub struct EventDelegator<H> {
    subscriptions: Vec<Subscription<H>>,
    next_id: u64,
}

impl<H: Clone> EventDelegator<H> {
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 1,
        }
    }

    /// Listen for `event_type` on descendants of `scope` matching `selector`
    pub fn subscribe(
        &mut self,
        scope: NodeId,
        event_type: EventType,
        selector: &str,
        handler: H,
    ) -> DomResult<SubscriptionId> {
        let selector = Selector::parse(selector)?;
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            scope,
            event_type,
            selector,
            handler,
        });
        Ok(id)
    }

    /// Drop a subscription; returns whether it existed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Subscriptions matching the event, in subscription order
    pub fn dispatch(&self, tree: &DomTree, event: &UiEvent) -> Vec<DelegatedMatch<H>> {
        self.subscriptions
            .iter()
            .filter(|s| s.event_type == event.event_type)
            .filter_map(|s| {
                let hit = if event.event_type.bubbles() {
                    s.selector.closest(tree, event.target)?
                } else {
                    s.selector.matches(tree, event.target).then_some(event.target)?
                };
                tree.is_inclusive_ancestor(s.scope, hit).then(|| DelegatedMatch {
                    subscription: s.id,
                    handler: s.handler.clone(),
                    current_target: hit,
                })
            })
            .collect()
    }
}

impl<H: Clone> Default for EventDelegator<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Key;

    fn fixture() -> (DomTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let scope = tree.create_element("div");
        let button = tree.create_element("button");
        tree.set_attribute(button, "data-page-index", "1").unwrap();
        let span = tree.create_element("span");
        let outside = tree.create_element("button");
        tree.set_attribute(outside, "data-page-index", "0").unwrap();
        tree.append_child(tree.root(), scope).unwrap();
        tree.append_child(scope, button).unwrap();
        tree.append_child(button, span).unwrap();
        tree.append_child(tree.root(), outside).unwrap();
        (tree, scope, button, span, outside)
    }

    #[test]
    fn test_dispatch_resolves_closest_match() {
        let (tree, scope, button, span, _) = fixture();
        let mut delegator = EventDelegator::new();
        delegator
            .subscribe(scope, EventType::Click, "[data-page-index]", "page")
            .unwrap();

        let hits = delegator.dispatch(&tree, &UiEvent::click(span, 0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].handler, "page");
        assert_eq!(hits[0].current_target, button);
    }

    #[test]
    fn test_dispatch_stays_in_scope() {
        let (tree, scope, _, _, outside) = fixture();
        let mut delegator = EventDelegator::new();
        delegator
            .subscribe(scope, EventType::Click, "[data-page-index]", 1)
            .unwrap();
        assert!(delegator.dispatch(&tree, &UiEvent::click(outside, 0)).is_empty());
    }

    #[test]
    fn test_event_type_must_match() {
        let (tree, scope, button, _, _) = fixture();
        let mut delegator = EventDelegator::new();
        delegator.subscribe(scope, EventType::Click, "button", 1).unwrap();
        let key = UiEvent::key_down(button, Key::Enter, 0);
        assert!(delegator.dispatch(&tree, &key).is_empty());
    }

    #[test]
    fn test_unsubscribe() {
        let (_, scope, _, _, _) = fixture();
        let mut delegator = EventDelegator::new();
        let id = delegator.subscribe(scope, EventType::Click, "button", ()).unwrap();
        assert_eq!(delegator.len(), 1);
        assert!(delegator.unsubscribe(id));
        assert!(!delegator.unsubscribe(id));
        assert!(delegator.is_empty());
    }

    #[test]
    fn test_bad_selector_is_rejected() {
        let mut delegator: EventDelegator<()> = EventDelegator::new();
        assert!(delegator
            .subscribe(NodeId::ROOT, EventType::Click, "a b", ())
            .is_err());
    }
}
