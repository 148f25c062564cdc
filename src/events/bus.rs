//! Session-scoped publish/subscribe channel.
//!
//! Delivery is synchronous and follows registration order. Subscribers are
//! plain closures owned by the bus; a subscriber registered for one
//! `EventKind` sees only that kind.

use super::event::{EventKind, GameEvent};

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&GameEvent)>;

struct Subscriber {
    id: SubscriptionId,
    filter: Option<EventKind>,
    handler: Handler,
}

/// Owned event channel of one engine.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to one kind of event.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.register(Some(kind), Box::new(handler))
    }

    /// Listen to every event.
    pub fn subscribe_all<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.register(None, Box::new(handler))
    }

    fn register(&mut self, filter: Option<EventKind>, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber { id, filter, handler });
        id
    }

    /// Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        before != self.subscribers.len()
    }

    /// Deliver `event` to matching subscribers in registration order.
    pub fn publish(&mut self, event: &GameEvent) {
        let kind = event.kind();
        for subscriber in &mut self.subscribers {
            if subscriber.filter.map_or(true, |f| f == kind) {
                (subscriber.handler)(event);
            }
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::Player;

    #[test]
    fn test_registration_order() {
        let mut bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            bus.subscribe_all(move |_| log.borrow_mut().push(tag));
        }
        bus.publish(&GameEvent::WinnerUpdated { winner: None });

        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_kind_filter() {
        let mut bus = EventBus::new();
        let hits = Rc::new(RefCell::new(0));

        let h = Rc::clone(&hits);
        bus.subscribe(EventKind::WinnerUpdated, move |_| *h.borrow_mut() += 1);

        bus.publish(&GameEvent::SelectionChanged { selected: vec![] });
        bus.publish(&GameEvent::WinnerUpdated { winner: Some(Player::Grey) });

        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let hits = Rc::new(RefCell::new(0));

        let h = Rc::clone(&hits);
        let id = bus.subscribe_all(move |_| *h.borrow_mut() += 1);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));

        bus.publish(&GameEvent::WinnerUpdated { winner: None });
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
