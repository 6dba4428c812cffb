//! Typed publish/subscribe channel.
//!
//! A `NotificationBus<E>` replaces string-keyed global event names: the
//! payload type `E` is the whole contract between a publisher and its
//! subscribers. Delivery is synchronous and in subscription order.

use std::fmt;

/// Handle returned by [`NotificationBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<E> = Box<dyn FnMut(&E)>;

/// A single-threaded, synchronous notification channel for events of type `E`.
pub struct NotificationBus<E> {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber<E>)>,
}

impl<E> NotificationBus<E> {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Registers a subscriber. It receives every event published afterwards.
    pub fn subscribe(&mut self, subscriber: Box<dyn FnMut(&E)>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, subscriber));
        id
    }

    /// Removes a subscriber. Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Delivers `event` to every subscriber.
    pub fn publish(&mut self, event: &E) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(event);
        }
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<E> Default for NotificationBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for NotificationBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationBus")
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_publish_reaches_every_subscriber_in_order() {
        // Arrange
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = NotificationBus::<u32>::new();
        let first = Rc::clone(&seen);
        bus.subscribe(Box::new(move |n: &u32| first.borrow_mut().push(("first", *n))));
        let second = Rc::clone(&seen);
        bus.subscribe(Box::new(move |n: &u32| second.borrow_mut().push(("second", *n))));

        // Act
        bus.publish(&7);

        // Assert
        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        // Arrange
        let count = Rc::new(RefCell::new(0));
        let mut bus = NotificationBus::<()>::new();
        let counter = Rc::clone(&count);
        let id = bus.subscribe(Box::new(move |_: &()| *counter.borrow_mut() += 1));

        // Act
        bus.publish(&());
        let removed = bus.unsubscribe(id);
        bus.publish(&());

        // Assert
        assert!(removed);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_unknown_id_returns_false() {
        let mut bus = NotificationBus::<()>::default();

        assert!(!bus.unsubscribe(SubscriptionId(42)));
    }
}
