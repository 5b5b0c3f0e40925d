//! Listener registry shared by the observer adapters.
//!
//! Push-based: subscribers register callbacks that are invoked when the
//! environment reports a change. The registry holds strong references to
//! subscribers until they unsubscribe or the registry is dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::ports::outbound::SubscriptionId;

type Listener<T> = Rc<dyn Fn(T)>;

/// Single-threaded callback registry keyed by [`SubscriptionId`]
pub struct ListenerRegistry<T: Clone> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, Listener<T>)>>,
}

impl<T: Clone> ListenerRegistry<T> {
    /// Create a new registry with no subscribers.
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Register a callback and return its subscription id.
    pub fn subscribe(&self, callback: Listener<T>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.listeners.borrow_mut().push((id, callback));
        id
    }

    /// Remove a subscriber. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    /// Dispatch a value to all subscribers.
    ///
    /// Works on a snapshot, so a callback may subscribe or unsubscribe
    /// without poisoning the borrow.
    pub fn dispatch(&self, value: T) {
        let snapshot: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in snapshot {
            callback(value.clone());
        }
    }

    /// Get the number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<T: Clone> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_and_dispatch() {
        let registry = ListenerRegistry::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        registry.subscribe(Rc::new(move |v| sink.borrow_mut().push(v)));

        assert_eq!(registry.subscriber_count(), 1);

        registry.dispatch(1);
        registry.dispatch(2);

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let registry = ListenerRegistry::<u32>::new();
        let count = Rc::new(Cell::new(0));

        let counter = Rc::clone(&count);
        let id = registry.subscribe(Rc::new(move |_| counter.set(counter.get() + 1)));
        registry.dispatch(7);
        registry.unsubscribe(id);
        registry.dispatch(8);

        assert_eq!(count.get(), 1);
        assert_eq!(registry.subscriber_count(), 0);
    }

    #[test]
    fn test_callback_may_unsubscribe_itself() {
        let registry = Rc::new(ListenerRegistry::<u32>::new());
        let own_id = Rc::new(Cell::new(None));

        let reg = Rc::clone(&registry);
        let slot = Rc::clone(&own_id);
        let id = registry.subscribe(Rc::new(move |_| {
            if let Some(id) = slot.get() {
                reg.unsubscribe(id);
            }
        }));
        own_id.set(Some(id));

        registry.dispatch(1);
        assert_eq!(registry.subscriber_count(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let registry = ListenerRegistry::<()>::new();
        let a = registry.subscribe(Rc::new(|_| {}));
        let b = registry.subscribe(Rc::new(|_| {}));
        assert_ne!(a, b);
    }
}
