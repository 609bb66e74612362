//! Observable values.
//!
//! A minimal change-notification cell: extensions publish their tray items
//! into an [`Observable`], and the tray subscribes to rebuild its menu.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: T,
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

/// A shared value whose changes are pushed to subscribers.
///
/// Listeners run synchronously on the thread calling [`Observable::set`],
/// after the internal lock is released, so a listener may read the value.
pub struct Observable<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Default + Clone + Send + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.lock().value.clone()
    }

    /// Replaces the value and notifies every subscriber.
    pub fn set(&self, value: T) {
        let (snapshot, listeners) = {
            let mut inner = self.inner.lock();
            inner.value = value;
            (inner.value.clone(), Self::listeners_of(&inner))
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Mutates the value in place and notifies every subscriber.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let (snapshot, listeners) = {
            let mut inner = self.inner.lock();
            f(&mut inner.value);
            (inner.value.clone(), Self::listeners_of(&inner))
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Calls `listener` with the current value now and after every change.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let listener: Listener<T> = Arc::new(listener);
        let (id, snapshot) = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, listener.clone()));
            (id, inner.value.clone())
        };

        listener(&snapshot);

        let weak: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.lock().listeners.retain(|(other, _)| *other != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    fn listeners_of(inner: &Inner<T>) -> Vec<Listener<T>> {
        inner.listeners.iter().map(|(_, l)| l.clone()).collect()
    }
}

/// Keeps a listener registered until disposed or dropped.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Removes the listener. Calling it again does nothing.
    pub fn dispose(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.unsubscribe.is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(&u32) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |v: &u32| sink.lock().push(*v))
    }

    #[test]
    fn test_subscribe_runs_immediately_then_on_change() {
        let observable = Observable::new(1u32);
        let (seen, listener) = recorder();

        let _subscription = observable.subscribe(listener);
        observable.set(2);
        observable.update(|v| *v += 5);

        assert_eq!(*seen.lock(), vec![1, 2, 7]);
        assert_eq!(observable.get(), 7);
    }

    #[test]
    fn test_dispose_is_idempotent_and_stops_notifications() {
        let observable = Observable::new(0u32);
        let (seen, listener) = recorder();

        let mut subscription = observable.subscribe(listener);
        subscription.dispose();
        subscription.dispose();
        observable.set(3);

        assert!(subscription.is_disposed());
        assert_eq!(observable.subscriber_count(), 0);
        assert_eq!(*seen.lock(), vec![0]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let observable = Observable::new(0u32);
        {
            let _subscription = observable.subscribe(|_| {});
            assert_eq!(observable.subscriber_count(), 1);
        }
        assert_eq!(observable.subscriber_count(), 0);
    }

    #[test]
    fn test_listener_can_read_value() {
        let observable = Observable::new(0u32);
        let reader = observable.clone();
        let (seen, _) = recorder();
        let sink = seen.clone();

        let _subscription = observable.subscribe(move |_| sink.lock().push(reader.get()));
        observable.set(9);

        assert_eq!(*seen.lock(), vec![0, 9]);
    }
}
