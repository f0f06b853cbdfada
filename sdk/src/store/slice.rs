//! Subscribable state containers.
//!
//! A [`Slice`] holds the current value of one piece of room state as an
//! immutable shared snapshot. Publishing replaces the snapshot; it never
//! mutates one a subscriber may still hold. An [`EventStream`] carries
//! ephemeral events with no current value.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Ordered list of subscriber callbacks.
struct Subscribers<T> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(SubscriptionId, Callback<T>)>>,
}

impl<T> Subscribers<T> {
    fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            entries: Mutex::new(Vec::new()),
        }
    }

    fn add(&self, callback: Callback<T>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.entries).push((id, callback));
        id
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        let mut entries = lock(&self.entries);
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    /// Calls every subscriber in registration order.
    ///
    /// The list is copied first so callbacks run without the lock held and
    /// may subscribe, unsubscribe or read other slices.
    fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = lock(&self.entries)
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        for callback in callbacks {
            callback(value);
        }
    }
}

/// The current value of one piece of state plus its subscribers.
pub struct Slice<T> {
    value: RwLock<Arc<T>>,
    subscribers: Subscribers<Arc<T>>,
}

impl<T> Slice<T> {
    /// Creates a slice holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            value: RwLock::new(Arc::new(initial)),
            subscribers: Subscribers::new(),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn get(&self) -> Arc<T> {
        Arc::clone(&self.value.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Registers a callback invoked with every newly published snapshot.
    ///
    /// The callback is not invoked with the current value; read it with
    /// [`Slice::get`].
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Arc<T>) + Send + Sync + 'static,
    {
        self.subscribers.add(Arc::new(callback))
    }

    /// Removes a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    /// Returns the number of subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Replaces the snapshot and notifies subscribers.
    pub(crate) fn publish(&self, next: T) {
        let snapshot = Arc::new(next);
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);
        self.subscribers.notify(&snapshot);
    }

    /// Runs a reducer against the current snapshot and publishes its result.
    ///
    /// The reducer runs under the write lock, so the read and the replace
    /// are one step; it must not touch this slice. Subscribers are notified
    /// after the lock is released. Returns true if the reducer produced a
    /// new value.
    pub(crate) fn update<F>(&self, reducer: F) -> bool
    where
        F: FnOnce(&T) -> Option<T>,
    {
        let snapshot = {
            let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);
            let Some(next) = reducer(&value) else {
                return false;
            };
            let snapshot = Arc::new(next);
            *value = Arc::clone(&snapshot);
            snapshot
        };
        self.subscribers.notify(&snapshot);
        true
    }
}

impl<T: fmt::Debug> fmt::Debug for Slice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slice")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// A stream of ephemeral events.
pub struct EventStream<T> {
    subscribers: Subscribers<T>,
}

impl<T> EventStream<T> {
    /// Creates a stream with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Subscribers::new(),
        }
    }

    /// Registers a callback invoked with every emitted event.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.subscribers.add(Arc::new(callback))
    }

    /// Removes a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    /// Returns the number of subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Delivers an event to every subscriber.
    pub(crate) fn emit(&self, event: T) {
        self.subscribers.notify(&event);
    }
}

impl<T> Default for EventStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_get_initial() {
        let slice = Slice::new(vec![1, 2]);
        assert_eq!(*slice.get(), vec![1, 2]);
    }

    #[test]
    fn test_subscribers_notified_in_registration_order() {
        let slice = Slice::new(0u32);
        let log = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            slice.subscribe(move |v: &Arc<u32>| {
                lock(&log).push(format!("{name}:{v}"));
            });
        }

        slice.publish(7);
        assert_eq!(
            *lock(&log),
            vec!["first:7", "second:7", "third:7"]
        );
    }

    #[test]
    fn test_held_snapshot_is_not_mutated() {
        let slice = Slice::new(vec!["a".to_string()]);
        let held = slice.get();

        slice.update(|current| {
            let mut next = current.clone();
            next.push("b".to_string());
            Some(next)
        });

        assert_eq!(*held, vec!["a".to_string()]);
        assert_eq!(slice.get().len(), 2);
    }

    #[test]
    fn test_update_none_does_not_notify() {
        let slice = Slice::new(1u8);
        let calls = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&calls);
        slice.subscribe(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        assert!(!slice.update(|_| None));
        assert_eq!(calls.load(Ordering::Relaxed), 0);

        assert!(slice.update(|v| Some(v + 1)));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert_eq!(*slice.get(), 2);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let slice = Arc::new(Slice::new(0u64));
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let slice = Arc::clone(&slice);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        slice.update(|v| Some(v + 1));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("worker");
        }
        assert_eq!(*slice.get(), 1000);
    }

    #[test]
    fn test_unsubscribe() {
        let slice = Slice::new(0u8);
        let id = slice.subscribe(|_| {});
        assert_eq!(slice.subscriber_count(), 1);
        assert!(slice.unsubscribe(id));
        assert!(!slice.unsubscribe(id));
        assert_eq!(slice.subscriber_count(), 0);
    }

    #[test]
    fn test_callback_may_read_slice() {
        let slice = Arc::new(Slice::new(0u8));
        let seen = Arc::new(Mutex::new(None));

        let reader = Arc::clone(&slice);
        let sink = Arc::clone(&seen);
        slice.subscribe(move |_| {
            *lock(&sink) = Some(*reader.get());
        });

        slice.publish(9);
        assert_eq!(*lock(&seen), Some(9));
    }

    #[test]
    fn test_event_stream_emit() {
        let stream = EventStream::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        stream.subscribe(move |e: &String| lock(&sink).push(e.clone()));

        stream.emit("one".to_string());
        stream.emit("two".to_string());

        assert_eq!(*lock(&received), vec!["one", "two"]);
    }
}
