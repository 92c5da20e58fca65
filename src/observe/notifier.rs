use std::{
    any::Any,
    cell::RefCell,
    collections::HashMap,
    fmt,
    hash::Hash,
    rc::{Rc, Weak},
};

struct Slot<T> {
    callback: Box<dyn Fn(&T)>,
}

type SubscriberList<T> = Vec<Weak<Slot<T>>>;

/// RAII handle for a registered callback. Dropping it unsubscribes.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    _slot: Rc<dyn Any>,
}

impl Subscription {
    fn new<T: 'static>(slot: Rc<Slot<T>>) -> Self {
        let slot: Rc<dyn Any> = slot;
        Self { _slot: slot }
    }

    /// Explicitly cancel the subscription. Equivalent to dropping it.
    pub fn cancel(self) {}
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

fn register<T: 'static, F>(list: &mut SubscriberList<T>, f: F) -> Subscription
where
    F: Fn(&T) + 'static,
{
    let slot = Rc::new(Slot {
        callback: Box::new(f),
    });
    list.retain(|w| w.strong_count() > 0);
    list.push(Rc::downgrade(&slot));
    Subscription::new(slot)
}

/// Deliver `value` to every live subscriber of a snapshot.
///
/// Each weak entry is upgraded right before its call, so a handle dropped by an
/// earlier callback is never invoked. Returns `(delivered, saw_dead_entry)`.
fn deliver<T>(snapshot: &[Weak<Slot<T>>], value: &T) -> (usize, bool) {
    let mut delivered = 0;
    let mut stale = false;
    for weak in snapshot {
        match weak.upgrade() {
            Some(slot) => {
                (slot.callback)(value);
                delivered += 1;
            }
            None => stale = true,
        }
    }
    (delivered, stale)
}

fn live_count<T>(list: &SubscriberList<T>) -> usize {
    list.iter().filter(|w| w.strong_count() > 0).count()
}

/// Single-channel notifier.
pub struct Notifier<T> {
    subscribers: RefCell<SubscriberList<T>>,
}

impl<T: 'static> Notifier<T> {
    /// Create a notifier with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Register `f`; it is called on every [`Notifier::notify`] until the
    /// returned handle is dropped.
    pub fn subscribe<F>(&self, f: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        register(&mut self.subscribers.borrow_mut(), f)
    }

    /// Call every live subscriber with `value`. Returns the number of calls made.
    pub fn notify(&self, value: &T) -> usize {
        let snapshot = self.subscribers.borrow().clone();
        let (delivered, stale) = deliver(&snapshot, value);
        if stale {
            self.subscribers
                .borrow_mut()
                .retain(|w| w.strong_count() > 0);
        }
        delivered
    }

    /// Number of subscribers whose handles are still alive.
    pub fn subscriber_count(&self) -> usize {
        live_count(&self.subscribers.borrow())
    }
}

impl<T: 'static> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Notifier with one channel per key plus a channel observing every key.
///
/// Keyed subscribers are notified before catch-all subscribers.
pub struct KeyedNotifier<K, T> {
    keyed: RefCell<HashMap<K, SubscriberList<T>>>,
    all: Notifier<T>,
}

impl<K, T> KeyedNotifier<K, T>
where
    K: Eq + Hash + Clone,
    T: 'static,
{
    /// Create a notifier with no subscribers.
    pub fn new() -> Self {
        Self {
            keyed: RefCell::new(HashMap::new()),
            all: Notifier::new(),
        }
    }

    /// Register `f` for notifications about `key` only.
    pub fn subscribe_key<F>(&self, key: K, f: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let mut keyed = self.keyed.borrow_mut();
        keyed.retain(|_, list| {
            list.retain(|w| w.strong_count() > 0);
            !list.is_empty()
        });
        register(keyed.entry(key).or_default(), f)
    }

    /// Register `f` for notifications about every key.
    pub fn subscribe_all<F>(&self, f: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        self.all.subscribe(f)
    }

    /// Notify `key` subscribers, then catch-all subscribers. Returns the number
    /// of calls made.
    pub fn notify(&self, key: &K, value: &T) -> usize {
        let snapshot = self.keyed.borrow().get(key).cloned();
        let mut delivered = 0;
        if let Some(snapshot) = snapshot {
            let (n, stale) = deliver(&snapshot, value);
            delivered += n;
            if stale {
                self.prune_key(key);
            }
        }
        delivered + self.all.notify(value)
    }

    /// Number of live subscribers for `key`, excluding catch-all subscribers.
    pub fn subscriber_count(&self, key: &K) -> usize {
        self.keyed.borrow().get(key).map_or(0, live_count)
    }

    fn prune_key(&self, key: &K) {
        let mut keyed = self.keyed.borrow_mut();
        if let Some(list) = keyed.get_mut(key) {
            list.retain(|w| w.strong_count() > 0);
            if list.is_empty() {
                keyed.remove(key);
            }
        }
    }
}

impl<K, T> Default for KeyedNotifier<K, T>
where
    K: Eq + Hash + Clone,
    T: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> fmt::Debug for KeyedNotifier<K, T>
where
    K: Eq + Hash + Clone,
    T: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedNotifier")
            .field("keys", &self.keyed.borrow().len())
            .field("all", &self.all.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/observe/notifier.rs"]
mod tests;
