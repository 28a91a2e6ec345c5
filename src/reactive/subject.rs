use log::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Entry<T> {
    id: u64,
    active: Arc<AtomicBool>,
    listener: Listener<T>,
}

struct Listeners<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Listeners<T> {
    fn remove(&mut self, id: u64) {
        self.entries.retain(|entry| entry.id != id);
    }
}

/// Multicast event stream. Values are delivered synchronously, on the
/// sending thread, to every listener that is subscribed at send time.
///
pub struct Subject<T> {
    inner: Arc<Mutex<Listeners<T>>>,
}

impl<T: 'static> Subject<T> {
    /// Return a new subject without listeners.
    ///
    pub fn new() -> Self {
        Subject {
            inner: Arc::new(Mutex::new(Listeners {
                next_id: 0,
                entries: vec![],
            })),
        }
    }

    /// Deliver a value to every active listener.
    ///
    pub fn send(&self, value: T) {
        // Snapshot listeners so callbacks may subscribe or cancel re-entrantly.
        let listeners: Vec<(Arc<AtomicBool>, Listener<T>)> = match self.inner.lock() {
            Ok(guard) => guard
                .entries
                .iter()
                .map(|entry| (Arc::clone(&entry.active), Arc::clone(&entry.listener)))
                .collect(),
            Err(_) => {
                warn!("Dropping event: subject listeners poisoned");
                return;
            }
        };
        for (active, listener) in listeners {
            if active.load(Ordering::Acquire) {
                listener(&value);
            }
        }
    }

    /// Register a listener. It stays registered until the returned
    /// subscription is cancelled or dropped.
    ///
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        subscribe_to(&self.inner, listener)
    }

    /// Return a subscribe-only handle to this subject.
    ///
    pub fn observable(&self) -> Observable<T> {
        Observable {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of currently registered listeners.
    ///
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .map(|guard| guard.entries.len())
            .unwrap_or(0)
    }
}

impl<T: 'static> Default for Subject<T> {
    fn default() -> Self {
        Subject::new()
    }
}

/// Subscribe-only view of a `Subject`.
///
pub struct Observable<T> {
    inner: Arc<Mutex<Listeners<T>>>,
}

impl<T: 'static> Observable<T> {
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        subscribe_to(&self.inner, listener)
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Observable {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn subscribe_to<T, F>(inner: &Arc<Mutex<Listeners<T>>>, listener: F) -> Subscription
where
    T: 'static,
    F: Fn(&T) + Send + Sync + 'static,
{
    let active = Arc::new(AtomicBool::new(true));
    let id = match inner.lock() {
        Ok(mut guard) => {
            let id = guard.next_id;
            guard.next_id += 1;
            guard.entries.push(Entry {
                id,
                active: Arc::clone(&active),
                listener: Arc::new(listener),
            });
            id
        }
        Err(_) => {
            warn!("Subscription refused: subject listeners poisoned");
            active.store(false, Ordering::Release);
            return Subscription::inert();
        }
    };
    let weak: Weak<Mutex<Listeners<T>>> = Arc::downgrade(inner);
    let flag = Arc::clone(&active);
    Subscription {
        active,
        cancel: Some(Box::new(move || {
            flag.store(false, Ordering::Release);
            if let Some(inner) = weak.upgrade() {
                if let Ok(mut guard) = inner.lock() {
                    guard.remove(id);
                }
            }
        })),
    }
}

/// Handle to a registered listener. Cancelling, or dropping the handle,
/// unregisters the listener; no value is delivered to it afterwards.
///
#[must_use = "dropping a subscription cancels it"]
pub struct Subscription {
    active: Arc<AtomicBool>,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn inert() -> Self {
        Subscription {
            active: Arc::new(AtomicBool::new(false)),
            cancel: None,
        }
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Move this subscription into a bag that owns it from now on.
    ///
    pub fn store(self, bag: &mut SubscriptionBag) {
        bag.insert(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Owner of subscriptions that live as long as some screen does.
///
#[derive(Debug, Default)]
pub struct SubscriptionBag {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionBag {
    pub fn new() -> Self {
        SubscriptionBag::default()
    }

    pub fn insert(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Cancel and release every held subscription.
    ///
    pub fn cancel_all(&mut self) {
        for mut subscription in self.subscriptions.drain(..) {
            subscription.cancel();
        }
    }
}
