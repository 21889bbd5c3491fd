use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One broadcast unit: the event name and its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData<P> {
    pub event: String,
    pub data: P,
}

impl<P> EventData<P> {
    pub fn new(event: impl Into<String>, data: P) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }
}

pub type DynamicEvent = EventData<serde_json::Value>;
pub type DynamicBus = EventBus<serde_json::Value>;

type Callback<P> = dyn Fn(&EventData<P>) + Send + Sync;

/// Shared handle to a listener callback.
///
/// Clones refer to the same callback and compare equal. Two listeners built
/// by separate calls to [`Listener::new`] never compare equal, even when they
/// wrap identical closures.
pub struct Listener<P> {
    callback: Arc<Callback<P>>,
}

impl<P> Listener<P> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&EventData<P>) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(f),
        }
    }

    pub fn call(&self, event: &EventData<P>) {
        (self.callback)(event)
    }

    pub fn same(&self, other: &Listener<P>) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<P> Clone for Listener<P> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<P> PartialEq for Listener<P> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<P> Eq for Listener<P> {}

impl<P> fmt::Debug for Listener<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("callback", &Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

struct Registry<P> {
    listeners: HashMap<String, Vec<Listener<P>>>,
}

/// Synchronous event registry keyed by event name.
///
/// The bus is a handle: clones share one registry, so a notifier, its
/// subscriptions and outside registrants all see the same listeners.
pub struct EventBus<P> {
    inner: Arc<Mutex<Registry<P>>>,
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                listeners: HashMap::new(),
            })),
        }
    }
}

impl<P> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.lock();
        let mut map = f.debug_map();
        for (name, seq) in registry.listeners.iter() {
            map.entry(name, &seq.len());
        }
        map.finish()
    }
}

impl<P> EventBus<P> {
    pub fn new() -> Self {
        Self::default()
    }

    // Listeners never run under this lock, so a poisoned registry is still consistent.
    fn lock(&self) -> MutexGuard<'_, Registry<P>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `listener` to the sequence for `event`. Subscribing the same
    /// listener twice makes it fire twice per broadcast.
    pub fn subscribe(&self, event: impl Into<String>, listener: Listener<P>) {
        let event = event.into();
        let mut registry = self.lock();
        let seq = registry.listeners.entry(event.clone()).or_default();
        seq.push(listener);
        tracing::debug!(event = %event, listeners = seq.len(), "listener subscribed");
    }

    /// Removes the first occurrence of `listener` from `event`'s sequence.
    ///
    /// Returns `false` when the event is unknown or the listener is not
    /// present. The sequence itself is kept even when it becomes empty.
    pub fn unsubscribe(&self, event: &str, listener: &Listener<P>) -> bool {
        let mut registry = self.lock();
        let Some(seq) = registry.listeners.get_mut(event) else {
            tracing::trace!(event, "unsubscribe from unknown event ignored");
            return false;
        };
        match seq.iter().position(|l| l.same(listener)) {
            Some(index) => {
                seq.remove(index);
                tracing::debug!(event, listeners = seq.len(), "listener unsubscribed");
                true
            }
            None => {
                tracing::trace!(event, "listener not subscribed, nothing removed");
                false
            }
        }
    }

    /// Invokes every listener registered for `event.event`, in subscription
    /// order, on the calling thread.
    ///
    /// The sequence is snapshotted first: subscribe/unsubscribe calls made by
    /// a listener take effect from the next broadcast on. A panicking
    /// listener propagates and skips the rest of the pass.
    pub fn broadcast(&self, event: &EventData<P>) {
        let snapshot: Vec<Listener<P>> = {
            let registry = self.lock();
            match registry.listeners.get(event.event.as_str()) {
                Some(seq) => seq.clone(),
                None => return,
            }
        };
        tracing::trace!(event = %event.event, listeners = snapshot.len(), "broadcast");
        for listener in snapshot.iter() {
            listener.call(event);
        }
    }

    pub fn emit(&self, event: impl Into<String>, data: P) {
        self.broadcast(&EventData::new(event, data));
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.lock().listeners.get(event).map_or(0, Vec::len)
    }

    /// True once anything has subscribed to `event`, even if the sequence
    /// has since been emptied.
    pub fn has_event(&self, event: &str) -> bool {
        self.lock().listeners.contains_key(event)
    }

    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().listeners.keys().cloned().collect();
        names.sort();
        names
    }
}
