use crate::bus::{EventBus, Listener};
use std::sync::atomic::{AtomicBool, Ordering};

/// Disposer returned by [`crate::Notifier::on_update`].
///
/// Dropping it leaves the listener registered; call [`Subscription::dispose`]
/// to detach.
pub struct Subscription<P> {
    bus: EventBus<P>,
    listener: Listener<P>,
    events: Vec<String>,
    disposed: AtomicBool,
}

impl<P> Subscription<P> {
    pub(crate) fn new(bus: EventBus<P>, listener: Listener<P>, events: Vec<String>) -> Self {
        Self {
            bus,
            listener,
            events,
            disposed: AtomicBool::new(false),
        }
    }

    /// Unsubscribes the listener once from every event it was attached to.
    /// Only the first call does anything.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        for event in self.events.iter() {
            self.bus.unsubscribe(event, &self.listener);
        }
        tracing::debug!(events = ?self.events, "subscription disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    pub fn listener(&self) -> &Listener<P> {
        &self.listener
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }
}
