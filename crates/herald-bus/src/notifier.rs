use crate::bus::{EventBus, Listener};
use crate::subscription::Subscription;
use herald_core::{HeraldResult, NotifierConfig};
use std::fmt::Display;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

type Output = Mutex<Box<dyn Write + Send>>;

/// Printer facade: writes a line, then fires the matching event on the bus.
pub struct Notifier<P> {
    bus: EventBus<P>,
    out: Output,
    err: Output,
    events: NotifierConfig,
}

impl<P> Notifier<P> {
    pub fn new(bus: EventBus<P>) -> Self {
        Self {
            bus,
            out: Mutex::new(Box::new(io::stdout())),
            err: Mutex::new(Box::new(io::stderr())),
            events: NotifierConfig::default(),
        }
    }

    pub fn from_config(bus: EventBus<P>, cfg: &NotifierConfig) -> HeraldResult<Self> {
        cfg.validate()?;
        let mut notifier = Self::new(bus);
        notifier.events = cfg.clone();
        Ok(notifier)
    }

    /// Replaces stdout/stderr, e.g. with in-memory buffers.
    pub fn with_writers<O, E>(mut self, out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        self.out = Mutex::new(Box::new(out));
        self.err = Mutex::new(Box::new(err));
        self
    }

    pub fn bus(&self) -> &EventBus<P> {
        &self.bus
    }

    pub fn print_event(&self) -> &str {
        &self.events.print_event
    }

    pub fn print_error_event(&self) -> &str {
        &self.events.print_error_event
    }

    /// Attaches `listener` to both the print and print-error events.
    pub fn on_update(&self, listener: Listener<P>) -> Subscription<P> {
        let events = vec![
            self.events.print_event.clone(),
            self.events.print_error_event.clone(),
        ];
        for event in events.iter() {
            self.bus.subscribe(event.as_str(), listener.clone());
        }
        Subscription::new(self.bus.clone(), listener, events)
    }

    pub fn subscribe(&self, event: impl Into<String>, listener: Listener<P>) {
        self.bus.subscribe(event, listener);
    }

    pub fn unsubscribe(&self, event: &str, listener: &Listener<P>) -> bool {
        self.bus.unsubscribe(event, listener)
    }
}

impl<P: Display> Notifier<P> {
    pub fn print(&self, data: P) -> HeraldResult<()> {
        write_line(&self.out, &data)?;
        self.bus.emit(self.events.print_event.as_str(), data);
        Ok(())
    }

    pub fn print_error(&self, data: P) -> HeraldResult<()> {
        write_line(&self.err, &data)?;
        self.bus.emit(self.events.print_error_event.as_str(), data);
        Ok(())
    }
}

// The writer lock is released before the broadcast so listeners may print.
fn write_line<P: Display>(output: &Output, data: &P) -> io::Result<()> {
    let mut w = output.lock().unwrap_or_else(PoisonError::into_inner);
    writeln!(w, "{data}")?;
    w.flush()
}
