//! Event system for the limit simulator.
//!
//! Everything observable about a run (work item calls, limit changes, the
//! final consistency check) is surfaced as an event so callers can hook in
//! counters, assertions or logging without touching the simulator itself.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Trait for events emitted by the simulator.
pub trait ProbeEvent: Send + Sync + fmt::Debug {
    /// Returns the type of event (e.g., "limit_lowered", "item_failed").
    fn event_type(&self) -> &'static str;

    /// Returns when this event occurred.
    fn timestamp(&self) -> Instant;

    /// Returns the name of the simulator instance that emitted this event.
    fn simulator_name(&self) -> &str;
}

/// Trait for listening to simulator events.
pub trait EventListener<E: ProbeEvent>: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: &E);
}

/// A collection of event listeners.
#[derive(Clone)]
pub struct EventListeners<E: ProbeEvent> {
    listeners: Vec<Arc<dyn EventListener<E>>>,
}

impl<E: ProbeEvent> EventListeners<E> {
    /// Creates a new empty event listener collection.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Adds a listener to the collection.
    pub fn add<L>(&mut self, listener: L)
    where
        L: EventListener<E> + 'static,
    {
        self.listeners.push(Arc::new(listener));
    }

    /// Emits an event to all registered listeners.
    ///
    /// A panicking listener is isolated: the panic is caught and the
    /// remaining listeners still see the event.
    pub fn emit(&self, event: &E) {
        for listener in &self.listeners {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                listener.on_event(event);
            }));

            if outcome.is_err() {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    simulator = event.simulator_name(),
                    event = event.event_type(),
                    "event listener panicked"
                );
            }
        }
    }
}

impl<E: ProbeEvent> Default for EventListeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ProbeEvent> fmt::Debug for EventListeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("len", &self.listeners.len())
            .finish()
    }
}

/// A simple function-based event listener.
pub struct FnListener<E, F>
where
    F: Fn(&E) + Send + Sync,
{
    f: F,
    _phantom: std::marker::PhantomData<fn(&E)>,
}

impl<E, F> FnListener<E, F>
where
    F: Fn(&E) + Send + Sync,
{
    /// Creates a new function-based listener.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<E, F> EventListener<E> for FnListener<E, F>
where
    E: ProbeEvent,
    F: Fn(&E) + Send + Sync,
{
    fn on_event(&self, event: &E) {
        (self.f)(event)
    }
}
