//! The working limit and its scoped override.

use crate::events::SimulatorEvent;
use limitprobe_core::events::EventListeners;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "metrics")]
use metrics::{counter, gauge};

struct LimitInner {
    /// Snapshot taken at construction. Never written afterwards.
    initial: usize,
    current: AtomicUsize,
    name: String,
    event_listeners: EventListeners<SimulatorEvent>,
}

/// A live concurrency limit paired with the value it started at.
///
/// Clones are handles to the same limit: a lowered value is visible through
/// every clone until the override that lowered it is dropped.
///
/// ```
/// use limitprobe::WorkingLimit;
///
/// let mut limit = WorkingLimit::new(3);
/// {
///     let lowered = limit.lower_to(1);
///     assert_eq!(lowered.current(), 1);
/// }
/// assert_eq!(limit.current(), 3);
/// assert!(limit.is_restored());
/// ```
#[derive(Clone)]
pub struct WorkingLimit {
    inner: Arc<LimitInner>,
}

impl WorkingLimit {
    /// Creates a limit whose working and initial values are both `initial`.
    pub fn new(initial: usize) -> Self {
        Self::with_listeners("limit", initial, EventListeners::new())
    }

    pub(crate) fn with_listeners(
        name: impl Into<String>,
        initial: usize,
        event_listeners: EventListeners<SimulatorEvent>,
    ) -> Self {
        let limit = Self {
            inner: Arc::new(LimitInner {
                initial,
                current: AtomicUsize::new(initial),
                name: name.into(),
                event_listeners,
            }),
        };

        #[cfg(feature = "metrics")]
        gauge!("limitprobe_working_limit", "simulator" => limit.inner.name.clone())
            .set(initial as f64);

        limit
    }

    /// The live value.
    pub fn current(&self) -> usize {
        self.inner.current.load(Ordering::Acquire)
    }

    /// The value the limit started at.
    pub fn initial(&self) -> usize {
        self.inner.initial
    }

    /// Returns `true` when the live value equals the initial value.
    pub fn is_restored(&self) -> bool {
        self.current() == self.initial()
    }

    /// Lowers the live value to `value` until the returned guard is dropped.
    ///
    /// The guard restores the initial value on every exit path, including
    /// early returns through `?` and cancellation of an enclosing future.
    ///
    /// Borrowing `self` mutably keeps one handle from holding two overrides
    /// at once. The guarantee is per handle: a clone can open its own
    /// override, and whichever guard drops first restores the initial value
    /// for both. The simulator only ever lowers through the one handle it
    /// owns.
    pub fn lower_to(&mut self, value: usize) -> LimitOverride<'_> {
        let from = self.inner.current.swap(value, Ordering::AcqRel);

        #[cfg(feature = "tracing")]
        tracing::debug!(simulator = %self.inner.name, from, to = value, "working limit lowered");

        #[cfg(feature = "metrics")]
        {
            counter!("limitprobe_limit_overrides_total", "simulator" => self.inner.name.clone())
                .increment(1);
            gauge!("limitprobe_working_limit", "simulator" => self.inner.name.clone())
                .set(value as f64);
        }

        self.inner
            .event_listeners
            .emit(&SimulatorEvent::LimitLowered {
                simulator_name: self.inner.name.clone(),
                timestamp: Instant::now(),
                from,
                to: value,
            });

        LimitOverride { limit: self }
    }

    fn restore_initial(&self) -> usize {
        let initial = self.inner.initial;
        self.inner.current.store(initial, Ordering::Release);

        #[cfg(feature = "tracing")]
        tracing::debug!(simulator = %self.inner.name, to = initial, "working limit restored");

        #[cfg(feature = "metrics")]
        gauge!("limitprobe_working_limit", "simulator" => self.inner.name.clone())
            .set(initial as f64);

        self.inner
            .event_listeners
            .emit(&SimulatorEvent::LimitRestored {
                simulator_name: self.inner.name.clone(),
                timestamp: Instant::now(),
                to: initial,
            });

        initial
    }
}

impl fmt::Debug for WorkingLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkingLimit")
            .field("name", &self.inner.name)
            .field("current", &self.current())
            .field("initial", &self.initial())
            .finish()
    }
}

/// RAII guard returned by [`WorkingLimit::lower_to`]. Restores the initial
/// value on drop.
#[must_use = "dropping the override restores the limit immediately"]
pub struct LimitOverride<'a> {
    limit: &'a WorkingLimit,
}

impl LimitOverride<'_> {
    /// The live value while the override is held.
    pub fn current(&self) -> usize {
        self.limit.current()
    }

    /// The value that will be restored.
    pub fn initial(&self) -> usize {
        self.limit.initial()
    }

    /// Ends the override now and returns the restored value.
    pub fn restore(self) -> usize {
        let limit = self.limit;
        drop(self);
        limit.current()
    }
}

impl Drop for LimitOverride<'_> {
    fn drop(&mut self) {
        self.limit.restore_initial();
    }
}
