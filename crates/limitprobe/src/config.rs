//! Configuration for the simulator.

use crate::events::SimulatorEvent;
use crate::simulator::Simulator;
use limitprobe_core::events::{EventListeners, FnListener};
use limitprobe_core::{ProbeError, Result};
use std::time::Duration;

/// Configuration for a simulator run.
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Limit every run starts from and is restored to.
    pub(crate) initial_limit: usize,
    /// Limit held while the failed item is retried.
    pub(crate) degraded_limit: usize,
    /// Pause between lowering the limit and retrying.
    pub(crate) retry_delay: Duration,
    /// Name of this simulator instance.
    pub(crate) name: String,
    /// Event listeners.
    pub(crate) event_listeners: EventListeners<SimulatorEvent>,
}

impl SimulatorConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> SimulatorConfigBuilder {
        SimulatorConfigBuilder::new()
    }

    pub fn initial_limit(&self) -> usize {
        self.initial_limit
    }

    pub fn degraded_limit(&self) -> usize {
        self.degraded_limit
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        let builder = SimulatorConfigBuilder::new();
        Self {
            initial_limit: builder.initial_limit,
            degraded_limit: builder.degraded_limit,
            retry_delay: builder.retry_delay,
            name: builder.name,
            event_listeners: builder.event_listeners,
        }
    }
}

/// Builder for simulator configuration.
pub struct SimulatorConfigBuilder {
    initial_limit: usize,
    degraded_limit: usize,
    retry_delay: Duration,
    name: String,
    event_listeners: EventListeners<SimulatorEvent>,
}

impl SimulatorConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            initial_limit: 3,
            degraded_limit: 1,
            retry_delay: Duration::from_millis(100),
            name: "limitprobe".to_string(),
            event_listeners: EventListeners::new(),
        }
    }

    /// Sets the limit each run starts from.
    ///
    /// Default: 3
    pub fn initial_limit(mut self, limit: usize) -> Self {
        self.initial_limit = limit;
        self
    }

    /// Sets the limit held while a failed item is retried.
    ///
    /// Must be at least 1 and no greater than the initial limit.
    /// Default: 1
    pub fn degraded_limit(mut self, limit: usize) -> Self {
        self.degraded_limit = limit;
        self
    }

    /// Sets the pause between lowering the limit and retrying.
    ///
    /// Default: 100ms
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets the name of this simulator instance.
    ///
    /// Default: "limitprobe"
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Registers a callback when a work item call succeeds.
    ///
    /// # Callback Signature
    /// `Fn(i64, bool)` - Called with the item identifier and whether the call
    /// was a retry.
    pub fn on_item_processed<F>(mut self, f: F) -> Self
    where
        F: Fn(i64, bool) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let SimulatorEvent::ItemProcessed { id, is_retry, .. } = event {
                f(*id, *is_retry);
            }
        }));
        self
    }

    /// Registers a callback when a work item call fails.
    pub fn on_item_failed<F>(mut self, f: F) -> Self
    where
        F: Fn(i64) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let SimulatorEvent::ItemFailed { id, .. } = event {
                f(*id);
            }
        }));
        self
    }

    /// Registers a callback when the working limit is lowered.
    ///
    /// # Callback Signature
    /// `Fn(usize, usize)` - Called with the previous and the lowered value.
    ///
    /// # Example
    /// ```rust
    /// use limitprobe::SimulatorConfig;
    ///
    /// let simulator = SimulatorConfig::builder()
    ///     .on_limit_lowered(|from, to| {
    ///         println!("limit lowered from {} to {}", from, to);
    ///     })
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn on_limit_lowered<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let SimulatorEvent::LimitLowered { from, to, .. } = event {
                f(*from, *to);
            }
        }));
        self
    }

    /// Registers a callback when the working limit is restored.
    pub fn on_limit_restored<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let SimulatorEvent::LimitRestored { to, .. } = event {
                f(*to);
            }
        }));
        self
    }

    /// Registers a callback for the final consistency check.
    ///
    /// # Callback Signature
    /// `Fn(bool)` - Called with `true` when the working limit matches the
    /// initial limit.
    pub fn on_consistency_checked<F>(mut self, f: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let SimulatorEvent::ConsistencyChecked {
                working, initial, ..
            } = event
            {
                f(working == initial);
            }
        }));
        self
    }

    /// Validates the configuration and returns a [`Simulator`].
    pub fn build(self) -> Result<Simulator> {
        if self.initial_limit == 0 {
            return Err(ProbeError::invalid_config(
                "initial limit must be at least 1",
            ));
        }
        if self.degraded_limit == 0 {
            return Err(ProbeError::invalid_config(
                "degraded limit must be at least 1",
            ));
        }
        if self.degraded_limit > self.initial_limit {
            return Err(ProbeError::invalid_config(format!(
                "degraded limit ({}) exceeds initial limit ({})",
                self.degraded_limit, self.initial_limit
            )));
        }

        Ok(Simulator::new(SimulatorConfig {
            initial_limit: self.initial_limit,
            degraded_limit: self.degraded_limit,
            retry_delay: self.retry_delay,
            name: self.name,
            event_listeners: self.event_listeners,
        }))
    }
}

impl Default for SimulatorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
