//! Events emitted while a scenario runs.

use limitprobe_core::events::ProbeEvent;
use std::time::Instant;

/// Events emitted by the simulator.
#[derive(Debug, Clone)]
pub enum SimulatorEvent {
    /// A work item call returned successfully.
    ItemProcessed {
        simulator_name: String,
        timestamp: Instant,
        id: i64,
        is_retry: bool,
    },
    /// A work item call failed.
    ItemFailed {
        simulator_name: String,
        timestamp: Instant,
        id: i64,
    },
    /// The working limit was lowered by an override.
    LimitLowered {
        simulator_name: String,
        timestamp: Instant,
        from: usize,
        to: usize,
    },
    /// An override ended and the working limit went back to its initial value.
    LimitRestored {
        simulator_name: String,
        timestamp: Instant,
        to: usize,
    },
    /// The final comparison of working and initial limit.
    ConsistencyChecked {
        simulator_name: String,
        timestamp: Instant,
        working: usize,
        initial: usize,
    },
}

impl SimulatorEvent {
    fn parts(&self) -> (&str, Instant) {
        match self {
            SimulatorEvent::ItemProcessed {
                simulator_name,
                timestamp,
                ..
            }
            | SimulatorEvent::ItemFailed {
                simulator_name,
                timestamp,
                ..
            }
            | SimulatorEvent::LimitLowered {
                simulator_name,
                timestamp,
                ..
            }
            | SimulatorEvent::LimitRestored {
                simulator_name,
                timestamp,
                ..
            }
            | SimulatorEvent::ConsistencyChecked {
                simulator_name,
                timestamp,
                ..
            } => (simulator_name, *timestamp),
        }
    }
}

impl ProbeEvent for SimulatorEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SimulatorEvent::ItemProcessed { .. } => "item_processed",
            SimulatorEvent::ItemFailed { .. } => "item_failed",
            SimulatorEvent::LimitLowered { .. } => "limit_lowered",
            SimulatorEvent::LimitRestored { .. } => "limit_restored",
            SimulatorEvent::ConsistencyChecked { .. } => "consistency_checked",
        }
    }

    fn timestamp(&self) -> Instant {
        self.parts().1
    }

    fn simulator_name(&self) -> &str {
        self.parts().0
    }
}
