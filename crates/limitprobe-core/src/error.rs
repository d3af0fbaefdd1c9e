//! Error types shared across limitprobe.
//!
//! There is exactly one domain failure, [`SimulatedFailure`], raised on
//! purpose by a work item that was told to fail. Everything else a run can
//! hit is wrapped in [`ProbeError`]:
//!
//! ```rust
//! use limitprobe_core::{ProbeError, SimulatedFailure};
//!
//! let err: ProbeError = SimulatedFailure { id: 2 }.into();
//! assert!(err.is_simulated_failure());
//! assert_eq!(err.simulated_failure().map(|f| f.id), Some(2));
//! ```

/// The deliberate failure raised by a work item that was asked to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("simulated failure for work item {id}")]
pub struct SimulatedFailure {
    /// Identifier of the failing work item.
    pub id: i64,
}

/// Errors that can escape a simulator run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// A simulated failure that no scenario step handled.
    #[error(transparent)]
    Failure(#[from] SimulatedFailure),

    /// The simulator configuration is unusable.
    #[error("invalid simulator configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// A unit-of-work service failed with an error of its own.
    ///
    /// The simulator never builds this itself. It is the target for
    /// `From<E> for ProbeError` impls written for custom services passed to
    /// `Simulator::run_with`.
    #[error("work item service error: {0}")]
    Service(String),
}

/// Result type for simulator operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

impl ProbeError {
    /// Returns `true` if this wraps a [`SimulatedFailure`].
    pub fn is_simulated_failure(&self) -> bool {
        matches!(self, ProbeError::Failure(_))
    }

    /// Extracts the simulated failure, if this is a `Failure` variant.
    pub fn simulated_failure(&self) -> Option<SimulatedFailure> {
        match self {
            ProbeError::Failure(f) => Some(*f),
            _ => None,
        }
    }

    /// Builds an `InvalidConfig` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        ProbeError::InvalidConfig {
            reason: reason.into(),
        }
    }
}
