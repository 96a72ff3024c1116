//! Error types for chiko-core

use crate::aggregator::AggregateError;
use crate::classify::ClassifiedError;
use crate::orchestrator::Slot;
use thiserror::Error;

/// Durable storage error
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock holder panicked
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Error returned by the request orchestrator
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A request for this slot is already in flight
    #[error("{0} request already in flight")]
    SlotBusy(Slot),

    /// The request failed and was classified
    #[error(transparent)]
    Classified(#[from] ClassifiedError),

    /// Reply aggregation was driven past a terminal state
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl OrchestratorError {
    /// The classified failure, if this is not a slot conflict
    #[must_use]
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Classified(err) => Some(err),
            Self::SlotBusy(_) | Self::Aggregate(_) => None,
        }
    }
}

/// Result alias for orchestrator operations
pub type Result<T> = std::result::Result<T, OrchestratorError>;
