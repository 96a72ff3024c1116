//! Chiko Core - Request Orchestration & Quota Governance
//!
//! This crate provides the core of the Chiko assistant:
//! - Quota: client-side rolling request log against provider rate limits
//! - Classify: failure taxonomy with localized user-facing messages
//! - Aggregator: folds streamed fragments into one growing reply
//! - Orchestrator: chat / image generation / image edit façade with
//!   per-slot in-flight guards
//! - Personality / Studio: closed configuration sets

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregator;
pub mod classify;
pub mod conversation;
pub mod credential;
pub mod error;
pub mod orchestrator;
pub mod personality;
pub mod quota;
pub mod studio;

pub use aggregator::{AggregateError, StreamState, StreamingAggregator};
pub use classify::{ClassifiedError, ErrorClassifier, ErrorKind, Failure, Locale};
pub use conversation::{Transcript, GREETING};
pub use credential::CredentialResolver;
pub use error::{OrchestratorError, Result, StoreError};
pub use orchestrator::{
    ChatStream, ImageRequest, OrchestratorConfig, RequestOrchestrator, Slot, SlotGuard,
    TurnOutcome,
};
pub use personality::{ImageStyle, Personality};
pub use quota::{
    FileStore, MemoryStore, QuotaLimits, QuotaStats, QuotaStore, QuotaTracker, QUOTA_KEY,
};
pub use studio::{EditTool, EditToolError, ToneFilter};
