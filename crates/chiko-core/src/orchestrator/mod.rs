//! Request orchestration
//!
//! The façade the front end calls for the three operations (chat turn,
//! image generation, image edit). Each call is wrapped with quota
//! recording, credential resolution and error classification, and each
//! logical slot admits at most one in-flight request.
//!
//! # Module Structure
//!
//! - `config`: models and locale (`OrchestratorConfig`)
//! - `core`: `RequestOrchestrator` struct and builder methods
//! - `chat`: streaming chat turn and transcript-driving `converse`
//! - `image`: image generation and editing
//! - `slot`: per-slot in-flight guards
//! - `stream`: classified fragment stream handed to callers
//! - `types`: request and outcome types

mod chat;
mod config;
mod core;
mod image;
mod slot;
mod stream;
mod types;


pub use config::OrchestratorConfig;
pub use core::RequestOrchestrator;
pub use slot::{Slot, SlotGuard};
pub use stream::ChatStream;
pub use types::{ImageRequest, TurnOutcome};
