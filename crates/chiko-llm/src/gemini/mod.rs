//! Gemini - Google Gemini API transport
//!
//! This module implements the Google Gemini transport using reqwest.

mod config;
mod convert;
mod provider;
mod sse;
mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use config::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL};
pub use provider::GeminiTransport;
