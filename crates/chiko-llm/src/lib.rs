//! Chiko LLM - Generative Provider Transport
//!
//! This crate provides the provider-facing half of Chiko:
//! - Message: conversation messages exchanged with the model
//! - Media: inline image payloads passed through untouched
//! - Transport: the `GenerativeTransport` trait (request/response and request/stream)
//! - Gemini: Google Gemini implementation over HTTPS with SSE streaming

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod credential;
pub mod error;
pub mod gemini;
pub mod media;
pub mod message;
pub mod transport;
pub mod util;

pub use credential::ApiKey;
pub use error::{Error, Result};
pub use gemini::{GeminiConfig, GeminiTransport};
pub use media::{AspectRatio, ImageArtifact, Part, DEFAULT_IMAGE_MIME};
pub use message::{Message, MessageRole};
pub use transport::{
    ChatRequest, ContentRequest, ContentResponse, FragmentStream, GenerativeTransport,
};
