//! Provider transport abstraction
//!
//! This module defines the trait every generative backend implements: one
//! request/stream-of-fragments call for chat and one request/response call
//! for media generation and editing.

use crate::credential::ApiKey;
use crate::error::Result;
use crate::media::{AspectRatio, ImageArtifact, Part};
use crate::message::Message;
use futures::stream::BoxStream;

/// Lazily produced, finite sequence of text fragments.
///
/// Fragments are ordered and non-overlapping; the stream ends when the
/// provider closes it. An `Err` item is always the last item.
pub type FragmentStream = BoxStream<'static, Result<String>>;

/// Streaming chat request
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// Fixed system instruction for this turn
    pub system_instruction: String,
    /// Prior transcript, oldest first
    pub history: Vec<Message>,
    /// The new user text
    pub message: String,
}

/// Single-shot content request (image generation / editing)
#[derive(Debug, Clone)]
pub struct ContentRequest {
    /// Model identifier
    pub model: String,
    /// Ordered payload parts
    pub parts: Vec<Part>,
    /// Optional output aspect ratio
    pub aspect_ratio: Option<AspectRatio>,
}

impl ContentRequest {
    /// Create an empty request for `model`
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            parts: Vec::new(),
            aspect_ratio: None,
        }
    }

    /// Append a text part
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::Text(text.into()));
        self
    }

    /// Append an inline media part
    #[must_use]
    pub fn with_image(mut self, image: ImageArtifact) -> Self {
        self.parts.push(Part::InlineData(image));
        self
    }

    /// Set the output aspect ratio
    #[must_use]
    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }
}

/// Successful provider response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentResponse {
    /// Response parts of the first candidate, in order
    pub parts: Vec<Part>,
}

impl ContentResponse {
    /// First inline media payload, if any
    #[must_use]
    pub fn first_media(&self) -> Option<&ImageArtifact> {
        self.parts.iter().find_map(Part::as_media)
    }

    /// First non-empty text part, if any
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.parts
            .iter()
            .filter_map(Part::as_text)
            .find(|t| !t.trim().is_empty())
    }
}

/// Trait for generative model backends
#[async_trait::async_trait]
pub trait GenerativeTransport: Send + Sync {
    /// Get the transport name
    fn name(&self) -> &str;

    /// Issue a streaming chat call.
    ///
    /// Resolves once the provider has accepted the request; fragments are
    /// then pulled from the returned stream.
    async fn stream_chat(&self, credential: ApiKey, request: ChatRequest)
        -> Result<FragmentStream>;

    /// Issue a single non-streaming content call
    async fn generate_content(
        &self,
        credential: ApiKey,
        request: ContentRequest,
    ) -> Result<ContentResponse>;
}
