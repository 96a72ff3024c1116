//! Orchestrator configuration

use crate::classify::Locale;
use chiko_llm::gemini::{DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL};
use serde::{Deserialize, Serialize};

/// Models and message locale used by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Model for streaming chat
    pub chat_model: String,
    /// Model for image generation and editing
    pub image_model: String,
    /// Locale of user-facing error messages
    pub locale: Locale,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            locale: Locale::default(),
        }
    }
}

impl OrchestratorConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chat model
    #[must_use]
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Set the image model
    #[must_use]
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Set the message locale
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}
