//! Orchestrator request and outcome types

use crate::classify::ClassifiedError;
use crate::personality::ImageStyle;
use chiko_llm::{AspectRatio, Message};

/// Image generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Free-form description
    pub prompt: String,
    /// Visual style
    pub style: ImageStyle,
    /// Output aspect ratio
    pub aspect_ratio: AspectRatio,
}

impl ImageRequest {
    /// Request with default style and ratio
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            style: ImageStyle::default(),
            aspect_ratio: AspectRatio::default(),
        }
    }

    /// Set the style
    #[must_use]
    pub fn with_style(mut self, style: ImageStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the aspect ratio
    #[must_use]
    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = ratio;
        self
    }

    /// Style- and ratio-qualified prompt sent to the model
    #[must_use]
    pub fn prompt_text(&self) -> String {
        format!(
            "Generate a {} style image. {}. Aspect ratio {}. High quality, detailed.",
            self.style.label(),
            self.prompt.trim(),
            self.aspect_ratio
        )
    }
}

/// Result of one chat turn driven through a transcript
#[derive(Debug)]
pub enum TurnOutcome {
    /// Reply streamed to completion
    Completed(Message),
    /// Reply failed; `notice` is the error turn appended to the transcript
    Failed {
        /// Content received before the failure, if any
        partial: Option<Message>,
        /// Classified failure
        error: ClassifiedError,
        /// Error message appended as the model's turn
        notice: Message,
    },
}

impl TurnOutcome {
    /// Whether the reply completed
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// The model message that ends the turn in the transcript
    #[must_use]
    pub fn final_message(&self) -> &Message {
        match self {
            Self::Completed(message) => message,
            Self::Failed { notice, .. } => notice,
        }
    }
}
