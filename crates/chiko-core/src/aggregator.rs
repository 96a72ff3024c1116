//! Streaming reply aggregation
//!
//! Folds incremental text fragments of one in-flight chat reply into a
//! single growing [`Message`], publishing the partial state after every
//! fragment.
//!
//! ```text
//! Empty ──fragment──▶ Accumulating ──fragment──▶ Accumulating
//!   │                      │
//!   │ done                 │ done
//!   ▼                      ▼
//! Complete             Complete
//!
//! Empty / Accumulating ──error──▶ Failed
//! ```

use crate::classify::ClassifiedError;
use crate::conversation::Transcript;
use chiko_llm::Message;
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

/// Lifecycle of one aggregated reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamState {
    /// Placeholder appended, nothing received yet
    Empty,
    /// At least one fragment applied
    Accumulating,
    /// Upstream closed cleanly; the message is final
    Complete,
    /// Upstream failed; an error turn was appended
    Failed,
}

impl StreamState {
    /// Whether no further transitions are allowed
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

/// Invalid use of an aggregator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The reply already reached a terminal state
    #[error("message {id} is already {state:?}")]
    Closed {
        /// Message id
        id: String,
        /// Terminal state reached
        state: StreamState,
    },
}

/// Folds one streamed reply into a transcript message
#[derive(Debug)]
pub struct StreamingAggregator {
    message: Message,
    state: StreamState,
    updates: watch::Sender<Message>,
}

impl StreamingAggregator {
    /// Append an empty model placeholder to `transcript` and start folding
    /// into it.
    pub fn begin(transcript: &mut Transcript) -> Self {
        let message = Message::model("");
        transcript.push(message.clone());
        let (updates, _) = watch::channel(message.clone());

        debug!(message_id = %message.id, "Streaming reply started");

        Self {
            message,
            state: StreamState::Empty,
            updates,
        }
    }

    /// Id of the message being built
    #[must_use]
    pub fn message_id(&self) -> &str {
        &self.message.id
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Content accumulated so far
    #[must_use]
    pub fn content(&self) -> &str {
        &self.message.content
    }

    /// Observe the message as it grows. The receiver always holds the most
    /// recent snapshot; a slow observer may skip intermediate ones.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Message> {
        self.updates.subscribe()
    }

    /// Append `fragment` and republish. Fragments must be applied in
    /// arrival order.
    pub fn apply(
        &mut self,
        transcript: &mut Transcript,
        fragment: &str,
    ) -> Result<(), AggregateError> {
        self.ensure_open()?;

        self.message.content.push_str(fragment);
        self.state = StreamState::Accumulating;

        if let Some(entry) = transcript.get_mut(&self.message.id) {
            entry.content.clone_from(&self.message.content);
        }
        self.updates.send_replace(self.message.clone());
        Ok(())
    }

    /// Mark the reply final and return it
    pub fn complete(&mut self) -> Result<Message, AggregateError> {
        self.ensure_open()?;
        self.state = StreamState::Complete;

        debug!(
            message_id = %self.message.id,
            len = self.message.content.len(),
            "Streaming reply complete"
        );
        Ok(self.message.clone())
    }

    /// Close the reply as failed and append the error turn.
    ///
    /// Partial content already shown stays in place. An untouched
    /// placeholder is removed so the user turn is still answered by exactly
    /// one model message. Returns the appended error message.
    pub fn fail(
        &mut self,
        transcript: &mut Transcript,
        error: &ClassifiedError,
    ) -> Result<Message, AggregateError> {
        self.ensure_open()?;

        if self.state == StreamState::Empty {
            transcript.remove(&self.message.id);
        }
        self.state = StreamState::Failed;

        let notice = Message::model(error.user_message());
        transcript.push(notice.clone());

        debug!(
            message_id = %self.message.id,
            kind = ?error.kind(),
            "Streaming reply failed"
        );
        Ok(notice)
    }

    /// Message built so far, if it received any content
    #[must_use]
    pub fn partial(&self) -> Option<&Message> {
        (!self.message.content.is_empty()).then_some(&self.message)
    }

    fn ensure_open(&self) -> Result<(), AggregateError> {
        if self.state.is_terminal() {
            return Err(AggregateError::Closed {
                id: self.message.id.clone(),
                state: self.state,
            });
        }
        Ok(())
    }
}
