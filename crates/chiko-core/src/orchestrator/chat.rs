//! Streaming chat turns

use super::core::RequestOrchestrator;
use super::slot::{Slot, SlotGuard};
use super::stream::ChatStream;
use super::types::TurnOutcome;
use crate::aggregator::StreamingAggregator;
use crate::classify::ClassifiedError;
use crate::conversation::Transcript;
use crate::error::Result;
use crate::personality::Personality;
use chiko_llm::{ChatRequest, Message};
use futures::StreamExt;
use tracing::{info, instrument, warn};

impl RequestOrchestrator {
    /// Start a chat turn and return its fragment stream.
    ///
    /// `history` is the prior transcript (not including `text`). The stream
    /// is finite and should be consumed once, typically by a
    /// [`StreamingAggregator`].
    #[instrument(skip(self, history, text), fields(personality = personality.id(), history = history.len()))]
    pub async fn send_chat_turn(
        &self,
        history: &[Message],
        text: &str,
        personality: Personality,
    ) -> Result<ChatStream> {
        let guard = self.acquire(Slot::Chat)?;
        Ok(self.open_chat(guard, history, text, personality).await?)
    }

    /// Drive a full chat turn through `transcript`.
    ///
    /// Appends the user message and a placeholder reply, folds fragments
    /// into it (calling `observer` with each snapshot), and ends the turn
    /// with exactly one model message: the completed reply, or an error
    /// notice after any partial content.
    #[instrument(skip(self, transcript, text, observer), fields(personality = personality.id()))]
    pub async fn converse<F>(
        &self,
        transcript: &mut Transcript,
        text: &str,
        personality: Personality,
        mut observer: F,
    ) -> Result<TurnOutcome>
    where
        F: FnMut(&Message) + Send,
    {
        let guard = self.acquire(Slot::Chat)?;

        let history = transcript.messages().to_vec();
        transcript.push(Message::user(text));
        let mut aggregator = StreamingAggregator::begin(transcript);

        let mut stream = match self.open_chat(guard, &history, text, personality).await {
            Ok(stream) => stream,
            Err(error) => {
                let notice = aggregator.fail(transcript, &error)?;
                return Ok(TurnOutcome::Failed {
                    partial: None,
                    error,
                    notice,
                });
            }
        };

        while let Some(item) = stream.next().await {
            match item {
                Ok(fragment) => {
                    aggregator.apply(transcript, &fragment)?;
                    if let Some(snapshot) = transcript.get(aggregator.message_id()) {
                        observer(snapshot);
                    }
                }
                Err(error) => {
                    let notice = aggregator.fail(transcript, &error)?;
                    return Ok(TurnOutcome::Failed {
                        partial: aggregator.partial().cloned(),
                        error,
                        notice,
                    });
                }
            }
        }

        let message = aggregator.complete()?;
        info!(chars = message.content.chars().count(), "Chat turn complete");
        Ok(TurnOutcome::Completed(message))
    }

    async fn open_chat(
        &self,
        guard: SlotGuard,
        history: &[Message],
        text: &str,
        personality: Personality,
    ) -> std::result::Result<ChatStream, ClassifiedError> {
        let credential = self.prepare().await?;

        let request = ChatRequest {
            model: self.config.chat_model.clone(),
            system_instruction: personality.system_instruction().to_string(),
            history: history.to_vec(),
            message: text.to_string(),
        };

        let fragments = self
            .transport
            .stream_chat(credential, request)
            .await
            .map_err(|e| {
                warn!(error = %e, "Chat request failed");
                self.classify(e)
            })?;

        Ok(ChatStream::new(fragments, self.classifier, guard))
    }
}
