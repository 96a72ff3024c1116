//! Classified chat fragment stream

use super::slot::SlotGuard;
use crate::classify::{ClassifiedError, ErrorClassifier, Failure};
use chiko_llm::FragmentStream;
use futures::stream::{Stream, StreamExt};
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Text fragments of one chat reply, in arrival order.
///
/// Transport errors come out already classified and end the stream. The
/// chat slot stays busy until this value is dropped.
pub struct ChatStream {
    inner: FragmentStream,
    classifier: ErrorClassifier,
    finished: bool,
    _guard: SlotGuard,
}

impl ChatStream {
    pub(crate) fn new(inner: FragmentStream, classifier: ErrorClassifier, guard: SlotGuard) -> Self {
        Self {
            inner,
            classifier,
            finished: false,
            _guard: guard,
        }
    }
}

impl fmt::Debug for ChatStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatStream")
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl Stream for ChatStream {
    type Item = Result<String, ClassifiedError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.finished {
            return Poll::Ready(None);
        }

        match self.inner.poll_next_unpin(cx) {
            Poll::Ready(Some(Ok(fragment))) => Poll::Ready(Some(Ok(fragment))),
            Poll::Ready(Some(Err(e))) => {
                self.finished = true;
                tracing::warn!(error = %e, "Chat stream failed");
                let classified = self.classifier.classify(Failure::Llm(e), true);
                Poll::Ready(Some(Err(classified)))
            }
            Poll::Ready(None) => {
                self.finished = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
