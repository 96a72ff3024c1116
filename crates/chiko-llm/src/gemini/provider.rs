//! Gemini transport implementation

use super::config::GeminiConfig;
use super::convert::{chat_request, content_request, content_response, stream_chunk_text};
use super::sse::SseDecoder;
use super::types::*;
use crate::credential::ApiKey;
use crate::error::{Error, Result};
use crate::transport::{
    ChatRequest, ContentRequest, ContentResponse, FragmentStream, GenerativeTransport,
};
use crate::util::truncate_safe;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};
use reqwest::{Client, Response, StatusCode};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Maximum bytes of a raw error body kept in an error message
const MAX_ERROR_BODY: usize = 300;

/// Google Gemini transport
pub struct GeminiTransport {
    client: Client,
    config: GeminiConfig,
}

impl GeminiTransport {
    /// Create a new Gemini transport
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(Error::NotConfigured("gemini base_url is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Current configuration
    #[must_use]
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    async fn post(&self, url: &str, credential: &ApiKey, body: &GeminiRequest) -> Result<Response> {
        // SECURITY: the key travels in a header, never in the URL
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", credential.expose())
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| Error::from_reqwest(e, self.config.timeout_ms()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::from_reqwest(e, self.config.timeout_ms()))?;
        tracing::warn!(status = %status, "Gemini API error response");
        Err(error_from_response(status, &body))
    }
}

/// Map a non-success response into a transport error
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> Error {
    let message = match serde_json::from_str::<GeminiError>(body) {
        Ok(error) => {
            tracing::warn!(
                error_status = %error.error.status,
                error_code = error.error.code,
                "Gemini API error detail"
            );
            format!("{}: {}", error.error.status, error.error.message)
        }
        Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
        Err(_) => format!("HTTP {}: {}", status, truncate_safe(body, MAX_ERROR_BODY)),
    };

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Error::RateLimit(message);
    }
    Error::Api {
        status: status.as_u16(),
        message,
    }
}

struct SseState {
    body: BoxStream<'static, reqwest::Result<Bytes>>,
    decoder: SseDecoder,
    pending: VecDeque<Result<String>>,
    finished: bool,
    timeout_ms: u64,
}

impl SseState {
    fn push_payload(&mut self, payload: &str) {
        match stream_chunk_text(payload) {
            Ok(Some(text)) => self.pending.push_back(Ok(text)),
            Ok(None) => {}
            Err(e) => {
                self.pending.push_back(Err(e));
                self.finished = true;
            }
        }
    }
}

/// Turn an SSE byte body into a stream of text fragments.
///
/// The stream ends after the first error.
pub(crate) fn fragment_stream(
    body: BoxStream<'static, reqwest::Result<Bytes>>,
    timeout_ms: u64,
) -> FragmentStream {
    let state = SseState {
        body,
        decoder: SseDecoder::default(),
        pending: VecDeque::new(),
        finished: false,
        timeout_ms,
    };

    stream::unfold(state, |mut st| async move {
        loop {
            if let Some(item) = st.pending.pop_front() {
                if item.is_err() {
                    st.pending.clear();
                }
                return Some((item, st));
            }
            if st.finished {
                return None;
            }
            match st.body.next().await {
                Some(Ok(bytes)) => {
                    for payload in st.decoder.feed(&bytes) {
                        if st.finished {
                            break;
                        }
                        st.push_payload(&payload);
                    }
                }
                Some(Err(e)) => {
                    st.finished = true;
                    let err = Error::from_reqwest(e, st.timeout_ms);
                    st.pending.push_back(Err(err));
                }
                None => {
                    st.finished = true;
                    if let Some(payload) = st.decoder.finish() {
                        st.push_payload(&payload);
                    }
                }
            }
        }
    })
    .boxed()
}

#[async_trait::async_trait]
impl GenerativeTransport for GeminiTransport {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, credential, request), fields(model = %request.model, history = request.history.len()))]
    async fn stream_chat(
        &self,
        credential: ApiKey,
        request: ChatRequest,
    ) -> Result<FragmentStream> {
        let body = chat_request(&request);
        let url = self.config.stream_url(&request.model);
        debug!("Opening Gemini chat stream");

        let response = self.post(&url, &credential, &body).await?;
        Ok(fragment_stream(
            response.bytes_stream().boxed(),
            self.config.timeout_ms(),
        ))
    }

    #[instrument(skip(self, credential, request), fields(model = %request.model, parts = request.parts.len()))]
    async fn generate_content(
        &self,
        credential: ApiKey,
        request: ContentRequest,
    ) -> Result<ContentResponse> {
        let body = content_request(&request);
        let url = self.config.generate_url(&request.model);
        debug!("Sending Gemini content request");

        let response = self.post(&url, &credential, &body).await?;
        let text = response
            .text()
            .await
            .map_err(|e| Error::from_reqwest(e, self.config.timeout_ms()))?;

        let parsed: GeminiResponse = serde_json::from_str(&text).map_err(|e| {
            Error::InvalidResponse(format!("{}: {}", e, truncate_safe(&text, MAX_ERROR_BODY)))
        })?;
        Ok(content_response(parsed))
    }
}
