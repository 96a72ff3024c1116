//! Conversion between transport types and Gemini wire types

use super::types::*;
use crate::error::{Error, Result};
use crate::media::{ImageArtifact, Part, DEFAULT_IMAGE_MIME};
use crate::message::Message;
use crate::transport::{ChatRequest, ContentRequest, ContentResponse};

fn text_part(text: &str) -> GeminiPart {
    GeminiPart::Text {
        text: text.to_string(),
    }
}

/// Convert a transcript into Gemini contents.
///
/// Messages with no content (e.g. an unfinished placeholder) are skipped,
/// since the API rejects empty parts.
pub(crate) fn convert_history(history: &[Message]) -> Vec<GeminiContent> {
    history
        .iter()
        .filter(|msg| !msg.content.is_empty())
        .map(|msg| GeminiContent {
            role: Some(msg.role.as_str().to_string()),
            parts: vec![text_part(&msg.content)],
        })
        .collect()
}

/// Build the streamed chat body: prior history, then the new user turn
pub(crate) fn chat_request(request: &ChatRequest) -> GeminiRequest {
    let mut contents = convert_history(&request.history);
    contents.push(GeminiContent {
        role: Some("user".to_string()),
        parts: vec![text_part(&request.message)],
    });

    let system_instruction = if request.system_instruction.is_empty() {
        None
    } else {
        Some(GeminiContent {
            role: None,
            parts: vec![text_part(&request.system_instruction)],
        })
    };

    GeminiRequest {
        contents,
        system_instruction,
        generation_config: None,
    }
}

/// Build a single-turn content body, preserving part order exactly
pub(crate) fn content_request(request: &ContentRequest) -> GeminiRequest {
    let parts = request
        .parts
        .iter()
        .map(|part| match part {
            Part::Text(text) => text_part(text),
            Part::InlineData(image) => GeminiPart::InlineData {
                inline_data: InlineData {
                    mime_type: Some(image.mime_type.clone()),
                    data: image.data.clone(),
                },
            },
        })
        .collect();

    let generation_config = request.aspect_ratio.map(|ratio| GenerationConfig {
        image_config: Some(ImageConfig {
            aspect_ratio: ratio.as_str().to_string(),
        }),
    });

    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts,
        }],
        system_instruction: None,
        generation_config,
    }
}

/// Map the first candidate's parts into transport parts
pub(crate) fn content_response(response: GeminiResponse) -> ContentResponse {
    if response.candidates.is_empty() {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            tracing::warn!(block_reason = %reason, "Gemini returned no candidates");
        }
    }

    let parts = response
        .candidates
        .into_iter()
        .next()
        .map(|candidate| candidate.content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| match part {
            GeminiPart::Text { text } => Some(Part::Text(text)),
            GeminiPart::InlineData { inline_data } if !inline_data.data.is_empty() => {
                let mime = inline_data
                    .mime_type
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());
                Some(Part::InlineData(ImageArtifact::new(mime, inline_data.data)))
            }
            _ => None,
        })
        .collect();

    ContentResponse { parts }
}

/// Decode one streamed chunk into its text fragment.
///
/// Returns `Ok(None)` for chunks carrying no text (e.g. the final usage
/// chunk); an embedded `error` object becomes `Error::Api`.
pub(crate) fn stream_chunk_text(payload: &str) -> Result<Option<String>> {
    if let Ok(error) = serde_json::from_str::<GeminiError>(payload) {
        return Err(Error::Api {
            status: error.error.code,
            message: format!("{}: {}", error.error.status, error.error.message),
        });
    }

    let chunk: GeminiResponse = serde_json::from_str(payload)
        .map_err(|e| Error::InvalidResponse(format!("bad stream chunk: {}", e)))?;

    let text: String = chunk
        .candidates
        .first()
        .map(|candidate| {
            candidate
                .content
                .parts
                .iter()
                .filter_map(|part| match part {
                    GeminiPart::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(if text.is_empty() { None } else { Some(text) })
}
