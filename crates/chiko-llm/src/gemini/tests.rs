//! Tests for Gemini transport

use super::config::{GeminiConfig, DEFAULT_BASE_URL};
use super::convert::{
    chat_request, content_request, content_response, convert_history, stream_chunk_text,
};
use super::provider::{error_from_response, fragment_stream, GeminiTransport};
use super::sse::SseDecoder;
use super::types::GeminiResponse;
use crate::error::Error;
use crate::media::{AspectRatio, ImageArtifact, Part, DEFAULT_IMAGE_MIME};
use crate::message::Message;
use crate::transport::{ChatRequest, ContentRequest};
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use reqwest::StatusCode;
use std::time::Duration;

#[test]
fn test_config_builder() {
    let config = GeminiConfig::new()
        .with_base_url("http://localhost:8080/v1beta/")
        .with_timeout(Duration::from_secs(5));

    assert_eq!(config.base_url, "http://localhost:8080/v1beta");
    assert_eq!(
        config.stream_url("gemini-2.5-flash"),
        "http://localhost:8080/v1beta/models/gemini-2.5-flash:streamGenerateContent?alt=sse"
    );
    assert_eq!(config.timeout_ms(), 5_000);
    assert_eq!(GeminiConfig::default().base_url, DEFAULT_BASE_URL);
}

#[test]
fn test_transport_rejects_empty_base_url() {
    let result = GeminiTransport::new(GeminiConfig::new().with_base_url("  "));
    assert!(matches!(result, Err(Error::NotConfigured(_))));
}

#[test]
fn test_history_skips_empty_placeholder() {
    let history = vec![
        Message::model("Woy Bro!"),
        Message::user("Halo"),
        Message::model(""),
    ];

    let contents = convert_history(&history);
    assert_eq!(contents.len(), 2);
    assert_eq!(contents[0].role.as_deref(), Some("model"));
    assert_eq!(contents[1].role.as_deref(), Some("user"));
}

#[test]
fn test_chat_request_shape() {
    let request = ChatRequest {
        model: "gemini-2.5-flash".to_string(),
        system_instruction: "Lo itu temen akrab user.".to_string(),
        history: vec![Message::user("Halo"), Message::model("Halo juga")],
        message: "Apa kabar?".to_string(),
    };

    let json = serde_json::to_value(chat_request(&request)).unwrap();
    let contents = json["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[2]["role"], "user");
    assert_eq!(contents[2]["parts"][0]["text"], "Apa kabar?");
    assert_eq!(
        json["systemInstruction"]["parts"][0]["text"],
        "Lo itu temen akrab user."
    );
    assert!(json.get("generationConfig").is_none());
}

#[test]
fn test_content_request_keeps_image_before_text() {
    let request = ContentRequest::new("gemini-2.5-flash-image")
        .with_image(ImageArtifact::new("image/jpeg", "/9j/4AAQ"))
        .with_text("Remove the car");

    let json = serde_json::to_value(content_request(&request)).unwrap();
    let parts = json["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(parts[0]["inlineData"]["data"], "/9j/4AAQ");
    assert_eq!(parts[1]["text"], "Remove the car");
}

#[test]
fn test_content_request_aspect_ratio() {
    let request = ContentRequest::new("gemini-2.5-flash-image")
        .with_text("a cat")
        .with_aspect_ratio(AspectRatio::Landscape);

    let json = serde_json::to_value(content_request(&request)).unwrap();
    assert_eq!(json["generationConfig"]["imageConfig"]["aspectRatio"], "16:9");
}

#[test]
fn test_content_response_parts() {
    let body = r#"{
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    {"text": "Here is your image"},
                    {"inlineData": {"data": "iVBORw0KGgo"}},
                    {"functionCall": {"name": "noop", "args": {}}}
                ]
            },
            "finishReason": "STOP"
        }]
    }"#;
    let parsed: GeminiResponse = serde_json::from_str(body).unwrap();
    let response = content_response(parsed);

    assert_eq!(response.parts.len(), 2);
    assert_eq!(response.parts[0], Part::Text("Here is your image".to_string()));
    let media = response.first_media().unwrap();
    assert_eq!(media.mime_type, DEFAULT_IMAGE_MIME);
    assert_eq!(media.data, "iVBORw0KGgo");
}

#[test]
fn test_content_response_blocked_prompt() {
    let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
    let parsed: GeminiResponse = serde_json::from_str(body).unwrap();
    assert!(content_response(parsed).parts.is_empty());
}

#[test]
fn test_stream_chunk_text() {
    let chunk = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hal"},{"text":"o"}]}}]}"#;
    assert_eq!(stream_chunk_text(chunk).unwrap().as_deref(), Some("Halo"));

    let usage_only = r#"{"candidates":[{"content":{"role":"model","parts":[]},"finishReason":"STOP"}],"usageMetadata":{"totalTokenCount":12}}"#;
    assert!(stream_chunk_text(usage_only).unwrap().is_none());
}

#[test]
fn test_stream_chunk_error_object() {
    let chunk = r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#;
    match stream_chunk_text(chunk) {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 403);
            assert!(message.contains("API key not valid"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[test]
fn test_sse_decoder_handles_split_lines() {
    let mut decoder = SseDecoder::default();
    assert!(decoder.feed(b"data: {\"a\"").is_empty());
    let payloads = decoder.feed(b":1}\r\n\r\ndata: {\"b\":2}\r\n");
    assert_eq!(payloads, vec!["{\"a\":1}".to_string(), "{\"b\":2}".to_string()]);
    assert!(decoder.finish().is_none());
}

#[test]
fn test_sse_decoder_flushes_trailing_line() {
    let mut decoder = SseDecoder::default();
    assert!(decoder.feed(b": keep-alive\n").is_empty());
    assert!(decoder.feed(b"data: {\"c\":3}").is_empty());
    assert_eq!(decoder.finish().as_deref(), Some("{\"c\":3}"));
}

#[test]
fn test_error_from_response_rate_limit() {
    let body = r#"{"error":{"code":429,"message":"Quota exceeded for metric","status":"RESOURCE_EXHAUSTED"}}"#;
    let err = error_from_response(StatusCode::TOO_MANY_REQUESTS, body);
    assert!(matches!(err, Error::RateLimit(ref m) if m.contains("Quota exceeded")));
    assert_eq!(err.status(), Some(429));
}

#[test]
fn test_error_from_response_forbidden() {
    let err = error_from_response(StatusCode::FORBIDDEN, "<html>forbidden</html>");
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 403);
            assert!(message.starts_with("HTTP 403"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

fn sse_body(chunks: &[&'static str]) -> futures::stream::BoxStream<'static, reqwest::Result<Bytes>> {
    let items: Vec<reqwest::Result<Bytes>> = chunks
        .iter()
        .map(|c| Ok(Bytes::from_static(c.as_bytes())))
        .collect();
    stream::iter(items).boxed()
}

#[tokio::test]
async fn test_fragment_stream_across_chunks() {
    let body = sse_body(&[
        "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Hal\"}]}}]}\r\n\r\ndata: {\"candi",
        "dates\":[{\"content\":{\"parts\":[{\"text\":\"o \"}]}}]}\r\n\r\n",
        "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Bro\"}]}}]}",
    ]);

    let fragments: Vec<String> = fragment_stream(body, 1_000)
        .map(|item| item.unwrap())
        .collect()
        .await;
    assert_eq!(fragments, vec!["Hal", "o ", "Bro"]);
}

#[tokio::test]
async fn test_fragment_stream_stops_after_error() {
    let body = sse_body(&[
        "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Hi\"}]}}]}\n",
        "data: {\"error\":{\"code\":500,\"message\":\"boom\",\"status\":\"INTERNAL\"}}\n",
        "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"late\"}]}}]}\n",
    ]);

    let items: Vec<_> = fragment_stream(body, 1_000).collect().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().unwrap(), "Hi");
    assert!(matches!(items[1], Err(Error::Api { status: 500, .. })));
}
