//! Adapter for the OpenAI chat-completions streaming wire format.
//!
//! vLLM's OpenAI-compatible server speaks the same protocol, so
//! [`VllmAdapter`] is a thin wrapper that posts to the same path and reuses
//! the parsing logic here.

use chatload_types::{GenParams, Message, ResPiece, Role};
use futures::StreamExt;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::client::EndpointClient;
use crate::error::map_http_status;
use crate::sse::SseLineBuffer;
use crate::time::now_secs;
use crate::traits::{BoxStream, EndpointAdapter};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<String>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

fn role_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn build_request<'a>(model: &'a str, dialog: &'a [Message], gen_params: &'a GenParams) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: dialog
            .iter()
            .map(|m| WireMessage { role: role_str(m.role), content: &m.content })
            .collect(),
        stream: true,
        max_tokens: gen_params.max_tokens,
        temperature: gen_params.temperature,
        top_p: gen_params.top_p,
        stop: gen_params.stop.clone(),
    }
}

/// Pulls the first `choices[0].delta.content` string out of a decoded chat
/// completion chunk, if present.
fn extract_delta_content(frame: &Value) -> Option<String> {
    frame["choices"][0]["delta"]["content"].as_str().map(str::to_string)
}

fn chat_completions_stream(client: EndpointClient, path: &'static str, dialog: Vec<Message>, gen_params: GenParams) -> BoxStream<ResPiece> {
    Box::pin(async_stream::stream! {
        let url = format!("{}{}", client.base_url(), path);
        let body = build_request(client.model(), &dialog, &gen_params);

        let mut req = client.http.post(&url).json(&body);
        if let Some(key) = &client.api_key {
            req = req.bearer_auth(key);
        }

        let response = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                yield ResPiece::error(format!("request error: {e}"), now_secs());
                return;
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response.text().await.unwrap_or_default();
            let err = map_http_status(status, &body_text, None);
            yield ResPiece::error(err.to_string(), now_secs());
            return;
        }

        let mut byte_stream = response.bytes_stream();
        let mut buf = SseLineBuffer::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(b) => b,
                Err(e) => {
                    yield ResPiece::error(format!("stream read error: {e}"), now_secs());
                    return;
                }
            };
            let chunk_str = match std::str::from_utf8(&chunk) {
                Ok(s) => s,
                Err(e) => {
                    yield ResPiece::error(format!("utf-8 decode error: {e}"), now_secs());
                    return;
                }
            };

            for payload in buf.push(chunk_str) {
                match serde_json::from_str::<Value>(&payload) {
                    Ok(frame) => {
                        if let Some(content) = extract_delta_content(&frame) {
                            yield ResPiece::new(0, Some(content), now_secs());
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "skipping malformed SSE frame");
                        continue;
                    }
                }
            }
            if buf.is_done() {
                return;
            }
        }
    })
}

/// OpenAI chat-completions API.
pub struct OpenAiAdapter;

impl EndpointAdapter for OpenAiAdapter {
    fn stream(&self, client: EndpointClient, dialog: Vec<Message>, gen_params: GenParams) -> BoxStream<ResPiece> {
        chat_completions_stream(client, "/v1/chat/completions", dialog, gen_params)
    }
}

/// vLLM's OpenAI-compatible server.
pub struct VllmAdapter;

impl EndpointAdapter for VllmAdapter {
    fn stream(&self, client: EndpointClient, dialog: Vec<Message>, gen_params: GenParams) -> BoxStream<ResPiece> {
        chat_completions_stream(client, "/v1/chat/completions", dialog, gen_params)
    }
}
