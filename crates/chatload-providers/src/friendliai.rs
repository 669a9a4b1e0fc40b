//! Adapter for FriendliAI's streaming completions format.
//!
//! FriendliAI frames are shaped differently from the OpenAI-style delta
//! frames: each token arrives as its own `{"event": "token_sampled", "text":
//! "..."}` object, with a terminal `{"event": "complete", ...}` frame rather
//! than a bare `[DONE]` sentinel. This is kept as its own adapter (mirroring
//! the dedicated code path the original simulator carried for this vendor)
//! instead of being folded into the generic chat-completions parser.

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
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
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

fn is_terminal_frame(frame: &Value) -> bool {
    frame["event"].as_str() == Some("complete")
}

fn extract_token_text(frame: &Value) -> Option<String> {
    if frame["event"].as_str() != Some("token_sampled") {
        return None;
    }
    frame["text"].as_str().map(str::to_string)
}

pub struct FriendliAiAdapter;

impl EndpointAdapter for FriendliAiAdapter {
    fn stream(&self, client: EndpointClient, dialog: Vec<Message>, gen_params: GenParams) -> BoxStream<ResPiece> {
        Box::pin(async_stream::stream! {
            let url = format!("{}/v1/chat/completions", client.base_url());
            let body = CompletionRequest {
                model: client.model(),
                messages: dialog
                    .iter()
                    .map(|m| WireMessage { role: role_str(m.role), content: &m.content })
                    .collect(),
                stream: true,
                max_tokens: gen_params.max_tokens,
                temperature: gen_params.temperature,
            };

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
                            if is_terminal_frame(&frame) {
                                return;
                            }
                            if let Some(text) = extract_token_text(&frame) {
                                yield ResPiece::new(0, Some(text), now_secs());
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
}
