//! Adapter for Hugging Face Text Generation Inference's streaming format.
//!
//! TGI's `/generate_stream` endpoint emits SSE frames shaped like:
//! `{"token": {"id": 1, "text": "hello", "special": false}, "generated_text": null}`

use chatload_types::{GenParams, Message, ResPiece};
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
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
    stream: bool,
}

#[derive(Serialize)]
struct GenerateParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<String>,
}

/// TGI takes a single rendered prompt rather than a structured dialog;
/// turns are joined with role-tagged lines.
fn render_prompt(dialog: &[Message]) -> String {
    dialog
        .iter()
        .map(|m| format!("{:?}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

fn extract_token_text(frame: &Value) -> Option<String> {
    frame["token"]["text"].as_str().map(str::to_string)
}

pub struct TgiAdapter;

impl EndpointAdapter for TgiAdapter {
    fn stream(&self, client: EndpointClient, dialog: Vec<Message>, gen_params: GenParams) -> BoxStream<ResPiece> {
        Box::pin(async_stream::stream! {
            let url = format!("{}/generate_stream", client.base_url());
            let prompt = render_prompt(&dialog);
            let body = GenerateRequest {
                inputs: &prompt,
                parameters: GenerateParameters {
                    max_new_tokens: gen_params.max_tokens,
                    temperature: gen_params.temperature,
                    top_p: gen_params.top_p,
                    stop: gen_params.stop.clone(),
                },
                stream: true,
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
