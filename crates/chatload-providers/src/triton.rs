//! Adapter for NVIDIA Triton's generate-stream endpoint.
//!
//! Unlike the SSE-based adapters, Triton's HTTP streaming endpoint emits one
//! JSON object per line: `{"text_output": "hello", "model_name": "..."}`,
//! with no `data:` framing or terminal sentinel — the stream simply ends
//! when the connection closes.

use chatload_types::{GenParams, Message, ResPiece};
use futures::StreamExt;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::client::EndpointClient;
use crate::error::map_http_status;
use crate::ndjson::NdjsonLineBuffer;
use crate::time::now_secs;
use crate::traits::{BoxStream, EndpointAdapter};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    text_input: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

fn render_prompt(dialog: &[Message]) -> String {
    dialog.iter().map(|m| m.content.as_str()).collect::<Vec<_>>().join("\n")
}

fn extract_text_output(frame: &Value) -> Option<String> {
    frame["text_output"].as_str().map(str::to_string)
}

pub struct TritonAdapter;

impl EndpointAdapter for TritonAdapter {
    fn stream(&self, client: EndpointClient, dialog: Vec<Message>, gen_params: GenParams) -> BoxStream<ResPiece> {
        Box::pin(async_stream::stream! {
            let url = format!("{}/v2/models/{}/generate_stream", client.base_url(), client.model());
            let prompt = render_prompt(&dialog);
            let body = GenerateRequest {
                text_input: &prompt,
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
            let mut buf = NdjsonLineBuffer::new();

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

                for line in buf.push(chunk_str) {
                    match serde_json::from_str::<Value>(&line) {
                        Ok(frame) => {
                            if let Some(text) = extract_text_output(&frame) {
                                yield ResPiece::new(0, Some(text), now_secs());
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "skipping malformed NDJSON line");
                            continue;
                        }
                    }
                }
            }

            if let Some(line) = buf.finish()
                && let Ok(frame) = serde_json::from_str::<Value>(&line)
                && let Some(text) = extract_text_output(&frame)
            {
                yield ResPiece::new(0, Some(text), now_secs());
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_text_output() {
        let frame = json!({"text_output": "hello", "model_name": "llama3"});
        assert_eq!(extract_text_output(&frame), Some("hello".to_string()));
    }

    #[test]
    fn missing_text_output_is_none() {
        let frame = json!({"model_name": "llama3"});
        assert_eq!(extract_text_output(&frame), None);
    }
}
