//! Line-buffered parsing of `text/event-stream` bodies shared by the SSE-based
//! adapters (openai, vllm, tgi, triton, friendliai).
//!
//! Only the `data:` field is meaningful to these adapters; other SSE fields
//! (`event:`, `id:`, comments) are ignored. A frame whose payload is the
//! literal `[DONE]` terminates the stream.

/// Accumulates bytes across chunks and yields complete `data:` payloads.
pub(crate) struct SseLineBuffer {
    buf: String,
    done: bool,
}

impl SseLineBuffer {
    pub(crate) fn new() -> Self {
        Self { buf: String::new(), done: false }
    }

    pub(crate) fn is_done(&self) -> bool {
        self.done
    }

    /// Feeds a chunk of bytes (assumed UTF-8) and returns the `data:`
    /// payloads completed by it, in order. Once `[DONE]` is seen,
    /// `is_done()` returns true and no further payloads are produced.
    pub(crate) fn push(&mut self, chunk: &str) -> Vec<String> {
        if self.done {
            return Vec::new();
        }
        self.buf.push_str(chunk);
        let mut out = Vec::new();

        while let Some(newline_pos) = self.buf.find('\n') {
            let line = self.buf[..newline_pos].trim_end_matches('\r').to_string();
            self.buf.drain(..=newline_pos);

            let Some(payload) = line.strip_prefix("data:") else {
                continue;
            };
            let payload = payload.trim();
            if payload == "[DONE]" {
                self.done = true;
                return out;
            }
            if !payload.is_empty() {
                out.push(payload.to_string());
            }
        }
        out
    }
}
