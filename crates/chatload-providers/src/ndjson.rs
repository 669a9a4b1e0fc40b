//! Line-buffered parsing of newline-delimited JSON bodies (used by the
//! triton adapter).

pub(crate) struct NdjsonLineBuffer {
    buf: String,
}

impl NdjsonLineBuffer {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Feeds a chunk of bytes and returns the complete lines it closes out,
    /// skipping blank lines.
    pub(crate) fn push(&mut self, chunk: &str) -> Vec<String> {
        self.buf.push_str(chunk);
        let mut out = Vec::new();
        while let Some(newline_pos) = self.buf.find('\n') {
            let line = self.buf[..newline_pos].trim_end_matches('\r').to_string();
            self.buf.drain(..=newline_pos);
            if !line.trim().is_empty() {
                out.push(line);
            }
        }
        out
    }

    /// Flushes a final partial line with no trailing newline, if any.
    pub(crate) fn finish(&mut self) -> Option<String> {
        let remaining = self.buf.trim().to_string();
        self.buf.clear();
        if remaining.is_empty() {
            None
        } else {
            Some(remaining)
        }
    }
}
