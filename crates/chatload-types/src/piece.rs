use serde::{Deserialize, Serialize};

/// Sentinel index marking a piece as a terminal transport/protocol error
/// rather than generated content. No real channel uses this index.
pub const ERROR_INDEX: u32 = u32::MAX;

/// A single piece of a streamed response, as yielded by an endpoint adapter.
///
/// `index == 0` marks the primary content channel (what gets joined into the
/// final response text); adapters may emit other indices for side channels
/// such as reasoning traces, which are logged but not folded into `content`.
/// `index == ERROR_INDEX` marks a terminal error piece: the adapter hit a
/// transport or protocol failure and the stream ends immediately after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResPiece {
    pub index: u32,
    pub content: Option<String>,
    pub received_at: f64,
}

impl ResPiece {
    pub fn new(index: u32, content: Option<String>, received_at: f64) -> Self {
        Self { index, content, received_at }
    }

    /// Builds a terminal error piece: a transport or protocol failure that
    /// ends the stream, carrying the error text in `content`.
    pub fn error(message: impl Into<String>, received_at: f64) -> Self {
        Self { index: ERROR_INDEX, content: Some(message.into()), received_at }
    }

    pub fn is_error(&self) -> bool {
        self.index == ERROR_INDEX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_piece_is_distinguishable_from_content() {
        let err = ResPiece::error("boom", 1.0);
        let content = ResPiece::new(0, Some("boom".to_string()), 1.0);
        assert!(err.is_error());
        assert!(!content.is_error());
        assert_eq!(err.content, content.content);
    }
}
