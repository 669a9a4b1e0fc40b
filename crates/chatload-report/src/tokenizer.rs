/// Converts response text into a token count for throughput and TPOT
/// calculations. Swappable so a caller can plug in the tokenizer matching
/// the model under test; [`WhitespaceTokenizer`] is a reasonable default
/// when no model-specific tokenizer is available.
pub trait Tokenizer: Send + Sync {
    fn name(&self) -> &str;
    fn count_tokens(&self, text: &str) -> usize;
}

/// Counts whitespace-separated words as a proxy for tokens.
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn name(&self) -> &str {
        "whitespace"
    }

    fn count_tokens(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}
