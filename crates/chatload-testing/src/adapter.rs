use std::collections::VecDeque;
use std::sync::Mutex;

use chatload_providers::{BoxStream, EndpointAdapter, EndpointClient};
use chatload_types::{GenParams, Message, ResPiece};

fn now_secs() -> f64 {
    std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap().as_secs_f64()
}

/// Builds the [`ResPiece`] sequence for one scripted reply.
pub mod reply {
    use super::*;

    /// A single successful reply split into `n` equal-sized pieces.
    pub fn success(text: &str) -> Vec<ResPiece> {
        vec![ResPiece::new(0, Some(text.to_string()), now_secs())]
    }

    /// A reply streamed as separate pieces, one per word, mimicking token-by-token delivery.
    pub fn streamed(text: &str) -> Vec<ResPiece> {
        text.split_whitespace().map(|word| ResPiece::new(0, Some(format!("{word} ")), now_secs())).collect()
    }

    /// A transport/protocol failure: exactly one error piece, ending the stream.
    pub fn failure(message: &str) -> Vec<ResPiece> {
        vec![ResPiece::error(message, now_secs())]
    }
}

/// An [`EndpointAdapter`] test double that replays scripted responses instead
/// of making a network call.
///
/// Each call to [`EndpointAdapter::stream`] pops the next queued reply; once
/// the queue is down to its last entry, that entry repeats for every further
/// call, so a short script still covers a workload with more requests than
/// scripted replies.
pub struct ScriptedAdapter {
    replies: Mutex<VecDeque<Vec<ResPiece>>>,
}

impl ScriptedAdapter {
    pub fn new(replies: Vec<Vec<ResPiece>>) -> Self {
        assert!(!replies.is_empty(), "ScriptedAdapter needs at least one reply");
        Self { replies: Mutex::new(replies.into_iter().collect()) }
    }

    /// Replays a single fixed reply for every call.
    pub fn single(pieces: Vec<ResPiece>) -> Self {
        Self::new(vec![pieces])
    }
}

impl EndpointAdapter for ScriptedAdapter {
    fn stream(&self, _client: EndpointClient, _dialog: Vec<Message>, _gen_params: GenParams) -> BoxStream<ResPiece> {
        let mut queue = self.replies.lock().unwrap();
        let pieces = if queue.len() > 1 { queue.pop_front().unwrap() } else { queue.front().cloned().unwrap() };
        Box::pin(futures::stream::iter(pieces))
    }
}
