use std::pin::Pin;

use chatload_types::{GenParams, Message, ResPiece};
use futures::Stream;

use crate::client::EndpointClient;

pub type BoxStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

/// The single capability every vendor adapter provides: given a dialog and
/// generation parameters, produce a lazy sequence of response pieces.
///
/// A per-frame decode failure is logged and skipped, keeping the stream
/// alive; a transport or protocol failure instead yields exactly one
/// [`ResPiece::error`] (identifiable via `ResPiece::is_error`) and ends the
/// stream. Neither case is surfaced as a Rust-level error return, since the
/// visit runner consumes the stream to completion either way.
pub trait EndpointAdapter: Send + Sync {
    fn stream(
        &self,
        client: EndpointClient,
        dialog: Vec<Message>,
        gen_params: GenParams,
    ) -> BoxStream<ResPiece>;
}
