//! Testing infrastructure shared across chatload's integration tests.
//!
//! - [`ScriptedAdapter`]: an [`EndpointAdapter`](chatload_providers::EndpointAdapter)
//!   test double that replays a fixed, or per-call generated, sequence of
//!   [`chatload_types::ResPiece`] instead of talking to a real server.
//! - `builders`: terse constructors for [`chatload_types::Workload`] fixtures.
//! - `assertions`: custom assertions for run output validation.

pub mod adapter;
pub mod assertions;
pub mod builders;

pub use adapter::{reply, ScriptedAdapter};
