//! `chatload`: a command-line front end over `chatload-sdk`. Replays a
//! recorded workload against an inference endpoint and reports on latency,
//! throughput, and failure rates.

mod args;
mod commands;

pub use args::Cli;
pub use commands::run;
