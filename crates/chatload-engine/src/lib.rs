//! Time-driven execution of a [`chatload_types::Workload`]: one cooperative
//! task per visit, a single polling scheduler loop, and trace logging
//! through [`chatload_index::TraceStore`].

mod error;
mod scheduler;
mod time;
mod visit_runner;

pub use error::{Error, Result};
pub use scheduler::run_workload;
