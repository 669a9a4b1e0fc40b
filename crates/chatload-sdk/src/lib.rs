//! Public facade over chatload: load a dataset into a [`chatload_types::Workload`],
//! replay it against an inference endpoint with [`Client`], and fold the
//! results into a report.
//!
//! ```no_run
//! # async fn doc() -> chatload_sdk::Result<()> {
//! use chatload_sdk::Client;
//!
//! let client = Client::connect("openai", "http://localhost:8000", "my-model")?;
//! let workload = chatload_sdk::load_workload("workload.json")?;
//! let responses = client.run(&workload).await?;
//!
//! let report = chatload_sdk::generate_report(&responses);
//! println!("fail rate: {}", report.request_level.fail_rate);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod io;
mod report;

pub use client::Client;
pub use error::{Error, Result};
pub use io::{load_responses, load_workload, save_responses, save_workload};
pub use report::{generate_report, generate_report_with, RunReport};

pub use chatload_datasets::{cached_workload, dataset_metadata, dataset_names};
pub use chatload_providers::{endpoint_metadata, endpoint_names};
pub use chatload_types::{RunConfig, VisitResponse, Workload};
