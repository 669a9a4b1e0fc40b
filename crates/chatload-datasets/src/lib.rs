//! Dataset normalizers: convert raw chat corpora into the canonical
//! [`chatload_types::Workload`] the scheduler and runner operate on.
//!
//! Loading a corpus from its original source (HTTP download, disk format
//! parsing) is deliberately outside this crate's scope — callers hand in
//! already-parsed records, and a normalizer's job is purely the shape
//! conversion and disk-backed memoization described here.

mod cache;
mod common;
mod convai2;
mod dolly;
mod error;
mod oasst1;
mod openorca;
mod registry;
mod synthesizer;

pub use cache::cached_workload;
pub use common::NormalizeOpts;
pub use convai2::{ConvAi2Dataset, ConvAi2Record};
pub use dolly::{DollyDataset, DollyRecord};
pub use error::{Error, Result};
pub use oasst1::{Oasst1Dataset, Oasst1Record};
pub use openorca::{OpenOrcaDataset, OpenOrcaRecord};
pub use registry::{dataset_metadata, dataset_names, DatasetMetadata, DATASETS};
pub use synthesizer::{synthesize, ArrivalFunction};
