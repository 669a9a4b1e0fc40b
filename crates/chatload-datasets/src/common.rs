use chatload_types::GenParams;
use serde::{Deserialize, Serialize};

/// Options shared by every normalizer's `to_workload`.
///
/// Mirrors the `**kwargs` overlay the original per-corpus loaders accepted:
/// generation defaults applied to every emitted `SimReq`, plus the
/// post-processing knobs every normalizer runs through on its way out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeOpts {
    pub gen_params: GenParams,
    pub compression_ratio: f64,
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for NormalizeOpts {
    fn default() -> Self {
        Self { gen_params: GenParams::default(), compression_ratio: 1.0, min_len: 0, max_len: usize::MAX }
    }
}

/// Applies the shared post-processing pipeline every normalizer runs after
/// assembling its raw (offset, Visit) pairs: offset normalization,
/// compression, then length filtering.
pub(crate) fn postprocess(workload: chatload_types::Workload, opts: &NormalizeOpts) -> chatload_types::Workload {
    workload
        .normalize_offsets()
        .compress(opts.compression_ratio)
        .filter_by_length(opts.min_len, opts.max_len)
}
