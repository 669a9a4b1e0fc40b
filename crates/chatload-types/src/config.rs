use serde::{Deserialize, Serialize};

use crate::request::GenParams;

/// Scheduler tuning knobs for a single run, mirroring the defaults the
/// workload scheduler falls back to when a run omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Window, in seconds, within which a visit is still considered "on
    /// time" rather than late.
    pub time_tolerance: f64,
    /// Poll interval of the scheduler loop.
    pub time_step: f64,
    /// Maximum number of completed tasks harvested per scheduler iteration.
    pub check_size: usize,
    /// Minimum idle gap, in seconds, worth fast-forwarding over.
    pub skip_idle_min: f64,
    /// Generation parameters applied to a request that doesn't set its own.
    pub default_gen_params: GenParams,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            time_tolerance: 0.05,
            time_step: 0.05,
            check_size: 10,
            skip_idle_min: 1.0,
            default_gen_params: GenParams::default(),
        }
    }
}

impl RunConfig {
    /// Overlays `gen_params` onto this config's defaults: any field left
    /// unset on `gen_params` falls back to the run's default.
    pub fn overlay_gen_params(&self, gen_params: &GenParams) -> GenParams {
        GenParams {
            max_tokens: gen_params.max_tokens.or(self.default_gen_params.max_tokens),
            temperature: gen_params.temperature.or(self.default_gen_params.temperature),
            top_p: gen_params.top_p.or(self.default_gen_params.top_p),
            stop: if gen_params.stop.is_empty() {
                self.default_gen_params.stop.clone()
            } else {
                gen_params.stop.clone()
            },
        }
    }
}
