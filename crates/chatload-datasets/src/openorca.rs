use chatload_types::{ScheduledReq, ScheduledVisit, SimReq, Visit, Workload};
use rand::seq::SliceRandom;

use crate::common::{postprocess, NormalizeOpts};
use crate::error::Result;

/// One raw OpenOrca instruction record, with an optional system prompt.
#[derive(Debug, Clone)]
pub struct OpenOrcaRecord {
    pub system_prompt: Option<String>,
    pub question: String,
}

/// Normalizes the OpenOrca instruction-following corpus into a `Workload`.
/// Single-turn: every record is one literal request, optionally preceded by
/// a system prompt (carried as request metadata rather than a separate
/// message, since `SimReq` models one new turn, not a full message list).
pub struct OpenOrcaDataset {
    records: Vec<OpenOrcaRecord>,
}

impl OpenOrcaDataset {
    pub fn new(records: Vec<OpenOrcaRecord>) -> Self {
        Self { records }
    }

    pub fn dialogs(&self) -> Vec<String> {
        self.records.iter().map(|r| r.question.clone()).collect()
    }

    /// Builds a `Workload`, optionally drawing a random `sample_size`-sized
    /// subset before normalizing (mirrors the original's `random.sample`
    /// subsetting, used to cap very large corpora to a manageable run size).
    /// `interval`, when set, spaces visits `interval` seconds apart instead
    /// of the default one-per-second nominal spacing.
    pub fn to_workload(
        &self,
        interval: Option<f64>,
        sample_size: Option<usize>,
        rng: &mut impl rand::Rng,
        opts: &NormalizeOpts,
    ) -> Result<Workload> {
        let mut indices: Vec<usize> = (0..self.records.len()).collect();
        if let Some(n) = sample_size {
            indices = indices.choose_multiple(rng, n.min(indices.len())).cloned().collect();
            indices.sort_unstable();
        }

        let step = interval.unwrap_or(1.0);
        let scheduled_visits: Vec<ScheduledVisit> = indices
            .into_iter()
            .enumerate()
            .map(|(ordinal, i)| {
                let record = &self.records[i];
                let req = SimReq::literal(format!("openorca-{i}"), record.question.clone())
                    .with_gen_params(opts.gen_params.clone());
                ScheduledVisit {
                    start_offset: step * ordinal as f64,
                    visit: Visit::new(vec![ScheduledReq { scheduled_offset: 0.0, req }]),
                }
            })
            .collect();

        let workload = postprocess(Workload::new(scheduled_visits), opts);
        workload.validate()?;
        Ok(workload)
    }
}
