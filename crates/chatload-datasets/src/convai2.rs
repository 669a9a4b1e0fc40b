use chatload_types::{ScheduledReq, ScheduledVisit, SimReq, Visit, Workload};

use crate::common::{postprocess, NormalizeOpts};
use crate::error::Result;

/// One raw ConvAI2 conversation: alternating user/assistant utterances.
#[derive(Debug, Clone)]
pub struct ConvAi2Record {
    pub dialog: Vec<String>,
}

/// Normalizes the ConvAI2 persona-chat corpus into a `Workload`.
pub struct ConvAi2Dataset {
    records: Vec<ConvAi2Record>,
}

impl ConvAi2Dataset {
    pub fn new(records: Vec<ConvAi2Record>) -> Self {
        Self { records }
    }

    pub fn dialogs(&self) -> Vec<String> {
        self.records.iter().map(|r| r.dialog.iter().step_by(2).cloned().collect::<Vec<_>>().join(" ")).collect()
    }

    /// Builds a `Workload`. Each conversation becomes one visit containing
    /// one literal request per user turn (even-indexed utterances), in
    /// index order, one visit per conversation.
    ///
    /// When `separate_with_interval` is set, every user turn instead becomes
    /// its own single-request visit, spaced `interval` seconds apart.
    pub fn to_workload(&self, separate_with_interval: Option<f64>, opts: &NormalizeOpts) -> Result<Workload> {
        let workload = match separate_with_interval {
            None => self.workload_grouped(opts),
            Some(interval) => self.workload_separated(interval, opts),
        };
        workload.validate()?;
        Ok(workload)
    }

    fn workload_grouped(&self, opts: &NormalizeOpts) -> Workload {
        let scheduled_visits: Vec<ScheduledVisit> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let reqs: Vec<ScheduledReq> = record
                    .dialog
                    .iter()
                    .enumerate()
                    .step_by(2)
                    .map(|(j, turn)| ScheduledReq {
                        scheduled_offset: (j / 2) as f64,
                        req: SimReq::literal(format!("convai2-{i}-{j}"), turn.clone())
                            .with_gen_params(opts.gen_params.clone()),
                    })
                    .collect();
                ScheduledVisit { start_offset: i as f64, visit: Visit::new(reqs) }
            })
            .collect();

        postprocess(Workload::new(scheduled_visits), opts)
    }

    fn workload_separated(&self, interval: f64, opts: &NormalizeOpts) -> Workload {
        let mut scheduled_visits = Vec::new();
        for (i, record) in self.records.iter().enumerate() {
            for (j, turn) in record.dialog.iter().enumerate().step_by(2) {
                let req = SimReq::literal(format!("convai2-{i}-{j}"), turn.clone())
                    .with_gen_params(opts.gen_params.clone());
                scheduled_visits.push(ScheduledVisit {
                    start_offset: interval * (j / 2) as f64,
                    visit: Visit::new(vec![ScheduledReq { scheduled_offset: 0.0, req }]),
                });
            }
        }
        scheduled_visits.sort_by(|a, b| a.start_offset.total_cmp(&b.start_offset));
        postprocess(Workload::new(scheduled_visits), opts)
    }
}
