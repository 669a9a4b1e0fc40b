use chatload_types::{ScheduledReq, ScheduledVisit, SimReq, Visit, Workload};

use crate::common::{postprocess, NormalizeOpts};
use crate::error::Result;

/// One raw Dolly instruction/response record.
#[derive(Debug, Clone)]
pub struct DollyRecord {
    pub instruction: String,
    pub context: String,
}

/// Normalizes Databricks' Dolly 15k instruction corpus into a `Workload`.
/// Single-turn: every record is one literal request.
pub struct DollyDataset {
    records: Vec<DollyRecord>,
}

impl DollyDataset {
    pub fn new(records: Vec<DollyRecord>) -> Self {
        Self { records }
    }

    pub fn dialogs(&self) -> Vec<String> {
        self.records.iter().map(prompt_text).collect()
    }

    /// Builds a `Workload`. By default, every record becomes its own visit
    /// at a nominal one-per-second arrival spacing (record index as offset).
    /// When `interval` is set, visits are instead spaced `interval` seconds
    /// apart.
    pub fn to_workload(&self, interval: Option<f64>, opts: &NormalizeOpts) -> Result<Workload> {
        let step = interval.unwrap_or(1.0);
        let scheduled_visits: Vec<ScheduledVisit> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let req = SimReq::literal(format!("dolly-{i}"), prompt_text(record))
                    .with_gen_params(opts.gen_params.clone());
                ScheduledVisit {
                    start_offset: step * i as f64,
                    visit: Visit::new(vec![ScheduledReq { scheduled_offset: 0.0, req }]),
                }
            })
            .collect();

        let workload = postprocess(Workload::new(scheduled_visits), opts);
        workload.validate()?;
        Ok(workload)
    }
}

fn prompt_text(record: &DollyRecord) -> String {
    format!("{}\n{}", record.instruction, record.context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<DollyRecord> {
        vec![
            DollyRecord { instruction: "Summarize".into(), context: "long text".into() },
            DollyRecord { instruction: "Translate".into(), context: "bonjour".into() },
        ]
    }

    #[test]
    fn each_record_becomes_its_own_single_request_visit() {
        let ds = DollyDataset::new(sample_records());
        let wl = ds.to_workload(None, &NormalizeOpts::default()).unwrap();
        assert_eq!(wl.len(), 2);
        assert!(wl.visits.iter().all(|v| v.visit.len() == 1));
    }

    #[test]
    fn interval_controls_visit_spacing() {
        let ds = DollyDataset::new(sample_records());
        let wl = ds.to_workload(Some(30.0), &NormalizeOpts::default()).unwrap();
        assert_eq!(wl.visits[1].start_offset, 30.0);
    }

    #[test]
    fn dialogs_combine_instruction_and_context() {
        let ds = DollyDataset::new(sample_records());
        assert_eq!(ds.dialogs()[0], "Summarize\nlong text");
    }
}
