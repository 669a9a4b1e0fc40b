use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::visit::Visit;

/// A single visit placed on the workload timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledVisit {
    pub start_offset: f64,
    pub visit: Visit,
}

/// An ordered collection of visits to replay against an endpoint, each
/// starting at its own offset (in seconds) relative to the start of the run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    pub visits: Vec<ScheduledVisit>,
}

impl Workload {
    pub fn new(visits: Vec<ScheduledVisit>) -> Self {
        Self { visits }
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Validates every visit and checks that start offsets are sorted.
    pub fn validate(&self) -> Result<()> {
        let mut prev: Option<f64> = None;
        for scheduled in &self.visits {
            if let Some(prev) = prev {
                if scheduled.start_offset < prev {
                    return Err(Error::InvalidWorkload(
                        "visits must be sorted by start_offset".to_string(),
                    ));
                }
            }
            prev = Some(scheduled.start_offset);
            scheduled
                .visit
                .validate()
                .map_err(|e| Error::InvalidWorkload(e.to_string()))?;
        }
        Ok(())
    }

    /// Shifts every visit's start offset so the earliest one sits at 0.
    /// A no-op on an empty workload.
    pub fn normalize_offsets(mut self) -> Self {
        let Some(min_offset) = self
            .visits
            .iter()
            .map(|v| v.start_offset)
            .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |a| a.min(x))))
        else {
            return self;
        };
        for scheduled in &mut self.visits {
            scheduled.start_offset -= min_offset;
        }
        self
    }

    /// Rescales every offset (visit start and per-request schedule) by
    /// `1 / ratio`. A `ratio` greater than 1 compresses the timeline (visits
    /// run sooner); a `ratio` between 0 and 1 stretches it. Invertible by
    /// calling again with `1.0 / ratio`.
    pub fn compress(mut self, ratio: f64) -> Self {
        for scheduled in &mut self.visits {
            scheduled.start_offset /= ratio;
            for r in &mut scheduled.visit.reqs {
                r.scheduled_offset /= ratio;
            }
        }
        self
    }

    /// Keeps only visits whose request count falls within `[min_len, max_len]`.
    pub fn filter_by_length(mut self, min_len: usize, max_len: usize) -> Self {
        self.visits.retain(|v| {
            let len = v.visit.len();
            len >= min_len && len <= max_len
        });
        self
    }
}
