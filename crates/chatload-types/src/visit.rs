use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::request::SimReq;

/// A single scheduled request within a visit: the offset (in seconds, relative
/// to the visit's own start) at which it should be launched, paired with the
/// request itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledReq {
    pub scheduled_offset: f64,
    pub req: SimReq,
}

/// An ordered sequence of requests that share conversational context and run
/// sequentially within a single cooperative task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub reqs: Vec<ScheduledReq>,
}

impl Visit {
    pub fn new(reqs: Vec<ScheduledReq>) -> Self {
        Self { reqs }
    }

    pub fn len(&self) -> usize {
        self.reqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reqs.is_empty()
    }

    /// Checks the structural invariants a visit must satisfy before it can be
    /// scheduled:
    ///
    /// - scheduled offsets are strictly increasing
    /// - every `dep_id` refers to a request id that occurs earlier in the visit
    /// - no request depends on itself
    /// - every request has exactly one of `content` or `dep_id` set
    pub fn validate(&self) -> Result<()> {
        let mut seen_ids: HashSet<&str> = HashSet::new();
        let mut prev_offset: Option<f64> = None;

        for scheduled in &self.reqs {
            if let Some(prev) = prev_offset {
                if scheduled.scheduled_offset <= prev {
                    return Err(Error::InvalidVisit(format!(
                        "scheduled offsets must be strictly increasing, got {} after {}",
                        scheduled.scheduled_offset, prev
                    )));
                }
            }
            prev_offset = Some(scheduled.scheduled_offset);

            let req = &scheduled.req;
            match (&req.content, &req.dep_id) {
                (Some(_), None) | (None, Some(_)) => {}
                (Some(_), Some(_)) => {
                    return Err(Error::InvalidVisit(format!(
                        "request {} sets both content and dep_id",
                        req.id
                    )));
                }
                (None, None) => {
                    return Err(Error::InvalidVisit(format!(
                        "request {} sets neither content nor dep_id",
                        req.id
                    )));
                }
            }

            if let Some(dep_id) = &req.dep_id {
                if dep_id == &req.id {
                    return Err(Error::InvalidVisit(format!(
                        "request {} depends on itself",
                        req.id
                    )));
                }
                if !seen_ids.contains(dep_id.as_str()) {
                    return Err(Error::InvalidVisit(format!(
                        "request {} depends on unknown or not-yet-seen id {}",
                        req.id, dep_id
                    )));
                }
            }

            if !seen_ids.insert(req.id.as_str()) {
                return Err(Error::InvalidVisit(format!(
                    "duplicate request id {} within visit",
                    req.id
                )));
            }
        }

        Ok(())
    }
}
