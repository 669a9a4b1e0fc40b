use std::fs;
use std::path::Path;

use chatload_types::{VisitResponse, Workload};
use serde::Serialize;

use crate::error::Result;

/// Writes `value` to `path` atomically: serialize to a sibling `.tmp` file
/// and rename it into place, so a reader never observes a half-written file.
fn write_atomic(path: &Path, value: &impl Serialize) -> Result<()> {
    let tmp_path = path.with_extension("tmp");
    let bytes = serde_json::to_vec_pretty(value)?;
    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn save_workload(path: impl AsRef<Path>, workload: &Workload) -> Result<()> {
    write_atomic(path.as_ref(), workload)
}

pub fn load_workload(path: impl AsRef<Path>) -> Result<Workload> {
    let bytes = fs::read(path.as_ref())?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn save_responses(path: impl AsRef<Path>, responses: &[VisitResponse]) -> Result<()> {
    write_atomic(path.as_ref(), &responses)
}

pub fn load_responses(path: impl AsRef<Path>) -> Result<Vec<VisitResponse>> {
    let bytes = fs::read(path.as_ref())?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatload_types::{ScheduledReq, ScheduledVisit, SimReq, Visit};
    use tempfile::TempDir;

    #[test]
    fn workload_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("workload.json");
        let workload = Workload::new(vec![ScheduledVisit {
            start_offset: 0.0,
            visit: Visit::new(vec![ScheduledReq { scheduled_offset: 0.0, req: SimReq::literal("r1", "hi") }]),
        }]);

        save_workload(&path, &workload).unwrap();
        let loaded = load_workload(&path).unwrap();
        assert_eq!(workload, loaded);
        assert!(!dir.path().join("workload.tmp").exists());
    }

    #[test]
    fn responses_round_trip_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("responses.json");
        let responses = vec![VisitResponse::new(0.0, vec![])];

        save_responses(&path, &responses).unwrap();
        let loaded = load_responses(&path).unwrap();
        assert_eq!(responses, loaded);
    }
}
