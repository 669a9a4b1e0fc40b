use chatload_core::CacheStore;
use chatload_types::Workload;
use serde::Serialize;

use crate::error::Result;

/// Memoizes a normalizer's `to_workload` call on disk: a cache hit
/// deserializes the stored `Workload`, a miss computes it and writes it
/// atomically. `namespace` should identify the normalizer and method
/// (e.g. `"oasst1::to_workload"`); `args` is hashed into the cache key via
/// [`chatload_core::cache_key`], so any serializable option struct works.
pub fn cached_workload(
    store: &CacheStore,
    namespace: &str,
    args: &impl Serialize,
    compute: impl FnOnce() -> Result<Workload>,
) -> Result<Workload> {
    let key = chatload_core::cache_key(namespace, args)?;
    if let Some(cached) = store.get::<Workload>(&key)? {
        return Ok(cached);
    }
    let workload = compute()?;
    store.put(&key, &workload)?;
    Ok(workload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::NormalizeOpts;
    use chatload_types::{ScheduledReq, ScheduledVisit, SimReq, Visit};
    use std::cell::Cell;
    use tempfile::TempDir;

    #[test]
    fn second_call_hits_the_cache_without_recomputing() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let opts = NormalizeOpts::default();
        let calls = Cell::new(0);

        let build = || {
            calls.set(calls.get() + 1);
            Ok(Workload::new(vec![ScheduledVisit {
                start_offset: 0.0,
                visit: Visit::new(vec![ScheduledReq {
                    scheduled_offset: 0.0,
                    req: SimReq::literal("r1", "hi"),
                }]),
            }]))
        };

        let first = cached_workload(&store, "test::to_workload", &opts, build).unwrap();
        let second = cached_workload(&store, "test::to_workload", &opts, build).unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
    }
}
