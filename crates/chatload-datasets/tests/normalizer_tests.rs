use chatload_datasets::{cached_workload, ArrivalFunction, DollyDataset, DollyRecord, NormalizeOpts};
use chatload_core::CacheStore;
use tempfile::TempDir;

#[test]
fn dolly_normalizer_round_trips_through_a_disk_cache() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::open(dir.path()).unwrap();
    let ds = DollyDataset::new(vec![DollyRecord {
        instruction: "Summarize".to_string(),
        context: "a long article".to_string(),
    }]);
    let opts = NormalizeOpts::default();

    let workload = cached_workload(&store, "dolly::to_workload", &opts, || ds.to_workload(None, &opts)).unwrap();
    assert_eq!(workload.len(), 1);

    let cached = cached_workload(&store, "dolly::to_workload", &opts, || panic!("should hit cache")).unwrap();
    assert_eq!(workload, cached);
}

#[test]
fn synthesizer_rejects_free_form_expressions_but_accepts_arithmetic() {
    assert!(ArrivalFunction::parse("lambda t: t").is_err());
    assert!(ArrivalFunction::parse("3 - t").is_ok());
}
