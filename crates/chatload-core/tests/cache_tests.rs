use chatload_core::{cache_key, CacheStore};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn cache_round_trip_via_key() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::open(dir.path()).unwrap();

    let key = cache_key("oasst1.to_workload", &json!({"sample_size": 100})).unwrap();
    assert!(!store.contains(&key));

    store.put(&key, &vec!["a", "b"]).unwrap();
    let value: Option<Vec<String>> = store.get(&key).unwrap();
    assert_eq!(value, Some(vec!["a".to_string(), "b".to_string()]));
}
