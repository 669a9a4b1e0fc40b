use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Builds a stable cache key for a dataset-normalization call from its
/// namespace (dataset identifier plus operation name) and arguments.
///
/// Unlike keying on a stringified repr of the arguments, this canonicalizes
/// the argument tree first (object keys sorted, recursively) so that two
/// calls with the same logical arguments in different field order, or with
/// different float formatting, hash identically.
pub fn cache_key(namespace: &str, args: &impl Serialize) -> Result<String> {
    let value = serde_json::to_value(args)?;
    let canonical = canonicalize(&value);
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b"\0");
    hasher.update(canonical.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Renders a JSON value into a canonical string form: object keys sorted
/// lexicographically at every depth, with no extraneous whitespace.
fn canonicalize(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let entries: Vec<String> = keys
                .into_iter()
                .map(|k| format!("{}:{}", serde_json::to_string(k).unwrap(), canonicalize(&map[k])))
                .collect();
            format!("{{{}}}", entries.join(","))
        }
        Value::Array(items) => {
            let entries: Vec<String> = items.iter().map(canonicalize).collect();
            format!("[{}]", entries.join(","))
        }
        other => other.to_string(),
    }
}
