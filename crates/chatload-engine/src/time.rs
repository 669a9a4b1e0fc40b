use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time, in fractional seconds since the Unix epoch.
/// Matches `chatload_providers`'s own clock so request timestamps and
/// scheduler timestamps are directly comparable.
pub(crate) fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_secs_f64()
}
