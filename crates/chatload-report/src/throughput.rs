use crate::summary::trimmed_mean;

/// Default sliding-window width, in seconds.
pub const DEFAULT_WINDOW_SECONDS: f64 = 5.0;
/// Default sliding-window step, in seconds.
pub const DEFAULT_STEP_SECONDS: f64 = 0.5;
/// Default trim applied by [`stable_average_throughput`], in percent.
pub const DEFAULT_TRIM_PERCENT: f64 = 5.0;

/// Computes the tokens/sec series over `token_timestamps` (already sorted by
/// timestamp) using a sliding window of width `window_seconds`, sampled every
/// `step_seconds`. For each sample time `t_i`, sums the token counts whose
/// timestamps fall in `[t_i - W/2, t_i + W/2)` via binary search over the
/// sorted timestamps, then divides by `W`.
///
/// Returns an empty series when `token_timestamps` is empty.
pub fn sliding_window_throughput(
    token_timestamps: &[(f64, u64)],
    window_seconds: f64,
    step_seconds: f64,
) -> Vec<f64> {
    if token_timestamps.is_empty() {
        return Vec::new();
    }

    let timestamps: Vec<f64> = token_timestamps.iter().map(|(t, _)| *t).collect();
    let mut prefix_tokens = vec![0u64; token_timestamps.len() + 1];
    for (i, (_, count)) in token_timestamps.iter().enumerate() {
        prefix_tokens[i + 1] = prefix_tokens[i] + count;
    }

    let t0 = timestamps[0];
    let t_last = timestamps[timestamps.len() - 1];
    let half_window = window_seconds / 2.0;

    let mut series = Vec::new();
    let mut t = t0;
    while t <= t_last + half_window {
        let lo = partition_point(&timestamps, t - half_window);
        let hi = partition_point(&timestamps, t + half_window);
        let tokens_in_window = prefix_tokens[hi] - prefix_tokens[lo];
        series.push(tokens_in_window as f64 / window_seconds);
        t += step_seconds;
    }
    series
}

/// Index of the first element `>= target` (i.e. `lower_bound`).
fn partition_point(sorted: &[f64], target: f64) -> usize {
    sorted.partition_point(|&x| x < target)
}

/// Peak of the sliding-window throughput series.
pub fn peak_throughput(series: &[f64]) -> f64 {
    series.iter().cloned().fold(0.0, f64::max)
}

/// Mean of the series after trimming `trim_percent`% from each end, to
/// suppress the ramp-up/ramp-down tails of a run.
pub fn stable_average_throughput(series: &[f64], trim_percent: f64) -> f64 {
    trimmed_mean(series, trim_percent)
}
