use serde::{Deserialize, Serialize};

/// Nested min/max/avg/std/95th-percentile summary of a sample set, the
/// shape every per-metric distribution in a report is reduced to for
/// display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub std: f64,
    pub p95: f64,
}

impl Distribution {
    /// Summarizes `values`. Returns all-zero when `values` is empty.
    pub fn from_samples(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self { min: 0.0, max: 0.0, avg: 0.0, std: 0.0, p95: 0.0 };
        }

        let mut sorted: Vec<f64> = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let avg = sorted.iter().sum::<f64>() / sorted.len() as f64;
        let variance = sorted.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / sorted.len() as f64;
        let std = variance.sqrt();
        let p95 = percentile(&sorted, 0.95);

        Self { min, max, avg, std, p95 }
    }
}

/// Nearest-rank percentile over an already-sorted slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (p * (sorted.len() - 1) as f64).round() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

/// Trimmed mean: drops `trim_percent`% of samples from each end of the
/// sorted distribution before averaging, to suppress outliers at the start
/// and end of a run.
pub fn trimmed_mean(values: &[f64], trim_percent: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let trim_count = ((sorted.len() as f64) * (trim_percent / 100.0)).floor() as usize;
    let trimmed = &sorted[trim_count.min(sorted.len())..sorted.len() - trim_count.min(sorted.len())];

    if trimmed.is_empty() {
        sorted.iter().sum::<f64>() / sorted.len() as f64
    } else {
        trimmed.iter().sum::<f64>() / trimmed.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_samples_summarize_to_zero() {
        let d = Distribution::from_samples(&[]);
        assert_eq!(d.min, 0.0);
        assert_eq!(d.max, 0.0);
    }

    #[test]
    fn single_sample_has_zero_std() {
        let d = Distribution::from_samples(&[5.0]);
        assert_eq!(d.min, 5.0);
        assert_eq!(d.max, 5.0);
        assert_eq!(d.avg, 5.0);
        assert_eq!(d.std, 0.0);
    }

    #[test]
    fn computes_min_max_avg() {
        let d = Distribution::from_samples(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(d.min, 1.0);
        assert_eq!(d.max, 5.0);
        assert_eq!(d.avg, 3.0);
    }

    #[test]
    fn trimmed_mean_drops_outliers() {
        let values: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        let trimmed = trimmed_mean(&values, 5.0);
        // drops the bottom/top 5 samples, leaving 6..=95
        let expected: f64 = (6..=95).map(|x| x as f64).sum::<f64>() / 90.0;
        assert!((trimmed - expected).abs() < 1e-9);
    }

    #[test]
    fn trimmed_mean_of_empty_is_zero() {
        assert_eq!(trimmed_mean(&[], 5.0), 0.0);
    }

    #[test]
    fn trimmed_mean_falls_back_to_plain_mean_when_trim_empties_the_set() {
        let values = vec![1.0, 2.0, 3.0];
        let trimmed = trimmed_mean(&values, 50.0);
        assert!(trimmed > 0.0);
    }
}
