use chatload_types::ReqResponse;
use serde::{Deserialize, Serialize};

use crate::summary::Distribution;
use crate::throughput::{
    sliding_window_throughput, stable_average_throughput, DEFAULT_STEP_SECONDS, DEFAULT_TRIM_PERCENT,
    DEFAULT_WINDOW_SECONDS,
};
use crate::tokenizer::Tokenizer;

/// Request-level metrics folded over every response produced by a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLevelReport {
    pub request_num: usize,
    pub fail_rate: f64,
    pub slo: f64,
    pub ttft: Distribution,
    pub latency: Distribution,
    pub tpot: Distribution,
    pub token_per_request: Distribution,
    pub throughput_peak: f64,
    pub throughput_stable: f64,
    pub total_duration: f64,
    pub rps: f64,
    pub tokenizer_name: String,
}

/// Tunable knobs for [`RequestLevelReport::generate`], defaulting to the
/// values the sliding-window throughput calculation uses elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct ReportConfig {
    pub throughput_window_seconds: f64,
    pub throughput_step_seconds: f64,
    pub trim_percent: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            throughput_window_seconds: DEFAULT_WINDOW_SECONDS,
            throughput_step_seconds: DEFAULT_STEP_SECONDS,
            trim_percent: DEFAULT_TRIM_PERCENT,
        }
    }
}

impl RequestLevelReport {
    /// Builds a report from every request response gathered during a run.
    ///
    /// Panics if `responses` is empty or contains no successful response —
    /// there is nothing meaningful to report on a run that produced zero
    /// completed requests.
    pub fn generate(responses: &[ReqResponse], tokenizer: &dyn Tokenizer, config: ReportConfig) -> Self {
        assert!(!responses.is_empty(), "cannot generate a report from zero responses");
        let successes: Vec<&ReqResponse> = responses.iter().filter(|r| r.is_success()).collect();
        assert!(!successes.is_empty(), "cannot generate a report with zero successful responses");

        let request_num = responses.len();
        let fail_rate = 1.0 - (successes.len() as f64 / request_num as f64);
        let slo = responses.iter().filter(|r| r.launch_latency == 0.0).count() as f64 / request_num as f64;

        let ttft_samples: Vec<f64> = successes.iter().filter_map(|r| r.ttft()).collect();
        let latency_samples: Vec<f64> = successes.iter().map(|r| r.latency()).collect();

        let token_counts: Vec<usize> = successes
            .iter()
            .map(|r| {
                r.loggings
                    .iter()
                    .filter(|p| p.index == 0)
                    .filter_map(|p| p.content.as_deref())
                    .map(|c| tokenizer.count_tokens(c))
                    .sum()
            })
            .collect();

        let tpot_samples: Vec<f64> = successes
            .iter()
            .zip(&token_counts)
            .map(|(r, &tokens)| if tokens == 0 { 0.0 } else { r.latency() / tokens as f64 })
            .collect();

        let token_per_request_samples: Vec<f64> = token_counts.iter().map(|&c| c as f64).collect();

        let mut token_timestamps: Vec<(f64, u64)> = successes
            .iter()
            .flat_map(|r| r.loggings.iter().filter(|p| p.index == 0 && p.content.is_some()))
            .map(|p| (p.received_at, 1u64))
            .collect();
        token_timestamps.sort_by(|a, b| a.0.total_cmp(&b.0));

        let series = sliding_window_throughput(
            &token_timestamps,
            config.throughput_window_seconds,
            config.throughput_step_seconds,
        );
        let throughput_peak = series.iter().cloned().fold(0.0, f64::max);
        let throughput_stable = stable_average_throughput(&series, config.trim_percent);

        let start = responses.iter().map(|r| r.start_time).fold(f64::INFINITY, f64::min);
        let end = responses.iter().map(|r| r.end_time).fold(f64::NEG_INFINITY, f64::max);
        let total_duration = (end - start).max(0.0);
        let rps = if total_duration > 0.0 { request_num as f64 / total_duration } else { 0.0 };

        Self {
            request_num,
            fail_rate,
            slo,
            ttft: Distribution::from_samples(&ttft_samples),
            latency: Distribution::from_samples(&latency_samples),
            tpot: Distribution::from_samples(&tpot_samples),
            token_per_request: Distribution::from_samples(&token_per_request_samples),
            throughput_peak,
            throughput_stable,
            total_duration,
            rps,
            tokenizer_name: tokenizer.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatload_types::ResPiece;
    use crate::tokenizer::WhitespaceTokenizer;

    fn success(id: &str, start: f64, end: f64, text: &str, launch_latency: f64) -> ReqResponse {
        ReqResponse {
            req_id: id.to_string(),
            dialog: vec![],
            loggings: vec![ResPiece::new(0, Some(text.to_string()), start + 0.1)],
            launch_latency,
            start_time: start,
            end_time: end,
            error_info: None,
        }
    }

    fn failure(id: &str, start: f64, end: f64) -> ReqResponse {
        ReqResponse {
            req_id: id.to_string(),
            dialog: vec![],
            loggings: vec![],
            launch_latency: 0.0,
            start_time: start,
            end_time: end,
            error_info: Some("boom".to_string()),
        }
    }

    #[test]
    fn fail_rate_reflects_mixed_outcomes() {
        let responses = vec![success("r1", 0.0, 1.0, "hello world", 0.0), failure("r2", 1.0, 1.5)];
        let report = RequestLevelReport::generate(&responses, &WhitespaceTokenizer, ReportConfig::default());
        assert_eq!(report.request_num, 2);
        assert!((report.fail_rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn slo_counts_on_time_launches() {
        let responses = vec![
            success("r1", 0.0, 1.0, "hi", 0.0),
            success("r2", 1.0, 2.0, "hi", 0.2),
        ];
        let report = RequestLevelReport::generate(&responses, &WhitespaceTokenizer, ReportConfig::default());
        assert!((report.slo - 0.5).abs() < 1e-9);
    }

    #[test]
    fn tpot_is_zero_when_no_tokens() {
        let responses = vec![success("r1", 0.0, 1.0, "", 0.0)];
        let report = RequestLevelReport::generate(&responses, &WhitespaceTokenizer, ReportConfig::default());
        assert_eq!(report.tpot.max, 0.0);
    }

    #[test]
    #[should_panic]
    fn panics_on_empty_responses() {
        RequestLevelReport::generate(&[], &WhitespaceTokenizer, ReportConfig::default());
    }

    #[test]
    #[should_panic]
    fn panics_when_every_response_failed() {
        let responses = vec![failure("r1", 0.0, 1.0)];
        RequestLevelReport::generate(&responses, &WhitespaceTokenizer, ReportConfig::default());
    }
}
