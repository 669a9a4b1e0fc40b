use chatload_types::VisitResponse;
use serde::{Deserialize, Serialize};

use crate::summary::Distribution;

/// Visit-level metrics folded over every completed visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitLevelReport {
    pub visit_num: usize,
    pub fail_rate: f64,
    pub requests_per_visit: Distribution,
    pub visit_duration: Distribution,
}

impl VisitLevelReport {
    /// Builds a report from every visit's outcome gathered during a run.
    pub fn generate(visits: &[VisitResponse]) -> Self {
        let visit_num = visits.len();
        let failed = visits.iter().filter(|v| v.failed).count();
        let fail_rate = if visit_num == 0 { 0.0 } else { failed as f64 / visit_num as f64 };

        let requests_per_visit: Vec<f64> = visits.iter().map(|v| v.responses.len() as f64).collect();

        let durations: Vec<f64> = visits
            .iter()
            .filter_map(|v| {
                let last = v.responses.last()?;
                Some(last.end_time - v.visit_start_time)
            })
            .collect();

        Self {
            visit_num,
            fail_rate,
            requests_per_visit: Distribution::from_samples(&requests_per_visit),
            visit_duration: Distribution::from_samples(&durations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatload_types::ReqResponse;

    fn req(start: f64, end: f64, error: Option<&str>) -> ReqResponse {
        ReqResponse {
            req_id: "r1".to_string(),
            dialog: vec![],
            loggings: vec![],
            launch_latency: 0.0,
            start_time: start,
            end_time: end,
            error_info: error.map(str::to_string),
        }
    }

    #[test]
    fn empty_visits_yield_zero_report() {
        let report = VisitLevelReport::generate(&[]);
        assert_eq!(report.visit_num, 0);
        assert_eq!(report.fail_rate, 0.0);
    }

    #[test]
    fn fail_rate_counts_failed_visits() {
        let visits = vec![
            VisitResponse::new(0.0, vec![req(0.0, 1.0, None)]),
            VisitResponse::new(0.0, vec![req(0.0, 1.0, Some("boom"))]),
        ];
        let report = VisitLevelReport::generate(&visits);
        assert!((report.fail_rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn visit_duration_measured_from_start_to_last_response() {
        let visits = vec![VisitResponse::new(5.0, vec![req(5.0, 8.0, None)])];
        let report = VisitLevelReport::generate(&visits);
        assert_eq!(report.visit_duration.avg, 3.0);
    }
}
