//! Custom assertions for run-output validation.

use anyhow::{bail, Result};
use chatload_types::VisitResponse;

/// Asserts every visit in `responses` succeeded.
pub fn assert_all_succeeded(responses: &[VisitResponse]) -> Result<()> {
    for (i, visit) in responses.iter().enumerate() {
        if visit.failed {
            bail!("visit {i} failed unexpectedly");
        }
    }
    Ok(())
}

/// Asserts the fraction of failed visits matches `expected` exactly.
pub fn assert_fail_rate(responses: &[VisitResponse], expected: f64) -> Result<()> {
    if responses.is_empty() {
        bail!("cannot compute a fail rate over zero responses");
    }
    let failed = responses.iter().filter(|v| v.failed).count();
    let actual = failed as f64 / responses.len() as f64;
    if (actual - expected).abs() > 1e-9 {
        bail!("expected fail rate {expected}, got {actual}");
    }
    Ok(())
}

/// Asserts `responses` preserves the original workload's visit order, by
/// request id of each visit's first request.
pub fn assert_preserves_order(responses: &[VisitResponse], expected_first_req_ids: &[&str]) -> Result<()> {
    if responses.len() != expected_first_req_ids.len() {
        bail!("expected {} visits, got {}", expected_first_req_ids.len(), responses.len());
    }
    for (visit, &expected_id) in responses.iter().zip(expected_first_req_ids) {
        let Some(first) = visit.responses.first() else {
            bail!("visit has no responses, expected first request id {expected_id}");
        };
        if first.req_id != expected_id {
            bail!("expected first request id {expected_id}, got {}", first.req_id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatload_types::ReqResponse;

    fn ok_response(req_id: &str) -> ReqResponse {
        ReqResponse {
            req_id: req_id.to_string(),
            dialog: vec![],
            loggings: vec![],
            launch_latency: 0.0,
            start_time: 0.0,
            end_time: 1.0,
            error_info: None,
        }
    }

    #[test]
    fn all_succeeded_passes_on_a_clean_run() {
        let responses = vec![VisitResponse::new(0.0, vec![ok_response("a")])];
        assert!(assert_all_succeeded(&responses).is_ok());
    }

    #[test]
    fn fail_rate_matches_expected_fraction() {
        let failed = ReqResponse { error_info: Some("boom".to_string()), ..ok_response("b") };
        let responses = vec![VisitResponse::new(0.0, vec![ok_response("a")]), VisitResponse::new(0.0, vec![failed])];
        assert!(assert_fail_rate(&responses, 0.5).is_ok());
        assert!(assert_fail_rate(&responses, 0.0).is_err());
    }

    #[test]
    fn order_assertion_checks_first_request_id_per_visit() {
        let responses = vec![VisitResponse::new(0.0, vec![ok_response("a")]), VisitResponse::new(0.0, vec![ok_response("b")])];
        assert!(assert_preserves_order(&responses, &["a", "b"]).is_ok());
        assert!(assert_preserves_order(&responses, &["b", "a"]).is_err());
    }
}
