use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::piece::ResPiece;

/// The outcome of a single simulated request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReqResponse {
    pub req_id: String,
    /// The dialog sent to the endpoint, plus the assistant turn produced by
    /// this request if one was produced.
    pub dialog: Vec<Message>,
    /// Every piece received from the endpoint adapter, in arrival order.
    pub loggings: Vec<ResPiece>,
    /// `max(0, actual_start - scheduled_start)`, computed by the visit
    /// runner at launch time; forced to 0 when the request started within
    /// `TIME_TOLERANCE` of its scheduled offset (see [`chatload_types::RunConfig`]).
    pub launch_latency: f64,
    /// When the request actually launched.
    pub start_time: f64,
    pub end_time: f64,
    pub error_info: Option<String>,
}

impl ReqResponse {
    pub fn is_success(&self) -> bool {
        self.error_info.is_none()
    }

    /// Time to first token: gap between request start and the first logged
    /// piece carrying content, or `None` if none arrived.
    pub fn ttft(&self) -> Option<f64> {
        self.loggings
            .iter()
            .find(|p| p.content.is_some() && !p.is_error())
            .map(|p| p.received_at - self.start_time)
    }

    pub fn latency(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Number of primary-channel (`index == 0`) content pieces, used as a
    /// proxy token count when no tokenizer is supplied.
    pub fn primary_piece_count(&self) -> usize {
        self.loggings
            .iter()
            .filter(|p| p.index == 0 && p.content.is_some())
            .count()
    }
}

/// The outcome of a single visit: every request's response, in schedule order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitResponse {
    pub visit_start_time: f64,
    pub responses: Vec<ReqResponse>,
    pub failed: bool,
}

impl VisitResponse {
    /// Builds a `VisitResponse` from the responses gathered so far, deriving
    /// `failed` from whether the last response carries an error — matching
    /// the run semantics where a visit aborts its remaining requests on the
    /// first failure.
    pub fn new(visit_start_time: f64, responses: Vec<ReqResponse>) -> Self {
        let failed = responses.last().is_some_and(|r| !r.is_success());
        Self { visit_start_time, responses, failed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(launch_latency: f64, start: f64, error: Option<&str>) -> ReqResponse {
        ReqResponse {
            req_id: "r1".to_string(),
            dialog: vec![],
            loggings: vec![],
            launch_latency,
            start_time: start,
            end_time: start + 1.0,
            error_info: error.map(str::to_string),
        }
    }

    #[test]
    fn visit_response_fails_when_last_response_errors() {
        let vr = VisitResponse::new(0.0, vec![req(0.0, 0.0, None), req(0.0, 1.0, Some("boom"))]);
        assert!(vr.failed);
    }

    #[test]
    fn visit_response_succeeds_when_last_response_ok() {
        let vr = VisitResponse::new(0.0, vec![req(0.0, 0.0, Some("boom")), req(0.0, 1.0, None)]);
        assert!(!vr.failed);
    }
}
