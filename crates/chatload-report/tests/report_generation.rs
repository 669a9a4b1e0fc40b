use chatload_report::{RequestLevelReport, ReportConfig, VisitLevelReport, WhitespaceTokenizer};
use chatload_types::{ReqResponse, ResPiece, VisitResponse};

fn ok_response(id: &str, start: f64, end: f64, text: &str) -> ReqResponse {
    ReqResponse {
        req_id: id.to_string(),
        dialog: vec![],
        loggings: vec![ResPiece::new(0, Some(text.to_string()), start + 0.05)],
        launch_latency: 0.0,
        start_time: start,
        end_time: end,
        error_info: None,
    }
}

#[test]
fn request_and_visit_reports_agree_on_a_small_run() {
    let responses = vec![
        ok_response("r1", 0.0, 1.0, "one two three"),
        ok_response("r2", 1.0, 2.5, "four five"),
    ];
    let visits = vec![VisitResponse::new(0.0, responses.clone())];

    let request_report = RequestLevelReport::generate(&responses, &WhitespaceTokenizer, ReportConfig::default());
    assert_eq!(request_report.request_num, 2);
    assert_eq!(request_report.fail_rate, 0.0);
    assert_eq!(request_report.slo, 1.0);
    assert_eq!(request_report.tokenizer_name, "whitespace");

    let visit_report = VisitLevelReport::generate(&visits);
    assert_eq!(visit_report.visit_num, 1);
    assert_eq!(visit_report.fail_rate, 0.0);
}
