use chatload_sdk::{generate_report, load_workload, save_workload};
use chatload_types::{ScheduledReq, ScheduledVisit, SimReq, Visit, VisitResponse, ReqResponse, ResPiece};
use tempfile::TempDir;

#[test]
fn workload_saved_to_disk_reloads_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wl.json");
    let workload = chatload_types::Workload::new(vec![ScheduledVisit {
        start_offset: 0.0,
        visit: Visit::new(vec![ScheduledReq { scheduled_offset: 0.0, req: SimReq::literal("r1", "hello") }]),
    }]);

    save_workload(&path, &workload).unwrap();
    let loaded = load_workload(&path).unwrap();
    assert_eq!(workload, loaded);
}

#[test]
fn report_generation_reflects_a_mixed_outcome_run() {
    let ok = ReqResponse {
        req_id: "a".to_string(),
        dialog: vec![],
        loggings: vec![ResPiece::new(0, Some("a reply".to_string()), 1.0)],
        launch_latency: 0.0,
        start_time: 0.0,
        end_time: 1.0,
        error_info: None,
    };
    let failed = ReqResponse {
        req_id: "b".to_string(),
        dialog: vec![],
        loggings: vec![],
        launch_latency: 0.0,
        start_time: 0.0,
        end_time: 0.5,
        error_info: Some("timeout".to_string()),
    };

    let visits = vec![VisitResponse::new(0.0, vec![ok]), VisitResponse::new(0.0, vec![failed])];
    let report = generate_report(&visits);

    assert_eq!(report.request_level.request_num, 2);
    assert!((report.request_level.fail_rate - 0.5).abs() < 1e-9);
    assert!((report.visit_level.fail_rate - 0.5).abs() < 1e-9);
}
