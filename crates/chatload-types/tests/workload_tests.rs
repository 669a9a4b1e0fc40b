use chatload_types::{ScheduledReq, ScheduledVisit, SimReq, Visit, Workload};

fn sample_workload() -> Workload {
    Workload::new(vec![ScheduledVisit {
        start_offset: 0.0,
        visit: Visit::new(vec![
            ScheduledReq { scheduled_offset: 0.0, req: SimReq::literal("r1", "hi") },
            ScheduledReq { scheduled_offset: 1.0, req: SimReq::dependent("r2", "r1") },
        ]),
    }])
}

#[test]
fn workload_validates() {
    assert!(sample_workload().validate().is_ok());
}

#[test]
fn workload_serde_round_trip() {
    let wl = sample_workload();
    let json = serde_json::to_string(&wl).expect("serialize");
    let back: Workload = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(wl, back);
}
