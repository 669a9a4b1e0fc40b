use std::sync::{Arc, Mutex};

use chatload_engine::run_workload;
use chatload_index::TraceStore;
use chatload_providers::{BoxStream, EndpointAdapter, EndpointClient};
use chatload_types::{
    GenParams, Message, ResPiece, RunConfig, ScheduledReq, ScheduledVisit, SimReq, Visit, Workload,
};

/// Replays a fixed script of pieces regardless of what it's asked to stream,
/// standing in for a real vendor adapter in these scheduler-level tests.
struct ScriptedAdapter {
    pieces: Vec<ResPiece>,
}

impl EndpointAdapter for ScriptedAdapter {
    fn stream(&self, _client: EndpointClient, _dialog: Vec<Message>, _gen_params: GenParams) -> BoxStream<ResPiece> {
        let pieces = self.pieces.clone();
        Box::pin(futures::stream::iter(pieces))
    }
}

fn now() -> f64 {
    std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap().as_secs_f64()
}

#[tokio::test]
async fn a_failing_request_marks_its_visit_failed_without_stopping_the_run() {
    let workload = Workload::new(vec![
        ScheduledVisit {
            start_offset: 0.0,
            visit: Visit::new(vec![ScheduledReq { scheduled_offset: 0.0, req: SimReq::literal("r1", "hi") }]),
        },
        ScheduledVisit {
            start_offset: 0.02,
            visit: Visit::new(vec![ScheduledReq { scheduled_offset: 0.0, req: SimReq::literal("r2", "hi") }]),
        },
    ]);

    let adapter: Arc<dyn EndpointAdapter> = Arc::new(ScriptedAdapter { pieces: vec![ResPiece::error("connection reset", now())] });
    let client = EndpointClient::builder("http://localhost:9", "test-model").build().unwrap();
    let store = Arc::new(Mutex::new(TraceStore::open_in_memory().unwrap()));
    let config = RunConfig { time_step: 0.01, ..RunConfig::default() };

    let responses = run_workload(&workload, client, adapter, store, config).await.unwrap();

    assert_eq!(responses.len(), 2);
    assert!(responses.iter().all(|v| v.failed));
    assert_eq!(responses[0].responses[0].error_info.as_deref(), Some("connection reset"));
}

#[tokio::test]
async fn successful_run_preserves_visit_schedule_order_in_results() {
    let workload = Workload::new(vec![
        ScheduledVisit {
            start_offset: 0.0,
            visit: Visit::new(vec![ScheduledReq { scheduled_offset: 0.0, req: SimReq::literal("a", "hi") }]),
        },
        ScheduledVisit {
            start_offset: 0.03,
            visit: Visit::new(vec![ScheduledReq { scheduled_offset: 0.0, req: SimReq::literal("b", "hi") }]),
        },
        ScheduledVisit {
            start_offset: 0.06,
            visit: Visit::new(vec![ScheduledReq { scheduled_offset: 0.0, req: SimReq::literal("c", "hi") }]),
        },
    ]);

    let adapter: Arc<dyn EndpointAdapter> = Arc::new(ScriptedAdapter { pieces: vec![ResPiece::new(0, Some("ok".to_string()), now())] });
    let client = EndpointClient::builder("http://localhost:9", "test-model").build().unwrap();
    let store = Arc::new(Mutex::new(TraceStore::open_in_memory().unwrap()));
    let config = RunConfig { time_step: 0.01, ..RunConfig::default() };

    let responses = run_workload(&workload, client, adapter, store, config).await.unwrap();

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0].responses[0].req_id, "a");
    assert_eq!(responses[1].responses[0].req_id, "b");
    assert_eq!(responses[2].responses[0].req_id, "c");
}
