use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chatload_index::TraceStore;
use chatload_providers::{EndpointAdapter, EndpointClient};
use chatload_types::{Message, ReqResponse, ResPiece, RunConfig, Visit, VisitResponse};
use futures::StreamExt;
use tracing::warn;

use crate::error::Result;
use crate::time::now_secs;

/// Runs a single visit to completion: its requests execute sequentially in
/// this task, each waiting for its scheduled offset (relative to
/// `visit_start_time`) before launching.
///
/// Mirrors the original simulator's per-visit loop: a request that depends
/// on an earlier one (`SimReq::dependent`) reuses that request's generated
/// text verbatim as its own turn; the first request to fail aborts the
/// visit, abandoning any requests still scheduled after it.
pub(crate) async fn run_visit(
    client: &EndpointClient,
    adapter: &dyn EndpointAdapter,
    task_id: &str,
    visit: &Visit,
    visit_start_time: f64,
    config: &RunConfig,
    store: &Arc<Mutex<TraceStore>>,
) -> Result<VisitResponse> {
    let mut history: Vec<Message> = Vec::new();
    let mut ctx: HashMap<String, String> = HashMap::new();
    let mut responses: Vec<ReqResponse> = Vec::new();

    for scheduled in &visit.reqs {
        let req = &scheduled.req;

        let turn_text = match (&req.content, &req.dep_id) {
            (Some(content), _) => content.clone(),
            (None, Some(dep_id)) => ctx.get(dep_id).cloned().unwrap_or_default(),
            (None, None) => String::new(),
        };
        history.push(Message::user(turn_text));
        let dialog = history.clone();

        let scheduled_absolute = visit_start_time + scheduled.scheduled_offset;
        let now = now_secs();
        if scheduled_absolute > now {
            tokio::time::sleep(std::time::Duration::from_secs_f64(scheduled_absolute - now)).await;
        }

        let req_start_time = now_secs();
        let raw_delay = req_start_time - scheduled_absolute;
        let launch_latency = if raw_delay.abs() <= config.time_tolerance { 0.0 } else { raw_delay.max(0.0) };

        {
            let store = store.lock().unwrap();
            store.init_request(task_id, &req.id, scheduled.scheduled_offset)?;
            store.mark_running(task_id, &req.id, launch_latency, req_start_time)?;
        }

        let gen_params = config.overlay_gen_params(&req.gen_params);
        let mut stream = adapter.stream(client.clone(), dialog.clone(), gen_params);

        let mut loggings: Vec<ResPiece> = Vec::new();
        let mut primary_text = String::new();
        let mut error_info: Option<String> = None;

        while let Some(piece) = stream.next().await {
            {
                let store = store.lock().unwrap();
                store.log_new_pack(task_id, &req.id, piece.received_at, piece.content.as_deref())?;
            }
            if piece.is_error() {
                error_info = piece.content.clone();
                loggings.push(piece);
                break;
            }
            if piece.index == 0 {
                if let Some(content) = &piece.content {
                    primary_text.push_str(content);
                }
            }
            loggings.push(piece);
        }

        let end_time = now_secs();
        {
            let store = store.lock().unwrap();
            match &error_info {
                Some(msg) => store.mark_error_for_request(task_id, &req.id, end_time, msg)?,
                None => store.mark_success_for_request(task_id, &req.id, end_time)?,
            }
        }

        let failed = error_info.is_some();
        if !failed {
            ctx.insert(req.id.clone(), primary_text.clone());
            history.push(Message::assistant(primary_text));
        } else {
            warn!(task_id, req_id = %req.id, error = error_info.as_deref().unwrap_or(""), "request failed, abandoning visit");
        }

        responses.push(ReqResponse {
            req_id: req.id.clone(),
            dialog,
            loggings,
            launch_latency,
            start_time: req_start_time,
            end_time,
            error_info,
        });

        if failed {
            break;
        }
    }

    Ok(VisitResponse::new(visit_start_time, responses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatload_providers::BoxStream;
    use chatload_types::{GenParams, ScheduledReq, SimReq};

    struct ScriptedAdapter {
        pieces: Vec<ResPiece>,
    }

    impl EndpointAdapter for ScriptedAdapter {
        fn stream(&self, _client: EndpointClient, _dialog: Vec<Message>, _gen_params: GenParams) -> BoxStream<ResPiece> {
            let pieces = self.pieces.clone();
            Box::pin(futures::stream::iter(pieces))
        }
    }

    fn test_store() -> Arc<Mutex<TraceStore>> {
        Arc::new(Mutex::new(TraceStore::open_in_memory().unwrap()))
    }

    fn test_client() -> EndpointClient {
        EndpointClient::builder("http://localhost:9", "test-model").build().unwrap()
    }

    #[tokio::test]
    async fn successful_visit_chains_dependent_requests() {
        let adapter = ScriptedAdapter { pieces: vec![ResPiece::new(0, Some("hi there".to_string()), now_secs())] };
        let client = test_client();
        let store = test_store();
        let visit = Visit::new(vec![
            ScheduledReq { scheduled_offset: 0.0, req: SimReq::literal("r1", "hello") },
            ScheduledReq { scheduled_offset: 0.01, req: SimReq::dependent("r2", "r1") },
        ]);
        store.lock().unwrap().init_task("t1", now_secs()).unwrap();

        let vr = run_visit(&client, &adapter, "t1", &visit, now_secs(), &RunConfig::default(), &store).await.unwrap();

        assert!(!vr.failed);
        assert_eq!(vr.responses.len(), 2);
        assert_eq!(vr.responses[1].dialog.last().unwrap().content, "hi there");
    }

    #[tokio::test]
    async fn error_piece_aborts_remaining_requests() {
        let adapter = ScriptedAdapter { pieces: vec![ResPiece::error("boom", now_secs())] };
        let client = test_client();
        let store = test_store();
        let visit = Visit::new(vec![
            ScheduledReq { scheduled_offset: 0.0, req: SimReq::literal("r1", "hello") },
            ScheduledReq { scheduled_offset: 0.01, req: SimReq::literal("r2", "world") },
        ]);
        store.lock().unwrap().init_task("t1", now_secs()).unwrap();

        let vr = run_visit(&client, &adapter, "t1", &visit, now_secs(), &RunConfig::default(), &store).await.unwrap();

        assert!(vr.failed);
        assert_eq!(vr.responses.len(), 1);
        assert_eq!(vr.responses[0].error_info.as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn error_piece_is_not_folded_into_primary_text() {
        let adapter = ScriptedAdapter {
            pieces: vec![ResPiece::new(0, Some("partial".to_string()), now_secs()), ResPiece::error("disconnected", now_secs())],
        };
        let client = test_client();
        let store = test_store();
        let visit = Visit::new(vec![ScheduledReq { scheduled_offset: 0.0, req: SimReq::literal("r1", "hello") }]);
        store.lock().unwrap().init_task("t1", now_secs()).unwrap();

        let vr = run_visit(&client, &adapter, "t1", &visit, now_secs(), &RunConfig::default(), &store).await.unwrap();

        assert!(vr.responses[0].error_info.is_some());
        assert_eq!(vr.responses[0].primary_piece_count(), 1);
    }
}
