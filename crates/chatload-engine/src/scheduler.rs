use std::sync::{Arc, Mutex};
use std::time::Duration;

use chatload_index::TraceStore;
use chatload_providers::{EndpointAdapter, EndpointClient};
use chatload_types::{RunConfig, VisitResponse, Workload};

use crate::error::Result;
use crate::time::now_secs;
use crate::visit_runner::run_visit;

/// Replays `workload` against `client` in real time, launching each visit as
/// a lightweight task on `config.time_step`-spaced poll. A visit launches
/// once the elapsed wall-clock time (adjusted by the idle-skip fast-forward
/// below) reaches its `start_offset` within `config.time_tolerance`, or as
/// soon as possible afterward if the scheduler falls behind.
///
/// When no visit is in flight and the next one is more than
/// `config.skip_idle_min` seconds away, the scheduler fast-forwards past
/// the gap rather than idling in real time for it.
pub async fn run_workload(
    workload: &Workload,
    client: EndpointClient,
    adapter: Arc<dyn EndpointAdapter>,
    store: Arc<Mutex<TraceStore>>,
    config: RunConfig,
) -> Result<Vec<VisitResponse>> {
    workload.validate()?;

    let start_wall = now_secs();
    let mut skip_offset = 0.0f64;
    let mut next_visit_idx = 0usize;
    let n = workload.visits.len();

    let mut in_flight: Vec<(usize, tokio::task::JoinHandle<Result<VisitResponse>>)> = Vec::new();
    let mut finished: Vec<(usize, VisitResponse)> = Vec::new();

    loop {
        let now = now_secs();
        let cur_offset = now - start_wall + skip_offset;

        while next_visit_idx < n {
            let scheduled = &workload.visits[next_visit_idx];
            let diff = cur_offset - scheduled.start_offset;
            if diff <= -config.time_tolerance {
                break;
            }

            let task_id = format!("visit-{next_visit_idx}");
            let visit_start_time = now_secs();
            store.lock().unwrap().init_task(&task_id, visit_start_time)?;

            let visit = scheduled.visit.clone();
            let client = client.clone();
            let adapter = Arc::clone(&adapter);
            let store_for_task = Arc::clone(&store);
            let config_for_task = config.clone();

            let handle = tokio::spawn(async move {
                run_visit(&client, adapter.as_ref(), &task_id, &visit, visit_start_time, &config_for_task, &store_for_task).await
            });
            in_flight.push((next_visit_idx, handle));
            next_visit_idx += 1;
        }

        let mut harvested = 0usize;
        let mut still_running = Vec::new();
        for (idx, handle) in in_flight {
            if harvested < config.check_size && handle.is_finished() {
                let visit_response = handle.await??;
                store.lock().unwrap().mark_finish_for_task(&format!("visit-{idx}"), now_secs())?;
                finished.push((idx, visit_response));
                harvested += 1;
            } else {
                still_running.push((idx, handle));
            }
        }
        in_flight = still_running;

        if next_visit_idx >= n && in_flight.is_empty() {
            break;
        }

        if in_flight.is_empty() && next_visit_idx < n && config.skip_idle_min > 0.0 {
            let next_time = workload.visits[next_visit_idx].start_offset;
            let gap = next_time - cur_offset - 10.0 * config.time_step;
            if gap > config.skip_idle_min {
                skip_offset += gap;
            }
        }

        tokio::time::sleep(Duration::from_secs_f64(config.time_step)).await;
    }

    finished.sort_by_key(|(idx, _)| *idx);
    Ok(finished.into_iter().map(|(_, vr)| vr).collect())
}
