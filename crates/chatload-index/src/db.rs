use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::records::{PackRecord, RequestStatus, RequestStatusRecord};
use crate::schema::init_schema;

/// An append-only, single-writer-serialized store of request and visit
/// lifecycle events for a benchmark run.
///
/// All writes go through `&self` rather than `&mut self`: SQLite itself
/// serializes writers, and callers are expected to funnel writes through a
/// single task the way the workload scheduler does, not to rely on this
/// type for cross-thread mutual exclusion.
pub struct TraceStore {
    conn: Connection,
}

impl TraceStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let store = Self { conn };
        init_schema(&store.conn)?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        init_schema(&store.conn)?;
        Ok(store)
    }

    /// Records the start of a task (one per visit).
    pub fn init_task(&self, task_id: &str, started_at: f64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO tasks (task_id, started_at, finished_at) VALUES (?1, ?2, NULL)
             ON CONFLICT(task_id) DO UPDATE SET started_at = ?2",
            params![task_id, started_at],
        )?;
        Ok(())
    }

    /// Records a request's scheduled offset within its task, before it is
    /// launched.
    pub fn init_request(&self, task_id: &str, req_id: &str, scheduled_offset: f64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO requests (task_id, req_id, scheduled_offset, status)
             VALUES (?1, ?2, ?3, 'pending')
             ON CONFLICT(task_id, req_id) DO UPDATE SET scheduled_offset = ?3",
            params![task_id, req_id, scheduled_offset],
        )?;
        Ok(())
    }

    /// Marks a request as launched (its HTTP call is in flight).
    pub fn mark_running(&self, task_id: &str, req_id: &str, launch_time: f64, start_time: f64) -> Result<()> {
        self.conn.execute(
            "UPDATE requests SET status = 'running', launch_time = ?3, start_time = ?4
             WHERE task_id = ?1 AND req_id = ?2",
            params![task_id, req_id, launch_time, start_time],
        )?;
        Ok(())
    }

    /// Appends a token-arrival pack for a request.
    pub fn log_new_pack(&self, task_id: &str, req_id: &str, received_at: f64, content: Option<&str>) -> Result<()> {
        let next_seq: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(seq), -1) + 1 FROM packs WHERE task_id = ?1 AND req_id = ?2",
            params![task_id, req_id],
            |row| row.get(0),
        )?;
        self.conn.execute(
            "INSERT INTO packs (task_id, req_id, seq, received_at, content) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![task_id, req_id, next_seq, received_at, content],
        )?;
        Ok(())
    }

    pub fn mark_success_for_request(&self, task_id: &str, req_id: &str, end_time: f64) -> Result<()> {
        self.conn.execute(
            "UPDATE requests SET status = 'success', end_time = ?3 WHERE task_id = ?1 AND req_id = ?2",
            params![task_id, req_id, end_time],
        )?;
        Ok(())
    }

    pub fn mark_error_for_request(&self, task_id: &str, req_id: &str, end_time: f64, error_info: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE requests SET status = 'error', end_time = ?3, error_info = ?4
             WHERE task_id = ?1 AND req_id = ?2",
            params![task_id, req_id, end_time, error_info],
        )?;
        Ok(())
    }

    pub fn mark_finish_for_task(&self, task_id: &str, finished_at: f64) -> Result<()> {
        self.conn.execute(
            "UPDATE tasks SET finished_at = ?2 WHERE task_id = ?1",
            params![task_id, finished_at],
        )?;
        Ok(())
    }

    /// Current status of every request initialized so far for `task_id`,
    /// in scheduled order.
    pub fn cur_requests_status_of_task(&self, task_id: &str) -> Result<Vec<RequestStatusRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT req_id, status, scheduled_offset, launch_time, start_time, end_time, error_info
             FROM requests WHERE task_id = ?1 ORDER BY scheduled_offset",
        )?;
        let rows = stmt
            .query_map(params![task_id], |row| {
                let status_str: String = row.get(1)?;
                Ok(RequestStatusRecord {
                    req_id: row.get(0)?,
                    status: RequestStatus::parse(&status_str).unwrap_or(RequestStatus::Pending),
                    scheduled_offset: row.get(2)?,
                    launch_time: row.get(3)?,
                    start_time: row.get(4)?,
                    end_time: row.get(5)?,
                    error_info: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Every pack logged for `task_id` within the trailing `window_seconds`
    /// of wall-clock time, relative to `now`.
    pub fn past_packs_of_task(&self, task_id: &str, now: f64, window_seconds: f64) -> Result<Vec<PackRecord>> {
        let since = now - window_seconds;
        let mut stmt = self.conn.prepare(
            "SELECT req_id, seq, received_at, content FROM packs
             WHERE task_id = ?1 AND received_at >= ?2
             ORDER BY received_at",
        )?;
        let rows = stmt
            .query_map(params![task_id, since], |row| {
                Ok(PackRecord {
                    req_id: row.get(0)?,
                    seq: row.get(1)?,
                    received_at: row.get(2)?,
                    content: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn task_finished_at(&self, task_id: &str) -> Result<Option<f64>> {
        self.conn
            .query_row(
                "SELECT finished_at FROM tasks WHERE task_id = ?1",
                params![task_id],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Error::NotFound(format!("task {task_id}")),
                other => Error::Database(other),
            })
    }
}
