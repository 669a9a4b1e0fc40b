use rusqlite::Connection;

use crate::Result;

// Schema version; bump when changing table definitions.
pub const SCHEMA_VERSION: i32 = 1;

// NOTE: schema-on-write, single-writer-serialized. The trace store records
// request/visit lifecycle events as they happen during a run; it is read
// back by the report generator once the run finishes, and by
// `cur_requests_status_of_task`/`past_packs_of_task` while a run is live.

pub fn init_schema(conn: &Connection) -> Result<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version != SCHEMA_VERSION {
        drop_all_tables(conn)?;
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            task_id TEXT PRIMARY KEY,
            started_at REAL,
            finished_at REAL
        );

        CREATE TABLE IF NOT EXISTS requests (
            task_id TEXT NOT NULL,
            req_id TEXT NOT NULL,
            scheduled_offset REAL NOT NULL,
            launch_time REAL,
            start_time REAL,
            end_time REAL,
            status TEXT NOT NULL DEFAULT 'pending',
            error_info TEXT,
            PRIMARY KEY (task_id, req_id),
            FOREIGN KEY (task_id) REFERENCES tasks(task_id)
        );

        CREATE TABLE IF NOT EXISTS packs (
            task_id TEXT NOT NULL,
            req_id TEXT NOT NULL,
            seq INTEGER NOT NULL,
            received_at REAL NOT NULL,
            content TEXT,
            PRIMARY KEY (task_id, req_id, seq),
            FOREIGN KEY (task_id, req_id) REFERENCES requests(task_id, req_id)
        );

        CREATE INDEX IF NOT EXISTS idx_requests_task ON requests(task_id);
        CREATE INDEX IF NOT EXISTS idx_packs_task_time ON packs(task_id, received_at);
        "#,
    )?;

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

    Ok(())
}

fn drop_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS packs;
        DROP TABLE IF EXISTS requests;
        DROP TABLE IF EXISTS tasks;
        "#,
    )?;
    Ok(())
}
