use serde::{Deserialize, Serialize};

/// Lifecycle status of a single request as recorded in the trace store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Running,
    Success,
    Error,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Running => "running",
            RequestStatus::Success => "success",
            RequestStatus::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "running" => Some(Self::Running),
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// A request's current lifecycle record, as returned by
/// [`crate::TraceStore::cur_requests_status_of_task`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestStatusRecord {
    pub req_id: String,
    pub status: RequestStatus,
    pub scheduled_offset: f64,
    pub launch_time: Option<f64>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub error_info: Option<String>,
}

/// A single logged token-arrival pack, as returned by
/// [`crate::TraceStore::past_packs_of_task`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackRecord {
    pub req_id: String,
    pub seq: i64,
    pub received_at: f64,
    pub content: Option<String>,
}
