use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors the scheduler or visit runner can surface. Per-request failures
/// (a bad HTTP status, a dropped stream) never reach here — they're
/// recorded as `error_info` on the affected [`chatload_types::ReqResponse`]
/// instead, since one failing request shouldn't abort the whole run.
#[derive(Debug)]
pub enum Error {
    Provider(chatload_providers::Error),
    Index(chatload_index::Error),
    Workload(chatload_types::Error),
    /// A visit's cooperative task panicked or was cancelled.
    Task(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Provider(e) => write!(f, "provider error: {e}"),
            Error::Index(e) => write!(f, "index error: {e}"),
            Error::Workload(e) => write!(f, "workload error: {e}"),
            Error::Task(msg) => write!(f, "visit task failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Provider(e) => Some(e),
            Error::Index(e) => Some(e),
            Error::Workload(e) => Some(e),
            Error::Task(_) => None,
        }
    }
}

impl From<chatload_providers::Error> for Error {
    fn from(e: chatload_providers::Error) -> Self {
        Error::Provider(e)
    }
}

impl From<chatload_index::Error> for Error {
    fn from(e: chatload_index::Error) -> Self {
        Error::Index(e)
    }
}

impl From<chatload_types::Error> for Error {
    fn from(e: chatload_types::Error) -> Self {
        Error::Workload(e)
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::Task(e.to_string())
    }
}
