use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Error type for SDK operations: a thin union over the errors its
/// constituent crates can raise, plus I/O failures reading or writing
/// workload/response files.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Json(serde_json::Error),
    Dataset(chatload_datasets::Error),
    Provider(chatload_providers::Error),
    Engine(chatload_engine::Error),
    Index(chatload_index::Error),
    Workload(chatload_types::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Json(e) => write!(f, "JSON error: {e}"),
            Error::Dataset(e) => write!(f, "dataset error: {e}"),
            Error::Provider(e) => write!(f, "provider error: {e}"),
            Error::Engine(e) => write!(f, "engine error: {e}"),
            Error::Index(e) => write!(f, "index error: {e}"),
            Error::Workload(e) => write!(f, "workload error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Dataset(e) => Some(e),
            Error::Provider(e) => Some(e),
            Error::Engine(e) => Some(e),
            Error::Index(e) => Some(e),
            Error::Workload(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<chatload_datasets::Error> for Error {
    fn from(e: chatload_datasets::Error) -> Self {
        Error::Dataset(e)
    }
}

impl From<chatload_providers::Error> for Error {
    fn from(e: chatload_providers::Error) -> Self {
        Error::Provider(e)
    }
}

impl From<chatload_engine::Error> for Error {
    fn from(e: chatload_engine::Error) -> Self {
        Error::Engine(e)
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
