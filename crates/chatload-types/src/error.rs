use std::fmt;

/// Result type for chatload-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the data model layer
#[derive(Debug)]
pub enum Error {
    /// A visit violated one of its structural invariants
    InvalidVisit(String),
    /// A workload violated one of its structural invariants
    InvalidWorkload(String),
    /// JSON (de)serialization failed
    Json(serde_json::Error),
    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidVisit(msg) => write!(f, "invalid visit: {}", msg),
            Error::InvalidWorkload(msg) => write!(f, "invalid workload: {}", msg),
            Error::Json(err) => write!(f, "json error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::InvalidVisit(_) | Error::InvalidWorkload(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
