use std::fmt;

#[derive(Debug)]
pub enum Error {
    Load(String),
    Workload(chatload_types::Error),
    Cache(chatload_core::Error),
    InvalidPattern(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Load(msg) => write!(f, "dataset load error: {msg}"),
            Error::Workload(e) => write!(f, "invalid workload: {e}"),
            Error::Cache(e) => write!(f, "cache error: {e}"),
            Error::InvalidPattern(msg) => write!(f, "rejected synthesizer function: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<chatload_types::Error> for Error {
    fn from(e: chatload_types::Error) -> Self {
        Error::Workload(e)
    }
}

impl From<chatload_core::Error> for Error {
    fn from(e: chatload_core::Error) -> Self {
        Error::Cache(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
