use std::fmt;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors an endpoint adapter can surface before or during a streamed
/// request. Transport-level failures encountered mid-stream are instead
/// folded into a single terminal [`chatload_types::ResPiece`] so the visit
/// runner can record them against the request that produced them; this
/// enum covers everything raised before the stream is handed back.
#[derive(Debug)]
pub enum Error {
    /// The HTTP request could not be built or sent at all.
    Network(reqwest::Error),
    /// The server responded with a non-2xx status.
    Http { status: u16, body: String },
    /// The server responded with 429; callers should not retry automatically,
    /// they should let the visit fail and let the caller decide.
    RateLimited { retry_after: Option<Duration> },
    /// The endpoint name does not match any entry in the adapter registry.
    UnknownEndpoint(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Network(err) => write!(f, "network error: {}", err),
            Error::Http { status, body } => write!(f, "HTTP {}: {}", status, body),
            Error::RateLimited { retry_after } => match retry_after {
                Some(d) => write!(f, "rate limited, retry after {:?}", d),
                None => write!(f, "rate limited"),
            },
            Error::UnknownEndpoint(name) => write!(f, "unknown endpoint type: {}", name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Network(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err)
    }
}

/// Maps an HTTP status code to an [`Error`]. 429 is split out as
/// [`Error::RateLimited`] rather than folded into the generic HTTP branch,
/// since a benchmark run needs to attribute throttling separately from a
/// genuine request failure.
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str, retry_after: Option<Duration>) -> Error {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Error::RateLimited { retry_after };
    }
    Error::Http { status: status.as_u16(), body: body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_429_maps_to_rate_limited() {
        let err = map_http_status(reqwest::StatusCode::TOO_MANY_REQUESTS, "slow down", None);
        assert!(matches!(err, Error::RateLimited { .. }));
    }

    #[test]
    fn status_500_maps_to_http() {
        let err = map_http_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "oops", None);
        assert!(matches!(err, Error::Http { status: 500, .. }));
    }

    #[test]
    fn rate_limited_preserves_retry_after() {
        let err = map_http_status(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            "slow down",
            Some(Duration::from_secs(5)),
        );
        match err {
            Error::RateLimited { retry_after } => assert_eq!(retry_after, Some(Duration::from_secs(5))),
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }
}
