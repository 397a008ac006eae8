//! Rasp client error types.

/// Errors from the Rasp HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum RaspError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Requested object does not exist (unknown station or carrier code)
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limited by the API
    #[error("rate limited by Rasp API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized: check RASP_API_KEY")]
    Unauthorized,
}

/// Coarse classification of a failure, for deciding what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The network is unreachable or the request timed out.
    NoInternet,
    /// The server answered, but not with something usable.
    Server,
}

impl ErrorKind {
    /// Stable machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NoInternet => "no_internet",
            ErrorKind::Server => "server_error",
        }
    }
}

impl RaspError {
    /// Classify this error as a connectivity or a server problem.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RaspError::Http(e) if e.is_connect() || e.is_timeout() => ErrorKind::NoInternet,
            _ => ErrorKind::Server,
        }
    }
}
