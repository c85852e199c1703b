use std::fmt;

/// Why a request to the backend did not produce a usable payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never completed (offline, DNS, CORS, aborted).
    Transport(String),
    /// The backend answered with a non-success status.
    Status(u16),
    /// The body could not be decoded as the expected JSON.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "fetch error: {e}"),
            Self::Status(code) => write!(f, "HTTP {code}"),
            Self::Decode(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl std::error::Error for FetchError {}
