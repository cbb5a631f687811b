use thiserror::Error;

/// Failure of a single call against the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("movie {id} not found")]
    NotFound { id: u64 },

    #[error("upstream returned HTTP {code}")]
    Status { code: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("search query is empty")]
    EmptyQuery,

    #[error("invalid access token: {0}")]
    InvalidToken(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::MalformedResponse(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Rejected page change; nothing is sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("no search query to page through")]
    NoQuery,

    #[error("page {requested} is outside 1..={total}")]
    OutOfRange { requested: u32, total: u32 },
}
