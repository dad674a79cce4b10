use std::time::Duration;

/// Failure of a single call to the generation service.
///
/// Never fatal for the run: the engine turns it into a
/// [`TierFailure`](crate::core::TierFailure) on the affected record.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("service returned an empty response")]
    EmptyResponse,
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl GenerationError {
    /// Whether repeating the same request may succeed.
    ///
    /// Client errors other than rate limiting are permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationError::Status { status, .. } => *status == 429 || *status >= 500,
            GenerationError::Http(_)
            | GenerationError::EmptyResponse
            | GenerationError::Timeout(_) => true,
            GenerationError::Decode(_) => false,
        }
    }
}
