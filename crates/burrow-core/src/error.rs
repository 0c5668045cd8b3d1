use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid link id: {0}")]
    InvalidLinkId(String),
}

/// Errors reported by link store backends.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("link id already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors surfaced to callers of the shortener.
///
/// Id collisions never appear here: they are absorbed by the create retry
/// loop. `StoreUnavailable` carries backend detail for logging only and must
/// not be echoed to a requester.
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("link not found")]
    NotFound,
    #[error("link store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        Self::StoreUnavailable(value.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum CaptchaError {
    #[error("captcha verifier unavailable: {0}")]
    Unavailable(String),
    #[error("captcha verifier returned an invalid response: {0}")]
    InvalidResponse(String),
}
