use reqwest::StatusCode;

/// Failure to obtain an observation for a single location.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    #[error("weather provider is unavailable: {0}")]
    Unavailable(String),
    #[error("weather provider answered with status {0}")]
    ProviderError(StatusCode),
    #[error("weather provider sent an unreadable payload: {0}")]
    InvalidPayload(String),
}
