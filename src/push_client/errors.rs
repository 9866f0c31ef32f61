use reqwest::StatusCode;

/// Failure to hand a single message over to the push gateway.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("push gateway is unavailable: {0}")]
    Unavailable(String),
    #[error("push gateway rejected the message with status {0}")]
    GatewayError(StatusCode),
}
