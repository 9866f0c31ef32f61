use async_trait::async_trait;

pub use client::PushClient;
pub use errors::DeliveryError;

use crate::domain::NotificationMessage;

mod client;
mod errors;
mod request;

/// Submission side of the external device-messaging service.
#[async_trait]
pub trait PushGateway: Send + Sync {
    async fn send(&self, message: &NotificationMessage) -> Result<(), DeliveryError>;
}
