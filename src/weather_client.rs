use async_trait::async_trait;

pub use client::WeatherClient;
pub use errors::FetchError;

use crate::domain::WeatherObservation;

mod client;
mod errors;
mod response;

/// Read side of the external weather service.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<WeatherObservation, FetchError>;
}
