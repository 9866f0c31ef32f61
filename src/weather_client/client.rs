use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use derivative::Derivative;
use reqwest::{
    Client,
    Url,
};

use crate::domain::WeatherObservation;
use crate::weather_client::response::WeatherResponse;
use crate::weather_client::{
    FetchError,
    WeatherProvider,
};

#[derive(Derivative)]
#[derivative(Debug)]
pub struct WeatherClient {
    http_client: Client,
    base_url: Url,
    units: String,
    #[derivative(Debug = "ignore")]
    api_key: String,
}

impl WeatherClient {
    pub fn new(
        base_url: Url,
        api_key: String,
        units: String,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        Ok(Self {
            http_client: Client::builder()
                .timeout(timeout)
                .build()
                .context(format!(
                    "Error creating weather client with:\nbase_url: {}\nunits: {}\ntimeout: {:?}",
                    base_url, units, timeout
                ))?,
            base_url,
            units,
            api_key,
        })
    }

    fn current_weather_url(&self) -> Result<Url, FetchError> {
        self.base_url
            .join("weather")
            .map_err(|e| FetchError::Unavailable(format!("invalid weather endpoint: {}", e)))
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    #[tracing::instrument(name = "Fetching current weather", skip(self))]
    async fn fetch(&self, location: &str) -> Result<WeatherObservation, FetchError> {
        let response = self
            .http_client
            .get(self.current_weather_url()?)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ProviderError(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(unavailable)?;
        let payload: WeatherResponse = serde_json::from_slice(&body)
            .map_err(|e| FetchError::InvalidPayload(e.to_string()))?;

        Ok(WeatherObservation {
            location: location.to_string(),
            description: payload.into_description(),
        })
    }
}

/// The request url carries the api key, keep it out of the error text.
fn unavailable(error: reqwest::Error) -> FetchError {
    FetchError::Unavailable(error.without_url().to_string())
}
