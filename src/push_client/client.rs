use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use derivative::Derivative;
use reqwest::{
    Client,
    Url,
};

use crate::domain::NotificationMessage;
use crate::push_client::request::PushRequest;
use crate::push_client::{
    DeliveryError,
    PushGateway,
};

#[derive(Derivative)]
#[derivative(Debug)]
pub struct PushClient {
    http_client: Client,
    base_url: Url,
    project_id: String,
    #[derivative(Debug = "ignore")]
    token: String,
}

impl PushClient {
    pub fn new(
        base_url: Url,
        project_id: String,
        token: String,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        Ok(Self {
            http_client: Client::builder()
                .timeout(timeout)
                .build()
                .context(format!(
                    "Error creating push client with:\nbase_url: {}\nproject_id: {}\ntimeout: {:?}",
                    base_url, project_id, timeout
                ))?,
            base_url,
            project_id,
            token,
        })
    }

    fn send_url(&self) -> Result<Url, DeliveryError> {
        self.base_url
            .join(&format!("v1/projects/{}/messages:send", self.project_id))
            .map_err(|e| DeliveryError::Unavailable(format!("invalid push endpoint: {}", e)))
    }
}

#[async_trait]
impl PushGateway for PushClient {
    #[tracing::instrument(
        name = "Submitting push notification",
        skip(self, message),
        fields(title = %message.title)
    )]
    async fn send(&self, message: &NotificationMessage) -> Result<(), DeliveryError> {
        let response = self
            .http_client
            .post(self.send_url()?)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.token)
            .json(&PushRequest::new(
                message.device_token.as_ref(),
                &message.title,
                &message.body,
            ))
            .send()
            .await
            .map_err(|e| DeliveryError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::GatewayError(status));
        }
        Ok(())
    }
}
