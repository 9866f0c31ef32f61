use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::stream::{
    self,
    Stream,
    StreamExt,
};
use tokio::time::timeout;
use tracing_futures::Instrument;

use crate::directory::{
    DirectoryError,
    SubscriberDirectory,
};
use crate::dispatcher::{
    DispatchOutcome,
    PairOutcome,
    RunReport,
};
use crate::domain::{
    compose,
    DeviceToken,
    EligibleSubscriber,
    NotificationMessage,
    SeverityClassifier,
    SubscriberId,
    WeatherObservation,
};
use crate::push_client::{
    DeliveryError,
    PushGateway,
};
use crate::weather_client::{
    FetchError,
    WeatherProvider,
};

/// A run that could not evaluate anyone.
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error("subscriber directory could not be read: {0}")]
    DirectoryUnavailable(#[from] DirectoryError),
}

#[derive(Clone, Copy, Debug)]
pub struct DispatchLimits {
    /// Subscribers processed at the same time. Each one has at most one
    /// external call in flight.
    pub max_concurrent_subscribers: usize,
    pub fetch_timeout: Duration,
    pub delivery_timeout: Duration,
}

impl Default for DispatchLimits {
    fn default() -> Self {
        Self {
            max_concurrent_subscribers: 8,
            fetch_timeout: Duration::from_secs(10),
            delivery_timeout: Duration::from_secs(10),
        }
    }
}

/// Sweeps the subscriber directory and pushes an alert for every watched
/// location currently under severe weather.
///
/// Holds no state between runs: two runs over the same directory and the
/// same provider answers produce the same outcomes, and send the same
/// notifications twice.
pub struct Dispatcher {
    directory: Arc<dyn SubscriberDirectory>,
    weather: Arc<dyn WeatherProvider>,
    push: Arc<dyn PushGateway>,
    classifier: SeverityClassifier,
    limits: DispatchLimits,
}

impl Dispatcher {
    pub fn new(
        directory: Arc<dyn SubscriberDirectory>,
        weather: Arc<dyn WeatherProvider>,
        push: Arc<dyn PushGateway>,
        classifier: SeverityClassifier,
        limits: DispatchLimits,
    ) -> Self {
        Self {
            directory,
            weather,
            push,
            classifier,
            limits: DispatchLimits {
                max_concurrent_subscribers: limits.max_concurrent_subscribers.max(1),
                ..limits
            },
        }
    }

    pub async fn run_once(&self) -> Result<RunReport, RunError> {
        self.run_until(futures::future::pending()).await
    }

    /// Like [`Dispatcher::run_once`], but stops as soon as `shutdown` resolves.
    ///
    /// Pairs still in flight at that point are dropped and do not appear in
    /// the report; everything recorded before is kept.
    #[tracing::instrument(name = "Dispatching severe weather alerts", skip(self, shutdown))]
    pub async fn run_until<F>(&self, shutdown: F) -> Result<RunReport, RunError>
    where
        F: Future<Output = ()>,
    {
        let started_at = Utc::now();
        let subscribers = self.directory.list_subscribers().await.map_err(|e| {
            tracing::error!("Aborting run, subscriber directory is unreadable: {}", e);
            e
        })?;

        let mut outcomes = Vec::new();
        let mut eligible = Vec::new();
        for subscriber in subscribers {
            let subscriber_id = subscriber.id;
            match subscriber.eligibility() {
                Ok(subscriber) => eligible.push(subscriber),
                Err(reason) => {
                    tracing::debug!(%subscriber_id, %reason, "Skipping subscriber");
                    outcomes.push(PairOutcome::skipped(subscriber_id, reason));
                }
            }
        }

        let pairs = stream::iter(eligible)
            .map(|subscriber| Box::pin(self.dispatch_subscriber(subscriber)))
            .flatten_unordered(self.limits.max_concurrent_subscribers);
        tokio::pin!(pairs);
        tokio::pin!(shutdown);

        let mut cancelled = false;
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::warn!("Shutdown requested, abandoning pairs still in flight");
                    cancelled = true;
                    break;
                }
                pair = pairs.next() => match pair {
                    Some(pair) => outcomes.push(pair),
                    None => break,
                },
            }
        }

        let report = RunReport {
            outcomes,
            cancelled,
            started_at,
            finished_at: Utc::now(),
        };
        let summary = report.summary();
        tracing::info!(
            skipped = summary.skipped,
            fetch_failed = summary.fetch_failed,
            not_severe = summary.not_severe,
            delivered = summary.delivered,
            delivery_failed = summary.delivery_failed,
            cancelled = summary.cancelled,
            "Run completed"
        );
        Ok(report)
    }

    /// The watched locations of one subscriber, dispatched in order.
    fn dispatch_subscriber(
        &self,
        subscriber: EligibleSubscriber,
    ) -> impl Stream<Item = PairOutcome> + '_ {
        let EligibleSubscriber {
            id,
            device_token,
            watched_locations,
        } = subscriber;
        let span = tracing::info_span!("Dispatching to subscriber", subscriber_id = %id);
        stream::iter(watched_locations)
            .then(move |location| {
                let device_token = device_token.clone();
                async move {
                    let outcome = self.dispatch_pair(id, device_token, &location).await;
                    PairOutcome {
                        subscriber_id: id,
                        location: Some(location),
                        outcome,
                    }
                }
            })
            .instrument(span)
    }

    #[tracing::instrument(name = "Dispatching location", skip(self, device_token))]
    async fn dispatch_pair(
        &self,
        subscriber_id: SubscriberId,
        device_token: DeviceToken,
        location: &str,
    ) -> DispatchOutcome {
        let observation = match self.fetch(location).await {
            Ok(observation) => observation,
            Err(e) => {
                tracing::warn!("Error fetching weather: {}", e);
                return DispatchOutcome::FetchFailed(e);
            }
        };

        if !self.classifier.classify(&observation.description) {
            return DispatchOutcome::NotSevere;
        }

        let message = compose(device_token, location, &observation);
        match self.deliver(&message).await {
            Ok(()) => {
                tracing::info!(description = %observation.description, "Severe weather alert sent");
                DispatchOutcome::Delivered
            }
            Err(e) => {
                tracing::warn!("Error sending severe weather alert: {}", e);
                DispatchOutcome::DeliveryFailed(e)
            }
        }
    }

    async fn fetch(&self, location: &str) -> Result<WeatherObservation, FetchError> {
        let fetch_timeout = self.limits.fetch_timeout;
        timeout(fetch_timeout, self.weather.fetch(location))
            .await
            .unwrap_or_else(|_| {
                Err(FetchError::Unavailable(format!(
                    "no answer within {:?}",
                    fetch_timeout
                )))
            })
    }

    async fn deliver(&self, message: &NotificationMessage) -> Result<(), DeliveryError> {
        let delivery_timeout = self.limits.delivery_timeout;
        timeout(delivery_timeout, self.push.send(message))
            .await
            .unwrap_or_else(|_| {
                Err(DeliveryError::Unavailable(format!(
                    "no answer within {:?}",
                    delivery_timeout
                )))
            })
    }
}
