use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::domain::{
    SkipReason,
    SubscriberId,
};
use crate::push_client::DeliveryError;
use crate::weather_client::FetchError;

/// What happened to one (subscriber, location) pair, or to a whole
/// subscriber when it was skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Skipped(SkipReason),
    FetchFailed(FetchError),
    NotSevere,
    Delivered,
    DeliveryFailed(DeliveryError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairOutcome {
    pub subscriber_id: SubscriberId,
    /// `None` for skipped subscribers: they are reported once, not per location.
    pub location: Option<String>,
    pub outcome: DispatchOutcome,
}

impl PairOutcome {
    pub fn skipped(subscriber_id: SubscriberId, reason: SkipReason) -> Self {
        Self {
            subscriber_id,
            location: None,
            outcome: DispatchOutcome::Skipped(reason),
        }
    }
}

/// Everything recorded during one run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub outcomes: Vec<PairOutcome>,
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Per-kind outcome counts of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub skipped: usize,
    pub fetch_failed: usize,
    pub not_severe: usize,
    pub delivered: usize,
    pub delivery_failed: usize,
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            skipped: 0,
            fetch_failed: 0,
            not_severe: 0,
            delivered: 0,
            delivery_failed: 0,
            cancelled: self.cancelled,
            started_at: self.started_at,
            finished_at: self.finished_at,
        };
        for pair in &self.outcomes {
            match pair.outcome {
                DispatchOutcome::Skipped(_) => summary.skipped += 1,
                DispatchOutcome::FetchFailed(_) => summary.fetch_failed += 1,
                DispatchOutcome::NotSevere => summary.not_severe += 1,
                DispatchOutcome::Delivered => summary.delivered += 1,
                DispatchOutcome::DeliveryFailed(_) => summary.delivery_failed += 1,
            }
        }
        summary
    }
}
