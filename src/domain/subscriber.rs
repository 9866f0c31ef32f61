use std::convert::TryFrom;
use std::fmt;

use uuid::Uuid;

use crate::domain::DeviceToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(pub Uuid);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A user record as stored in the subscriber directory.
#[derive(Clone, Debug)]
pub struct SubscriberRecord {
    pub id: SubscriberId,
    pub notifications_enabled: bool,
    pub watched_locations: Vec<String>,
    pub device_token: Option<String>,
}

/// Why a subscriber was left out of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NotificationsDisabled,
    MissingDeviceToken,
    NoWatchedLocations,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::NotificationsDisabled => "notifications disabled",
            SkipReason::MissingDeviceToken => "missing device token",
            SkipReason::NoWatchedLocations => "no watched locations",
        };
        f.write_str(reason)
    }
}

/// A subscriber that passed the eligibility check and can be dispatched to.
#[derive(Clone, Debug)]
pub struct EligibleSubscriber {
    pub id: SubscriberId,
    pub device_token: DeviceToken,
    pub watched_locations: Vec<String>,
}

impl SubscriberRecord {
    /// A subscriber is eligible iff notifications are enabled, a device token
    /// is registered and at least one location is watched.
    ///
    /// A blank device token counts as missing.
    pub fn eligibility(self) -> Result<EligibleSubscriber, SkipReason> {
        if !self.notifications_enabled {
            return Err(SkipReason::NotificationsDisabled);
        }
        let device_token = self
            .device_token
            .and_then(|token| DeviceToken::try_from(token).ok())
            .ok_or(SkipReason::MissingDeviceToken)?;
        if self.watched_locations.is_empty() {
            return Err(SkipReason::NoWatchedLocations);
        }
        Ok(EligibleSubscriber {
            id: self.id,
            device_token,
            watched_locations: self.watched_locations,
        })
    }
}
