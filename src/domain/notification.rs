use crate::domain::{
    DeviceToken,
    WeatherObservation,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationMessage {
    pub device_token: DeviceToken,
    pub title: String,
    pub body: String,
}

/// Build the alert pushed to `device_token` for a severe observation at `location`.
pub fn compose(
    device_token: DeviceToken,
    location: &str,
    observation: &WeatherObservation,
) -> NotificationMessage {
    NotificationMessage {
        device_token,
        title: format!("Severe Weather Alert for {}", location),
        body: format!("Alert: {}", capitalize_first_letter(&observation.description)),
    }
}

fn capitalize_first_letter(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
