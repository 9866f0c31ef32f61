use serde::Deserialize;
use serde_json::Value;

/// The provider's current-weather payload.
///
/// Only `weather[0].description` is read. Any JSON document is accepted: a
/// missing, null or mistyped piece on the way yields an empty description.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct WeatherResponse(Value);

impl WeatherResponse {
    /// Description of the first condition entry, or an empty string.
    pub fn into_description(self) -> String {
        self.0
            .get("weather")
            .and_then(|conditions| conditions.get(0))
            .and_then(|condition| condition.get("description"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}
