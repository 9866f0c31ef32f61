use std::convert::TryFrom;

/// Push destination of a single device, as registered by the client app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceToken(String);

impl AsRef<str> for DeviceToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeviceToken {
    type Error = String;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        if token.trim().is_empty() {
            Err("Invalid device token: empty or whitespace".to_string())
        } else {
            Ok(DeviceToken(token))
        }
    }
}
