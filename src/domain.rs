pub use device_token::DeviceToken;
pub use notification::{
    compose,
    NotificationMessage,
};
pub use observation::WeatherObservation;
pub use severity::SeverityClassifier;
pub use subscriber::{
    EligibleSubscriber,
    SkipReason,
    SubscriberId,
    SubscriberRecord,
};

mod device_token;
mod notification;
mod observation;
mod severity;
mod subscriber;
