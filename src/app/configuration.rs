use std::env;
use std::env::VarError;
use std::time::Duration;

use config::{
    Config,
    ConfigError,
    File,
};
use custom_error::custom_error;
use derivative::Derivative;
use sqlx::postgres::{
    PgConnectOptions,
    PgSslMode,
};

use crate::dispatcher::DispatchLimits;
use crate::domain::SeverityClassifier;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub weather_client: WeatherClientSettings,
    pub push_client: PushClientSettings,
    pub dispatcher: DispatcherSettings,
    pub trigger: TriggerSettings,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub max_pending_connections: u32,
    pub port: u16,
}

#[derive(Clone, Derivative, serde::Deserialize)]
#[derivative(Debug)]
pub struct DatabaseSettings {
    pub connect_timeout_seconds: u64,
    pub name: String,
    pub host: String,
    pub max_db_connections: u32,
    #[derivative(Debug = "ignore")]
    pub password: String,
    pub port: u16,
    pub require_ssl: bool,
    pub username: String,
}

#[derive(Clone, Derivative, serde::Deserialize)]
#[derivative(Debug)]
pub struct WeatherClientSettings {
    pub base_url: String,
    #[derivative(Debug = "ignore")]
    pub api_key: String,
    pub units: String,
    pub timeout_millis: u64,
}

#[derive(Clone, Derivative, serde::Deserialize)]
#[derivative(Debug)]
pub struct PushClientSettings {
    pub base_url: String,
    pub project_id: String,
    #[derivative(Debug = "ignore")]
    pub token: String,
    pub timeout_millis: u64,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct DispatcherSettings {
    pub max_concurrent_subscribers: usize,
    pub directory_page_size: u32,
    pub severe_keywords: Vec<String>,
}

#[derive(Clone, Derivative, serde::Deserialize)]
#[derivative(Debug)]
pub struct TriggerSettings {
    pub username: String,
    /// Argon2 hash in PHC string format.
    #[derivative(Debug = "ignore")]
    pub password_hash: String,
}

impl ApplicationSettings {
    pub fn binding_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseSettings {
    pub fn pgserver_connection_options(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(&self.password)
            .port(self.port)
            .ssl_mode(ssl_mode)
    }
    pub fn database_connection_options(&self) -> PgConnectOptions {
        self.pgserver_connection_options().database(&self.name)
    }
}

impl WeatherClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

impl PushClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

impl Settings {
    /// The same timeouts bound the HTTP clients and each call made by the dispatcher.
    pub fn dispatch_limits(&self) -> DispatchLimits {
        DispatchLimits {
            max_concurrent_subscribers: self.dispatcher.max_concurrent_subscribers,
            fetch_timeout: self.weather_client.timeout(),
            delivery_timeout: self.push_client.timeout(),
        }
    }
}

impl DispatcherSettings {
    pub fn classifier(&self) -> SeverityClassifier {
        SeverityClassifier::new(&self.severe_keywords)
    }
}

custom_error! {
///! Custom error for missing env variable or invalid configuration files.
pub ConfigurationError
    MissingAppEnv{source:VarError} = "`APP_ENVIRONMENT` is not set \
    (possible values: [`local`|`production`]).",
    InvalidConfig{source:ConfigError} = "{source}",
}

/// Load the configuration from the directory: `configuration`.
///
/// It fails if:
/// - the `APP_ENVIRONMENT` env variable is not set
/// - the `configuration/base` file is missing
/// - the `configuration/${APP_ENVIRONMENT}` file is missing
/// - the `configuration/*` files have missing or unexpected fields
pub fn load_configuration() -> Result<Settings, ConfigurationError> {
    let app_environment = env::var("APP_ENVIRONMENT")?;
    load_configuration_for(&app_environment)
}

/// Same as [`load_configuration`] with an explicit environment name.
///
/// # Examples
///
/// ```rust
/// use weather_alerts::app::load_configuration_for;
///
/// assert!(load_configuration_for("local").is_ok());
/// ```
pub fn load_configuration_for(app_environment: &str) -> Result<Settings, ConfigurationError> {
    let mut config = Config::new();
    config.merge(File::with_name("configuration/base").required(true))?;
    config.merge(File::with_name(&format!("configuration/{}", app_environment)).required(true))?;

    // Add in settings from environment variables (with a prefix of APP and '__' as
    // separator) E.g. `APP_APPLICATION__PORT=5001 would set
    // `Settings.application.port`
    config.merge(config::Environment::with_prefix("app").separator("__"))?;

    Ok(config.try_into()?)
}
