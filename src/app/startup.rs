use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{
    web,
    App,
    HttpServer,
};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_actix_web::TracingLogger;
use url::Url;

use crate::app::configuration::{
    DatabaseSettings,
    PushClientSettings,
    Settings,
    WeatherClientSettings,
};
use crate::directory::{
    PostgresDirectory,
    SubscriberDirectory,
};
use crate::dispatcher::Dispatcher;
use crate::push_client::PushClient;
use crate::routes::*;
use crate::weather_client::WeatherClient;

pub struct DispatchApp {
    pub server: Server,
    pub port: u16,
}

impl DispatchApp {
    /// Build the app against the postgres subscriber directory.
    ///
    /// The pool connects lazily: a database outage surfaces as a failed run,
    /// not as a failed start.
    pub fn from(configuration: Settings) -> Result<DispatchApp, anyhow::Error> {
        let postgres_pool = DispatchApp::postgres_pool(&configuration.database);
        let directory = Arc::new(PostgresDirectory::new(
            postgres_pool,
            configuration.dispatcher.directory_page_size,
        ));
        DispatchApp::with_directory(configuration, directory)
    }

    pub fn with_directory(
        configuration: Settings,
        directory: Arc<dyn SubscriberDirectory>,
    ) -> Result<DispatchApp, anyhow::Error> {
        let tcp_listener = TcpListener::bind(configuration.application.binding_address())
            .context("error binding the application address")?;
        let port = tcp_listener.local_addr()?.port();

        let dispatcher = web::Data::new(Dispatcher::new(
            directory,
            Arc::new(DispatchApp::weather_client(&configuration.weather_client)?),
            Arc::new(DispatchApp::push_client(&configuration.push_client)?),
            configuration.dispatcher.classifier(),
            configuration.dispatch_limits(),
        ));
        let trigger = web::Data::new(configuration.trigger.clone());

        // HttpServer handles all transport level concerns
        let server = HttpServer::new(move || {
            // App is where all the application logic lives: routing, middlewares, request
            // handlers, etc.
            App::new()
                .wrap(TracingLogger::default())
                .route("/health_check", web::get().to(health_check))
                .route("/dispatch", web::post().to(dispatch))
                .app_data(dispatcher.clone())
                .app_data(trigger.clone())
        })
        .backlog(configuration.application.max_pending_connections)
        .listen(tcp_listener)?
        .run();
        Ok(DispatchApp { port, server })
    }

    pub fn postgres_pool(database_config: &DatabaseSettings) -> PgPool {
        PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_secs(
                database_config.connect_timeout_seconds,
            ))
            .max_connections(database_config.max_db_connections)
            .connect_lazy_with(database_config.database_connection_options())
    }

    fn weather_client(client_config: &WeatherClientSettings) -> Result<WeatherClient, anyhow::Error> {
        let base_url = Url::parse(&client_config.base_url).context(format!(
            "invalid base url: {} for weather client",
            client_config.base_url
        ))?;
        WeatherClient::new(
            base_url,
            client_config.api_key.clone(),
            client_config.units.clone(),
            client_config.timeout(),
        )
    }

    fn push_client(client_config: &PushClientSettings) -> Result<PushClient, anyhow::Error> {
        let base_url = Url::parse(&client_config.base_url).context(format!(
            "invalid base url: {} for push client",
            client_config.base_url
        ))?;
        PushClient::new(
            base_url,
            client_config.project_id.clone(),
            client_config.token.clone(),
            client_config.timeout(),
        )
    }
}
