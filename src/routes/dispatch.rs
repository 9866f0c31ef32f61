use actix_web::http::header::HeaderMap;
use actix_web::{
    web,
    HttpRequest,
    HttpResponse,
};
use anyhow::Context;
use argon2::{
    Argon2,
    PasswordHash,
    PasswordVerifier,
};
use derivative::Derivative;

use crate::app::TriggerSettings;
use crate::dispatcher::Dispatcher;
use crate::routes::RouteError;

/// Run the dispatcher once ("run now"), on behalf of the external scheduler.
///
/// The run is cut short if the process is asked to stop; the summary then
/// reports `cancelled`.
#[tracing::instrument(name = "Triggering a dispatch run", skip(request, dispatcher, trigger))]
pub async fn dispatch(
    request: HttpRequest,
    dispatcher: web::Data<Dispatcher>,
    trigger: web::Data<TriggerSettings>,
) -> Result<HttpResponse, RouteError> {
    let credentials = get_credentials(request.headers()).map_err(|e| {
        tracing::warn!("Rejected dispatch trigger: {:#}", e);
        RouteError::AuthError {
            message: e.to_string(),
        }
    })?;
    let trigger = trigger.get_ref().clone();
    web::block(move || verify_credentials(&credentials, &trigger))
        .await?
        .map_err(|e| {
            match &e {
                RouteError::AuthError { .. } => tracing::warn!("Rejected dispatch trigger: {}", e),
                _ => tracing::error!("Cannot verify dispatch trigger: {}", e),
            }
            e
        })?;

    let report = dispatcher.run_until(shutdown_requested()).await?;
    Ok(HttpResponse::Ok().json(report.summary()))
}

#[derive(Derivative)]
#[derivative(Debug)]
struct Credentials {
    username: String,
    #[derivative(Debug = "ignore")]
    password: String,
}

fn get_credentials(headers: &HeaderMap) -> anyhow::Result<Credentials> {
    let authorization_header: &str = headers
        .get("Authorization")
        .context("Missing `Authorization` header")?
        .to_str()
        .context("Invalid `Authorization` content")?;
    let encoded_credentials = authorization_header
        .strip_prefix("Basic ")
        .context("Authorization scheme is not Basic")?;
    let decoded_credentials_bytes =
        base64::decode(encoded_credentials).context("Credentials cannot be base64 decoded")?;
    let decoded_credentials = String::from_utf8(decoded_credentials_bytes)
        .context("Invalid credentials: not UTF8 chars")?;
    let mut credentials = decoded_credentials.splitn(2, ':');
    let username = credentials
        .next()
        .context("Invalid credentials: missing username")?;
    let password = credentials
        .next()
        .context("Invalid credentials: missing password")?;
    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// A configured hash that does not parse is a server fault, not a bad password.
fn verify_credentials(credentials: &Credentials, trigger: &TriggerSettings) -> Result<(), RouteError> {
    let expected_password_hash =
        PasswordHash::new(&trigger.password_hash).map_err(|e| RouteError::InvalidTriggerConfig {
            message: format!("`trigger.password_hash` is not a PHC string: {}", e),
        })?;
    if credentials.username != trigger.username {
        return Err(RouteError::AuthError {
            message: "Unknown username".to_string(),
        });
    }
    Argon2::default()
        .verify_password(credentials.password.as_bytes(), &expected_password_hash)
        .map_err(|_| RouteError::AuthError {
            message: "Invalid password".to_string(),
        })
}

async fn shutdown_requested() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{
            signal,
            SignalKind,
        };
        if let Ok(mut terminate) = signal(SignalKind::terminate()) {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {},
                _ = terminate.recv() => {},
            }
            return;
        }
    }
    if tokio::signal::ctrl_c().await.is_err() {
        futures::future::pending::<()>().await;
    }
}
