use weather_alerts::app::{
    load_configuration,
    setup_tracing,
    DispatchApp,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing("weather-alerts".into(), "info".into());
    let configuration = load_configuration()?;
    let app = DispatchApp::from(configuration)?;
    tracing::info!(port = app.port, "Listening for dispatch triggers");
    app.server.await?;
    Ok(())
}
