use wiremock::matchers::{
    any,
    body_json,
    method,
    path,
    query_param,
};
use wiremock::{
    Mock,
    ResponseTemplate,
};

use weather_alerts::dispatcher::RunSummary;

use crate::helpers::*;

fn weather(description: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "weather": [{"main": "Whatever", "description": description}],
        "main": {"temp": 12.3}
    }))
}

#[actix_rt::test]
async fn dispatch_without_credentials_is_rejected() {
    let test_app = spawn_app(Some(vec![subscriber(true, Some("device"), &["Oslo"])])).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.weather_server)
        .await;

    let response = send_post_request(&format!("{}/dispatch", test_app.address)).await;

    assert_eq!(401, response.status().as_u16());
    assert_eq!(
        r#"Basic realm="dispatch""#,
        response.headers()["WWW-Authenticate"]
    );
}

#[actix_rt::test]
async fn dispatch_with_wrong_credentials_is_rejected() {
    let test_app = spawn_app(Some(vec![subscriber(true, Some("device"), &["Oslo"])])).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.weather_server)
        .await;

    let wrong_password = test_app
        .trigger_dispatch(TRIGGER_USERNAME, "not the password")
        .await;
    let wrong_username = test_app.trigger_dispatch("intruder", TRIGGER_PASSWORD).await;

    assert_eq!(401, wrong_password.status().as_u16());
    assert_eq!(401, wrong_username.status().as_u16());
}

#[actix_rt::test]
async fn an_unset_trigger_password_hash_is_a_server_error() {
    let test_app = spawn_app_with_password_hash(
        Some(vec![subscriber(true, Some("device"), &["Oslo"])]),
        "set-with-APP_TRIGGER__PASSWORD_HASH".to_string(),
    )
    .await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.weather_server)
        .await;

    let response = test_app
        .trigger_dispatch(TRIGGER_USERNAME, TRIGGER_PASSWORD)
        .await;

    assert_eq!(500, response.status().as_u16());
    assert!(response.headers().get("WWW-Authenticate").is_none());
}

#[actix_rt::test]
async fn dispatch_pushes_alerts_for_severe_weather_only() {
    let test_app = spawn_app(Some(vec![
        subscriber(true, Some("device-1"), &["Oslo", "Rome"]),
        subscriber(false, Some("device-2"), &["Oslo"]),
    ]))
    .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Oslo"))
        .respond_with(weather("light rain"))
        .expect(1)
        .mount(&test_app.weather_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Rome"))
        .respond_with(weather("clear sky"))
        .expect(1)
        .mount(&test_app.weather_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/projects/weather-alerts/messages:send"))
        .and(body_json(serde_json::json!({
            "message": {
                "token": "device-1",
                "notification": {
                    "title": "Severe Weather Alert for Oslo",
                    "body": "Alert: Light rain"
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.push_server)
        .await;

    let response = test_app
        .trigger_dispatch(TRIGGER_USERNAME, TRIGGER_PASSWORD)
        .await;

    assert_eq!(200, response.status().as_u16());
    let summary: RunSummary = response.json().await.unwrap();
    assert_eq!(summary.delivered, 1);
    assert_eq!(summary.not_severe, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.fetch_failed, 0);
    assert_eq!(summary.delivery_failed, 0);
    assert!(!summary.cancelled);
    assert!(summary.started_at <= summary.finished_at);
}

#[actix_rt::test]
async fn provider_and_gateway_failures_are_reported_not_raised() {
    let test_app = spawn_app(Some(vec![
        subscriber(true, Some("device-1"), &["Atlantis", "Oslo"]),
    ]))
    .await;

    Mock::given(method("GET"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&test_app.weather_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("q", "Oslo"))
        .respond_with(weather("thunderstorm with heavy rain"))
        .expect(1)
        .mount(&test_app.weather_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&test_app.push_server)
        .await;

    let response = test_app
        .trigger_dispatch(TRIGGER_USERNAME, TRIGGER_PASSWORD)
        .await;

    assert_eq!(200, response.status().as_u16());
    let summary: RunSummary = response.json().await.unwrap();
    assert_eq!(summary.fetch_failed, 1);
    assert_eq!(summary.delivery_failed, 1);
    assert_eq!(summary.delivered, 0);
}

#[actix_rt::test]
async fn unreadable_directory_fails_the_run() {
    let test_app = spawn_app(None).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.weather_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.push_server)
        .await;

    let response = test_app
        .trigger_dispatch(TRIGGER_USERNAME, TRIGGER_PASSWORD)
        .await;

    assert_eq!(500, response.status().as_u16());
}
