use crate::helpers::*;

#[actix_rt::test]
async fn health_check_works() {
    let health_check_endpoint = format!("{}/health_check", spawn_app(Some(vec![])).await.address);
    let response = send_get_request(&health_check_endpoint).await;
    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}
