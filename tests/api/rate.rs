use std::sync::Arc;

use serde_json::Value;

use crate::api::helpers::*;

#[actix_rt::test]
async fn rate_returns_the_bare_rate() {
    let test_app = spawn_app().await;

    let response = send_get_request(&test_app.url("/rate")).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let rate: f64 = response.json().await.unwrap();
    assert_eq!(rate, 6.9);
}

#[actix_rt::test]
async fn rate_returns_a_500_when_the_source_fails() {
    let test_app = spawn_app_with_rate_source(Arc::new(UnavailableRateSource)).await;

    let response = send_get_request(&test_app.url("/rate")).await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"ok": false, "message": "Failed to fetch the exchange rate"})
    );
}

#[actix_rt::test]
async fn rate_rejects_other_methods() {
    let test_app = spawn_app().await;

    let response = send_post_request(&test_app.url("/rate"), String::new()).await;

    assert_eq!(405, response.status().as_u16());
}
