use serde_json::Value;

use crate::api::helpers::*;

#[actix_rt::test]
async fn subscribe_returns_a_200_for_valid_form() {
    let test_app = spawn_app().await;
    let response = test_app.subscribe("ursula_le_guin@gmail.com").await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"ok": true, "message": "Subscriber added"})
    );
}

#[actix_rt::test]
async fn subscribe_accepts_an_address_with_a_display_name() {
    let test_app = spawn_app().await;

    let response = test_app.subscribe("Ursula Le Guin <ursula_le_guin@gmail.com>").await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        test_app.subscriber_emails().await,
        vec!["Ursula Le Guin <ursula_le_guin@gmail.com>".to_string()]
    );
}

#[actix_rt::test]
async fn subscribe_adds_new_record_to_the_store() {
    let test_app = spawn_app().await;

    test_app.subscribe("ursula_le_guin@gmail.com").await;

    assert_eq!(
        test_app.subscriber_emails().await,
        vec!["ursula_le_guin@gmail.com".to_string()]
    );
}

#[actix_rt::test]
async fn subscribe_accepts_each_email_only_once() {
    let test_app = spawn_app().await;

    let first = test_app.subscribe("foo@mail.com").await;
    let duplicate = test_app.subscribe("foo@mail.com").await;
    let other = test_app.subscribe("bar@mail.com").await;

    assert_eq!(200, first.status().as_u16());
    assert_eq!(409, duplicate.status().as_u16());
    assert_eq!(200, other.status().as_u16());
    let body: Value = duplicate.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"ok": false, "message": "Subscriber already exists"})
    );
    assert_eq!(
        test_app.subscriber_emails().await,
        vec!["foo@mail.com".to_string(), "bar@mail.com".to_string()]
    );
}

#[actix_rt::test]
async fn concurrent_identical_subscriptions_store_one_row() {
    let test_app = spawn_app().await;

    let (first, second) = tokio::join!(
        test_app.subscribe("race@mail.com"),
        test_app.subscribe("race@mail.com")
    );

    let mut statuses = vec![first.status().as_u16(), second.status().as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, vec![200, 409]);
    assert_eq!(
        test_app.subscriber_emails().await,
        vec!["race@mail.com".to_string()]
    );
}

#[actix_rt::test]
async fn subscribe_returns_a_400_with_invalid_email() {
    let test_app = spawn_app().await;
    let too_long = format!("{}@mail.com", "a".repeat(513));
    let invalid_data = vec![
        (String::from(""), String::from("empty body")),
        (String::from("email="), String::from("empty email")),
        (
            format!("email={}", too_long),
            String::from("email over 512 bytes"),
        ),
        (
            String::from("email=not-an-email"),
            String::from("not an email"),
        ),
    ];
    for (body, error_message) in invalid_data {
        let response = send_post_request(&test_app.url("/subscribe"), body).await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "Subscription with invalid body with {} did not fail",
            error_message
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["ok"], Value::Bool(false), "{}", error_message);
    }
    assert!(test_app.subscriber_emails().await.is_empty());
}

#[actix_rt::test]
async fn subscribe_returns_a_400_for_a_non_form_body() {
    let test_app = spawn_app().await;

    let response = reqwest::Client::new()
        .post(test_app.url("/subscribe"))
        .json(&serde_json::json!({"email": "foo@mail.com"}))
        .send()
        .await
        .expect("Fail to execute post request");

    assert_eq!(400, response.status().as_u16());
    assert!(test_app.subscriber_emails().await.is_empty());
}

#[actix_rt::test]
async fn subscribe_rejects_other_methods() {
    let test_app = spawn_app().await;

    let response = send_get_request(&test_app.url("/subscribe")).await;

    assert_eq!(405, response.status().as_u16());
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
}
