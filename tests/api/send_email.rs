use portfolio_contact::domain::RelayResult;
use serde_json::json;

use crate::helpers::{spawn_app, spawn_app_with, unused_port};

fn valid_body() -> serde_json::Value {
    json!({
        "name": "Jo",
        "email": "a@b.co",
        "subject": "Hello there",
        "message": "This is a message.",
    })
}

#[tokio::test]
async fn send_email_with_a_valid_submission_returns_200() {
    // arrange
    let test_app = spawn_app().await;

    // act
    let response = test_app.post_send_email(&valid_body()).await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let body: RelayResult = response.json().await.unwrap();
    assert!(body.success);
    assert_eq!(body.message, "Email sent successfully");
}

#[tokio::test]
async fn send_email_relays_exactly_one_message() {
    // arrange
    let test_app = spawn_app().await;

    // act
    test_app.post_send_email(&valid_body()).await;

    // assert
    let received = test_app.smtp_server.received();
    assert_eq!(received.len(), 1);
    let email = &received[0];
    assert!(email.data.contains("Reply-To: a@b.co"));
    assert!(email.data.contains("Subject: Portfolio Contact: Hello there"));
    assert!(email.data.contains("multipart/alternative"));
    assert!(email.data.contains("This is a message."));
}

#[tokio::test]
async fn send_email_falls_back_to_the_sender_when_no_recipient_is_configured() {
    // arrange
    let test_app = spawn_app().await;

    // act
    test_app.post_send_email(&valid_body()).await;

    // assert
    let received = test_app.smtp_server.received();
    assert_eq!(received[0].mail_from, "portfolio@gmail.com");
    assert_eq!(received[0].rcpt_to, vec!["portfolio@gmail.com".to_string()]);
}

#[tokio::test]
async fn send_email_goes_to_the_configured_recipient() {
    // arrange
    let test_app = spawn_app_with(|c| {
        c.email_client.recipient_email = Some("owner@example.com".into());
    })
    .await;

    // act
    test_app.post_send_email(&valid_body()).await;

    // assert
    let received = test_app.smtp_server.received();
    assert_eq!(received[0].mail_from, "portfolio@gmail.com");
    assert_eq!(received[0].rcpt_to, vec!["owner@example.com".to_string()]);
}

#[tokio::test]
async fn send_email_with_missing_fields_returns_400() {
    // arrange
    let test_app = spawn_app().await;
    let test_cases = vec![
        (
            json!({"email": "a@b.co", "subject": "Hello there", "message": "This is a message."}),
            "missing name",
        ),
        (
            json!({"name": "Jo", "subject": "Hello there", "message": "This is a message."}),
            "missing email",
        ),
        (
            json!({"name": "Jo", "email": "a@b.co", "subject": "", "message": "This is a message."}),
            "empty subject",
        ),
        (
            json!({"name": "Jo", "email": "a@b.co", "subject": "Hello there", "message": "   "}),
            "blank message",
        ),
        (
            json!({"name": null, "email": "a@b.co", "subject": "Hello there", "message": "This is a message."}),
            "null name",
        ),
        (json!({}), "missing everything"),
    ];

    for (invalid_body, error_message) in test_cases {
        // act
        let response = test_app.post_send_email(&invalid_body).await;

        // assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "API did not fail with 400 when payload was {}",
            error_message
        );
        let body: RelayResult = response.json().await.unwrap();
        assert!(!body.success);
        assert_eq!(body.message, "All fields are required");
    }
    assert!(test_app.smtp_server.received().is_empty());
}

#[tokio::test]
async fn send_email_with_an_invalid_address_returns_400() {
    // arrange
    let test_app = spawn_app().await;
    let test_cases = vec![
        ("ursuladomain.com", "missing @"),
        ("ursula@", "missing domain"),
        ("@domain.com", "empty local part"),
        ("a..b@b.co", "consecutive dots"),
        ("a.@b.co", "a trailing dot before @"),
        (".a@b.co", "a leading dot"),
    ];

    for (email, error_message) in test_cases {
        let mut body = valid_body();
        body["email"] = json!(email);

        // act
        let response = test_app.post_send_email(&body).await;

        // assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "API did not fail with 400 when the email had {}",
            error_message
        );
        let body: RelayResult = response.json().await.unwrap();
        assert_eq!(body.message, "Invalid email address");
    }
    assert!(test_app.smtp_server.received().is_empty());
}

#[tokio::test]
async fn send_email_reports_every_field_that_is_too_short() {
    // arrange
    let test_app = spawn_app().await;
    let body = json!({
        "name": "J",
        "email": "a@b.co",
        "subject": "Hi",
        "message": "short",
    });

    // act
    let response = test_app.post_send_email(&body).await;

    // assert
    assert_eq!(400, response.status().as_u16());
    let body: RelayResult = response.json().await.unwrap();
    let fields: Vec<String> = body
        .errors
        .iter()
        .map(|error| error.field.to_string())
        .collect();
    assert_eq!(fields, vec!["name", "subject", "message"]);
    assert!(test_app.smtp_server.received().is_empty());
}

#[tokio::test]
async fn send_email_with_a_malformed_body_returns_400() {
    // arrange
    let test_app = spawn_app().await;

    // act
    let response = test_app.post_raw_send_email("{not json").await;

    // assert
    assert_eq!(400, response.status().as_u16());
    let body: RelayResult = response.json().await.unwrap();
    assert!(!body.success);
    assert_eq!(body.message, "Invalid request body");
}

#[tokio::test]
async fn send_email_returns_500_if_the_smtp_server_is_unreachable() {
    // arrange
    let smtp_port = unused_port();
    let test_app = spawn_app_with(|c| c.email_client.smtp_port = smtp_port).await;

    // act
    let response = test_app.post_send_email(&valid_body()).await;

    // assert
    assert_eq!(500, response.status().as_u16());
    let body: RelayResult = response.json().await.unwrap();
    assert!(!body.success);
    // transport details stay in the logs
    assert_eq!(body.message, "Failed to send email. Please try again later.");
}

#[tokio::test]
async fn send_email_answers_cors_preflight() {
    // arrange
    let test_app = spawn_app().await;

    // act
    let response = test_app
        .api_client
        .request(
            reqwest::Method::OPTIONS,
            &format!("{}/api/send-email", &test_app.address),
        )
        .header("Origin", "https://portfolio.example.com")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request.");

    // assert
    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}
