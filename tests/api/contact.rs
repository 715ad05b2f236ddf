use contact_relay::domain::SubmissionResult;
use wiremock::matchers::{any, body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::spawn_app;

fn jane() -> serde_json::Value {
    serde_json::json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane@example.com",
        "company": "",
        "message": "Hello"
    })
}

fn web3forms_accepts() -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(serde_json::json!({ "success": true, "message": "Email sent successfully!" }))
}

#[tokio::test]
async fn contact_with_valid_json_returns_200() {
    // arrange
    let test_app = spawn_app().await;
    Mock::given(path("/submit"))
        .and(method("POST"))
        .respond_with(web3forms_accepts())
        .expect(1)
        .mount(&test_app.delivery_server)
        .await;

    // act
    let response = test_app.post_contact_json(&jane()).await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let result: SubmissionResult = response.json().await.expect("Invalid response body");
    assert_eq!(
        result,
        SubmissionResult {
            success: true,
            message: "Your message has been sent successfully!".into()
        }
    );
}

#[tokio::test]
async fn contact_relays_subject_and_placeholder_company() {
    // arrange
    let test_app = spawn_app().await;
    Mock::given(path("/submit"))
        .and(body_partial_json(serde_json::json!({
            "access_key": "test-access-key",
            "subject": "New Contact Form Submission from Jane Doe",
            "from_name": "Jane Doe",
            "reply_to": "jane@example.com",
            "company": "Not provided",
            "message": "Hello"
        })))
        .respond_with(web3forms_accepts())
        .expect(1)
        .mount(&test_app.delivery_server)
        .await;

    // act
    let response = test_app.post_contact_json(&jane()).await;

    // assert
    assert_eq!(200, response.status().as_u16());
    // Mock asserts the outbound body on drop
}

#[tokio::test]
async fn contact_accepts_url_encoded_forms() {
    // arrange
    let test_app = spawn_app().await;
    Mock::given(path("/submit"))
        .and(body_partial_json(serde_json::json!({ "company": "Acme Studio" })))
        .respond_with(web3forms_accepts())
        .expect(1)
        .mount(&test_app.delivery_server)
        .await;
    let body = vec![
        ("firstName", "Jane"),
        ("lastName", "Doe"),
        ("email", "jane@example.com"),
        ("company", "Acme Studio"),
        ("message", "Hello there"),
    ];

    // act
    let response = test_app.post_contact_form(&body).await;

    // assert
    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn contact_with_missing_fields_returns_400_without_delivering() {
    // arrange
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(web3forms_accepts())
        .expect(0)
        .mount(&test_app.delivery_server)
        .await;
    let test_cases = vec![
        (
            serde_json::json!({ "firstName": "", "lastName": "Doe", "email": "jane@example.com", "message": "Hello" }),
            "empty first name",
        ),
        (
            serde_json::json!({ "firstName": "Jane", "email": "jane@example.com", "message": "Hello" }),
            "missing last name",
        ),
        (
            serde_json::json!({ "firstName": "Jane", "lastName": "Doe", "message": "Hello" }),
            "missing email",
        ),
        (
            serde_json::json!({ "firstName": "Jane", "lastName": "Doe", "email": "jane@example.com", "message": "   " }),
            "blank message",
        ),
        (
            serde_json::json!({ "firstName": null, "lastName": "Doe", "email": "jane@example.com", "message": "Hello" }),
            "null first name",
        ),
        (
            serde_json::json!({ "firstName": "Jane", "lastName": "Doe", "email": null, "message": null }),
            "null email and message",
        ),
        (serde_json::json!({}), "empty object"),
    ];

    for (invalid_body, description) in test_cases {
        // act
        let response = test_app.post_contact_json(&invalid_body).await;

        // assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "API did not fail with 400 when payload had {}",
            description
        );
        let result: SubmissionResult = response.json().await.expect("Invalid response body");
        assert_eq!(
            result,
            SubmissionResult {
                success: false,
                message: "Please fill out all required fields".into()
            }
        );
    }
}

#[tokio::test]
async fn contact_with_invalid_email_returns_400_without_delivering() {
    // arrange
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(web3forms_accepts())
        .expect(0)
        .mount(&test_app.delivery_server)
        .await;
    let test_cases = vec!["jane", "jane@example", "jane@@example.com", "jane @example.com"];

    for email in test_cases {
        let mut body = jane();
        body["email"] = serde_json::Value::from(email);

        // act
        let response = test_app.post_contact_json(&body).await;

        // assert
        assert_eq!(400, response.status().as_u16(), "{} was accepted", email);
        let result: SubmissionResult = response.json().await.expect("Invalid response body");
        assert!(!result.success);
        assert_eq!(result.message, "Please enter a valid email address");
    }
}

#[tokio::test]
async fn contact_returns_500_with_fallback_when_delivery_is_refused() {
    // arrange
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "success": false,
            "message": "Invalid access key"
        })))
        .expect(2)
        .mount(&test_app.delivery_server)
        .await;

    // act
    let first = test_app.post_contact_json(&jane()).await;
    let first_status = first.status().as_u16();
    let first: SubmissionResult = first.json().await.expect("Invalid response body");
    let second: SubmissionResult = test_app
        .post_contact_json(&jane())
        .await
        .json()
        .await
        .expect("Invalid response body");

    // assert
    assert_eq!(500, first_status);
    assert!(!first.success);
    assert!(first.message.contains(&test_app.fallback_contact));
    assert!(!first.message.contains("Invalid access key"));
    assert_eq!(first, second);
}

#[tokio::test]
async fn contact_returns_500_when_delivery_answers_garbage() {
    // arrange
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .expect(1)
        .mount(&test_app.delivery_server)
        .await;

    // act
    let response = test_app.post_contact_json(&jane()).await;

    // assert
    assert_eq!(500, response.status().as_u16());
    let result: SubmissionResult = response.json().await.expect("Invalid response body");
    assert!(!result.success);
    assert!(result.message.contains(&test_app.fallback_contact));
}

#[tokio::test]
async fn contact_is_not_retried_when_delivery_times_out() {
    // arrange
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(web3forms_accepts().set_delay(std::time::Duration::from_secs(2)))
        .expect(1)
        .mount(&test_app.delivery_server)
        .await;

    // act
    let response = test_app.post_contact_json(&jane()).await;

    // assert
    assert_eq!(500, response.status().as_u16());
}

#[tokio::test]
async fn contact_with_missing_form_fields_returns_400_without_delivering() {
    // arrange
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(web3forms_accepts())
        .expect(0)
        .mount(&test_app.delivery_server)
        .await;
    let body = vec![("firstName", "Jane"), ("email", "jane@example.com")];

    // act
    let response = test_app.post_contact_form(&body).await;

    // assert
    assert_eq!(400, response.status().as_u16());
    let result: SubmissionResult = response.json().await.expect("Invalid response body");
    assert_eq!(result.message, "Please fill out all required fields");
}

#[tokio::test]
async fn contact_with_an_unreadable_body_returns_a_json_failure() {
    // arrange
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(web3forms_accepts())
        .expect(0)
        .mount(&test_app.delivery_server)
        .await;
    let test_cases = vec![
        ("application/json", "not json", "malformed json"),
        (
            "application/json",
            r#"{"firstName": 42, "lastName": "Doe", "email": "jane@example.com", "message": "Hello"}"#,
            "a number where text belongs",
        ),
        ("text/plain", "Hello, I would like a logo", "an unsupported content type"),
    ];

    for (content_type, body, description) in test_cases {
        // act
        let response = test_app
            .post_contact_raw(content_type, body.to_string())
            .await;

        // assert
        assert_eq!(
            500,
            response.status().as_u16(),
            "API did not fail with 500 for {}",
            description
        );
        let result: SubmissionResult = response
            .json()
            .await
            .unwrap_or_else(|_| panic!("No SubmissionResult body for {}", description));
        assert!(!result.success);
        assert!(
            result.message.contains(&test_app.fallback_contact),
            "No fallback contact for {}",
            description
        );
    }
}
