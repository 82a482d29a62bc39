mod common;

use auth::SubjectClaims;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app.get("/").send().await.expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.text().await.unwrap(),
        "Server is up and running with Auth!"
    );
}

#[tokio::test]
async fn test_register_login_and_verify() {
    let app = TestApp::spawn().await;

    let user_id = app.register("Ada", "Lovelace", "ada@x.com", "s3cret").await;
    assert!(!user_id.is_empty());

    let response = app.request_token("ada@x.com", "s3cret").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["token"].as_str().expect("Missing token");

    let claims: SubjectClaims = app
        .authenticator
        .validate_token(token)
        .expect("Issued token should verify");
    assert_eq!(claims.id, user_id);
    assert_eq!(claims.email, "ada@x.com");

    let wrong = app.request_token("ada@x.com", "wrong").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_with_token() {
    let app = TestApp::spawn().await;

    let user_id = app.register("Ada", "Lovelace", "ada@x.com", "s3cret").await;
    let body: serde_json::Value = app
        .request_token("ada@x.com", "s3cret")
        .await
        .json()
        .await
        .unwrap();
    let token = body["data"]["token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/users/me", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], user_id.as_str());
    assert_eq!(body["data"]["firstName"], "Ada");
    assert_eq!(body["data"]["lastName"], "Lovelace");
    assert_eq!(body["data"]["email"], "ada@x.com");
    assert!(body["data"].get("passwordDigest").is_none());
    assert!(body["data"].get("salt").is_none());
}

#[tokio::test]
async fn test_current_user_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["message"],
        "Unauthorized access. Please provide a valid token."
    );
}

#[tokio::test]
async fn test_current_user_with_invalid_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/users/me", "invalid.token.here")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_ignores_authorization_header() {
    let app = TestApp::spawn().await;

    app.register("Ada", "Lovelace", "ada@x.com", "s3cret").await;
    let body: serde_json::Value = app
        .request_token("ada@x.com", "s3cret")
        .await
        .json()
        .await
        .unwrap();
    let token = body["data"]["token"].as_str().unwrap();

    let response = app
        .get("/api/users/me")
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_for_unknown_subject() {
    let app = TestApp::spawn().await;

    let claims = app
        .authenticator
        .claims_for(uuid::Uuid::new_v4(), "ghost@x.com");
    let token = app.authenticator.issue_token(&claims).unwrap();

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_email_and_wrong_password_look_the_same() {
    let app = TestApp::spawn().await;

    app.register("Ada", "Lovelace", "ada@x.com", "s3cret").await;

    let wrong_password = app.request_token("ada@x.com", "wrong").await;
    let unknown_email = app.request_token("nobody@x.com", "s3cret").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_email: serde_json::Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("Ada", "Lovelace", "ada@x.com", "s3cret").await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "firstName": "Augusta",
            "lastName": "King",
            "email": "ada@x.com",
            "password": "another"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "not-an-email",
            "password": "s3cret"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_create_user_blank_first_name() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "firstName": "  ",
            "lastName": "Lovelace",
            "email": "ada@x.com",
            "password": "s3cret"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("first name"));
}

#[tokio::test]
async fn test_create_user_missing_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "firstName": "Ada",
            "email": "ada@x.com",
            "password": "s3cret"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_say_name() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/hello/Ada")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Hello Ada, How are you doing ?");
}

#[tokio::test]
async fn test_issue_token_with_incomplete_body() {
    let app = TestApp::spawn().await;

    app.register("Ada", "Lovelace", "ada@x.com", "s3cret").await;

    let missing_password = app
        .post("/api/auth/token")
        .json(&json!({ "email": "ada@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    let wrong_password = app.request_token("ada@x.com", "wrong").await;

    assert_eq!(missing_password.status(), StatusCode::UNAUTHORIZED);

    let missing_password: serde_json::Value = missing_password
        .json()
        .await
        .expect("Failed to parse response");
    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    assert_eq!(missing_password, wrong_password);
}
