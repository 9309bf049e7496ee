//! Register/login behavior through the GraphQL schema.

mod common;

use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use common::{login_mutation, register_mutation, session_cookie, TestApp};

fn field_errors(response: &Value, op: &str) -> Value {
    response["data"][op]["errors"].clone()
}

#[tokio::test]
async fn test_register_rejects_short_username() {
    let app = TestApp::new();
    let response = app.execute(&register_mutation("ab", "longpassword")).await;

    assert_eq!(
        field_errors(&response, "register"),
        json!([{ "field": "username", "message": "Username needs to be longer than two characters." }])
    );
    assert_eq!(response["data"]["register"]["user"], Value::Null);
    assert!(app.users.all().is_empty());
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new();
    let response = app.execute(&register_mutation("validuser", "1234567")).await;

    assert_eq!(
        field_errors(&response, "register"),
        json!([{ "field": "password", "message": "Password needs to be at least eight characters long." }])
    );
    assert!(app.users.all().is_empty());
}

#[tokio::test]
async fn test_register_reports_only_username_when_both_short() {
    let app = TestApp::new();
    let response = app.execute(&register_mutation("ab", "1234567")).await;

    let errors = field_errors(&response, "register");
    assert_eq!(errors.as_array().unwrap().len(), 1);
    assert_eq!(errors[0]["field"], "username");
}

#[tokio::test]
async fn test_register_boundary_lengths_accepted() {
    let app = TestApp::new();
    let response = app.execute(&register_mutation("abc", "12345678")).await;

    assert_eq!(field_errors(&response, "register"), Value::Null);
    assert_eq!(response["data"]["register"]["user"]["username"], "abc");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new();
    app.execute(&register_mutation("validuser", "longpassword"))
        .await;
    let response = app
        .execute(&register_mutation("validuser", "otherpassword"))
        .await;

    assert_eq!(
        field_errors(&response, "register"),
        json!([{ "field": "username", "message": "Username is already taken." }])
    );
    assert_eq!(app.users.all().len(), 1);
}

#[tokio::test]
async fn test_login_unknown_username() {
    let app = TestApp::new();
    let response = app.execute(&login_mutation("nosuchuser", "whatever")).await;

    assert_eq!(
        field_errors(&response, "login"),
        json!([{ "field": "username", "message": "Could not find that username." }])
    );
    assert_eq!(response["data"]["login"]["user"], Value::Null);
}

#[tokio::test]
async fn test_login_incorrect_password() {
    let app = TestApp::new();
    app.execute(&register_mutation("validuser", "longpassword"))
        .await;
    let response = app
        .execute(&login_mutation("validuser", "wrongpassword"))
        .await;

    assert_eq!(
        field_errors(&response, "login"),
        json!([{ "field": "password", "message": "Incorrect password." }])
    );
}

#[tokio::test]
async fn test_login_success_and_password_not_stored_plain() {
    let app = TestApp::new();
    let registered = app
        .execute(&register_mutation("validuser", "longpassword"))
        .await;
    let response = app
        .execute(&login_mutation("validuser", "longpassword"))
        .await;

    assert_eq!(field_errors(&response, "login"), Value::Null);
    assert_eq!(
        response["data"]["login"]["user"]["id"],
        registered["data"]["register"]["user"]["id"]
    );

    let stored = app.users.all();
    assert_eq!(stored.len(), 1);
    assert_ne!(stored[0].password_hash, "longpassword");
}

#[tokio::test]
async fn test_same_password_hashes_differently() {
    let app = TestApp::new();
    app.execute(&register_mutation("firstuser", "samepassword"))
        .await;
    app.execute(&register_mutation("seconduser", "samepassword"))
        .await;

    let stored = app.users.all();
    assert_eq!(stored.len(), 2);
    assert_ne!(stored[0].password_hash, stored[1].password_hash);
}

#[tokio::test]
async fn test_password_hash_not_exposed() {
    let app = TestApp::new();
    let response = app
        .execute(r#"mutation { register(username: "validuser", password: "longpassword") { user { passwordHash } } }"#)
        .await;

    assert!(response["errors"].is_array());
}

#[tokio::test]
async fn test_store_failure_is_generic_error() {
    let app = TestApp::new();
    app.users.fail_writes();
    let response = app
        .execute(&register_mutation("validuser", "longpassword"))
        .await;

    let error = &response["errors"][0];
    assert_eq!(error["message"], "An internal error occurred");
    assert_eq!(error["extensions"]["code"], "DATABASE_ERROR");
    assert!(!error.to_string().contains("disk full"));
}

#[tokio::test]
async fn test_me_without_session_is_null() {
    let app = TestApp::new();
    let response = app.execute("{ me { id } }").await;
    assert_eq!(response["data"]["me"], Value::Null);
}

#[tokio::test]
async fn test_register_signs_in_and_logout_signs_out() {
    let app = TestApp::new();

    let (jar, _) = app
        .execute_with(
            CookieJar::new(),
            &register_mutation("validuser", "longpassword"),
        )
        .await;
    let cookie = session_cookie(&jar).expect("session cookie set");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(app.sessions.len(), 1);

    let (jar, me) = app.execute_with(jar, "{ me { username } }").await;
    assert_eq!(me["data"]["me"]["username"], "validuser");

    let (jar, logout) = app.execute_with(jar, "mutation { logout }").await;
    assert_eq!(logout["data"]["logout"], true);
    assert_eq!(app.sessions.len(), 0);

    let (_, me) = app.execute_with(jar, "{ me { username } }").await;
    assert_eq!(me["data"]["me"], Value::Null);
}

#[tokio::test]
async fn test_failed_login_does_not_sign_in() {
    let app = TestApp::new();
    app.execute(&register_mutation("validuser", "longpassword"))
        .await;
    let sessions_after_register = app.sessions.len();

    let (jar, _) = app
        .execute_with(
            CookieJar::new(),
            &login_mutation("validuser", "wrongpassword"),
        )
        .await;

    assert!(session_cookie(&jar).is_none());
    assert_eq!(app.sessions.len(), sessions_after_register);
}

#[tokio::test]
async fn test_hello() {
    let app = TestApp::new();
    let response = app.execute("{ hello }").await;
    assert_eq!(response["data"]["hello"], "hello world");
}
