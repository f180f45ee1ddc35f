use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

use crate::common::{test_email, test_name, test_password, TestContext};

async fn create_test_user(ctx: &TestContext) -> String {
    let email = test_email();

    ctx.server
        .post("/api/user/register")
        .json(&json!({
            "name": test_name(),
            "email": &email,
            "password": test_password()
        }))
        .await;

    email
}

async fn stored_otp(ctx: &TestContext, email: &str) -> Option<String> {
    let (otp,): (Option<String>,) =
        sqlx::query_as("SELECT forgot_password_otp FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&ctx.db)
            .await
            .unwrap();
    otp
}

#[tokio::test]
#[serial]
async fn forgot_password_stores_a_six_digit_otp() {
    let ctx = TestContext::new().await;
    let email = create_test_user(&ctx).await;

    let response = ctx
        .server
        .post("/api/user/forgot-password")
        .json(&json!({ "email": &email }))
        .await;

    response.assert_status(StatusCode::OK);

    let otp = stored_otp(&ctx, &email).await.expect("OTP must be stored");
    assert_eq!(otp.len(), 6);
    assert!(otp.chars().all(|c| c.is_ascii_digit()));

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn forgot_password_with_unknown_email_returns_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/user/forgot-password")
        .json(&json!({ "email": "nobody@example.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn reset_password_with_valid_otp_changes_the_password() {
    let ctx = TestContext::new().await;
    let email = create_test_user(&ctx).await;

    ctx.server
        .post("/api/user/forgot-password")
        .json(&json!({ "email": &email }))
        .await;

    let otp = stored_otp(&ctx, &email).await.unwrap();

    let response = ctx
        .server
        .post("/api/user/reset-password")
        .json(&json!({
            "email": &email,
            "otp": &otp,
            "new_password": "BrandNewPassword456!"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    // Old password no longer works
    let response = ctx
        .server
        .post("/api/user/login")
        .json(&json!({ "email": &email, "password": test_password() }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // New one does
    let response = ctx
        .server
        .post("/api/user/login")
        .json(&json!({ "email": &email, "password": "BrandNewPassword456!" }))
        .await;
    response.assert_status(StatusCode::OK);

    // OTP is consumed
    assert!(stored_otp(&ctx, &email).await.is_none());

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn reset_password_with_wrong_otp_returns_bad_request() {
    let ctx = TestContext::new().await;
    let email = create_test_user(&ctx).await;

    ctx.server
        .post("/api/user/forgot-password")
        .json(&json!({ "email": &email }))
        .await;

    let otp = stored_otp(&ctx, &email).await.unwrap();
    let wrong_otp = if otp == "000000" { "000001" } else { "000000" };

    let response = ctx
        .server
        .post("/api/user/reset-password")
        .json(&json!({
            "email": &email,
            "otp": wrong_otp,
            "new_password": "BrandNewPassword456!"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    // Password unchanged
    let response = ctx
        .server
        .post("/api/user/login")
        .json(&json!({ "email": &email, "password": test_password() }))
        .await;
    response.assert_status(StatusCode::OK);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn reset_password_with_expired_otp_returns_bad_request() {
    let ctx = TestContext::new().await;
    let email = create_test_user(&ctx).await;

    ctx.server
        .post("/api/user/forgot-password")
        .json(&json!({ "email": &email }))
        .await;

    let otp = stored_otp(&ctx, &email).await.unwrap();

    sqlx::query(
        "UPDATE users SET forgot_password_expiry = DATE_SUB(NOW(), INTERVAL 2 HOUR) WHERE email = ?",
    )
    .bind(&email)
    .execute(&ctx.db)
    .await
    .unwrap();

    let response = ctx
        .server
        .post("/api/user/reset-password")
        .json(&json!({
            "email": &email,
            "otp": &otp,
            "new_password": "BrandNewPassword456!"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn reset_password_without_prior_request_returns_bad_request() {
    let ctx = TestContext::new().await;
    let email = create_test_user(&ctx).await;

    let response = ctx
        .server
        .post("/api/user/reset-password")
        .json(&json!({
            "email": &email,
            "otp": "123456",
            "new_password": "BrandNewPassword456!"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    ctx.cleanup().await;
}
