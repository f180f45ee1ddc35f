use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::extract::cookie::CookieJar;
use rand::Rng;
use std::sync::Arc;

use crate::modules::account::controller::{details_flow, login_flow, logout_flow, register_flow};
use crate::modules::account::crud::{AccountCrud, AccountError};
use crate::modules::account::schema::{
    AccessTokenData, AccountResponse, ApiResponse, ForgotPasswordRequest, LoginRequest,
    RefreshTokenRequest, RegisterRequest, ResetPasswordRequest, TokenData, VerifyEmailRequest,
};
use crate::services::auth::AuthAccount;
use crate::services::email::forgot_password_template;
use crate::services::session::{session_cookie, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::AppState;

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), AccountError> {
    let crud = AccountCrud::users(state.db.clone(), &state.jwt);
    let account = register_flow(&state, &crud, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "User registered successfully. Please verify your email.",
            account,
        )),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<TokenData>>), AccountError> {
    let crud = AccountCrud::users(state.db.clone(), &state.jwt);
    let (jar, tokens) = login_flow(&state, &crud, jar, req).await?;

    Ok((jar, Json(ApiResponse::ok("User login successful", tokens))))
}

pub async fn details(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthAccount>,
) -> Result<Json<ApiResponse<AccountResponse>>, AccountError> {
    let crud = AccountCrud::users(state.db.clone(), &state.jwt);
    let account = details_flow(&crud, &auth).await?;

    Ok(Json(ApiResponse::ok(
        "User details retrieved successfully",
        account,
    )))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthAccount>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse>), AccountError> {
    let crud = AccountCrud::users(state.db.clone(), &state.jwt);
    let jar = logout_flow(&state, &crud, jar, &auth).await?;

    Ok((jar, Json(ApiResponse::message("User logout successful"))))
}

/// The verification link carries the account id as the one-time code.
/// Verification is recorded but deliberately does not gate login.
pub async fn verify_email(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyEmailRequest>,
) -> Result<Json<ApiResponse>, AccountError> {
    let Some(code) = req.code else {
        return Err(AccountError::MissingFields("code"));
    };

    let crud = AccountCrud::users(state.db.clone(), &state.jwt);
    crud.mark_email_verified(&code).await?;

    Ok(Json(ApiResponse::message("Email verified successfully")))
}

/// Mint a new access token from the refresh token, taken from the
/// `refreshToken` cookie or the request body. The refresh token itself is
/// not rotated; logout remains the only invalidation.
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Option<Json<RefreshTokenRequest>>,
) -> Result<(CookieJar, Json<ApiResponse<AccessTokenData>>), AccountError> {
    let token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| body.and_then(|Json(req)| req.refresh_token))
        .ok_or(AccountError::MissingToken)?;

    let crud = AccountCrud::users(state.db.clone(), &state.jwt);
    let access_token = crud.refresh_access_token(&token).await?;

    let jar = jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        access_token.clone(),
        state.config.run_mode,
    ));

    Ok((
        jar,
        Json(ApiResponse::ok(
            "Access token refreshed",
            AccessTokenData { access_token },
        )),
    ))
}

pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse>, AccountError> {
    let Some(email) = req.email else {
        return Err(AccountError::MissingFields("email"));
    };

    let otp = format!("{:06}", rand::rng().random_range(0..1_000_000u32));

    let crud = AccountCrud::users(state.db.clone(), &state.jwt);
    let account = crud.store_password_otp(email.trim(), &otp).await?;

    state
        .mailer
        .send(
            &account.email,
            "Your password reset code",
            forgot_password_template(&account.name, &otp),
        )
        .await
        .map_err(|e| AccountError::Mail(e.to_string()))?;

    Ok(Json(ApiResponse::message("OTP sent, check your email")))
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse>, AccountError> {
    let ResetPasswordRequest { email, otp, new_password } = req;

    let (Some(email), Some(otp), Some(new_password)) = (email, otp, new_password) else {
        return Err(AccountError::MissingFields("email, otp, and new_password"));
    };

    let crud = AccountCrud::users(state.db.clone(), &state.jwt);
    crud.reset_password(email.trim(), &otp, &new_password).await?;

    Ok(Json(ApiResponse::message("Password updated successfully")))
}
