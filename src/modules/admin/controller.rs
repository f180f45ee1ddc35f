use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::modules::account::controller::{details_flow, login_flow, logout_flow, register_flow};
use crate::modules::account::crud::{AccountCrud, AccountError};
use crate::modules::account::schema::{
    AccountResponse, ApiResponse, LoginRequest, RegisterRequest, TokenData,
};
use crate::services::auth::AuthAccount;
use crate::AppState;

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), AccountError> {
    let crud = AccountCrud::admins(state.db.clone(), &state.jwt);
    let account = register_flow(&state, &crud, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "Admin registered successfully. Please verify your email.",
            account,
        )),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<TokenData>>), AccountError> {
    let crud = AccountCrud::admins(state.db.clone(), &state.jwt);
    let (jar, tokens) = login_flow(&state, &crud, jar, req).await?;

    Ok((jar, Json(ApiResponse::ok("Admin login successful", tokens))))
}

pub async fn details(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthAccount>,
) -> Result<Json<ApiResponse<AccountResponse>>, AccountError> {
    let crud = AccountCrud::admins(state.db.clone(), &state.jwt);
    let account = details_flow(&crud, &auth).await?;

    Ok(Json(ApiResponse::ok(
        "Admin details retrieved successfully",
        account,
    )))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthAccount>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse>), AccountError> {
    let crud = AccountCrud::admins(state.db.clone(), &state.jwt);
    let jar = logout_flow(&state, &crud, jar, &auth).await?;

    Ok((jar, Json(ApiResponse::message("Admin logout successful"))))
}
