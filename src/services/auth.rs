use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::modules::account::crud::AccountError;
use crate::modules::account::model::ROLE_ADMIN;
use crate::services::session::ACCESS_TOKEN_COOKIE;
use crate::AppState;

/// Caller identity injected into request extensions by the guard middleware.
#[derive(Debug, Clone)]
pub struct AuthAccount {
    pub id: String,
    pub role: String,
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// The access token travels either in the `accessToken` cookie (browser
/// clients) or as a Bearer header (everything else). Cookie wins.
fn authenticate(
    state: &AppState,
    jar: &CookieJar,
    headers: &HeaderMap,
) -> Result<AuthAccount, AccountError> {
    let token = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| bearer_token(headers))
        .ok_or(AccountError::MissingToken)?;

    let data = state
        .jwt
        .verify_access_token(&token)
        .map_err(|_| AccountError::InvalidToken)?;

    Ok(AuthAccount {
        id: data.claims.sub,
        role: data.claims.role,
    })
}

pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AccountError> {
    let auth = authenticate(&state, &jar, request.headers())?;
    request.extensions_mut().insert(auth);
    Ok(next.run(request).await)
}

pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AccountError> {
    let auth = authenticate(&state, &jar, request.headers())?;

    if auth.role != ROLE_ADMIN {
        return Err(AccountError::PermissionDenied);
    }

    request.extensions_mut().insert(auth);
    Ok(next.run(request).await)
}
