//! Request flows shared by the admin and user controllers. The two account
//! kinds are structurally identical; only the table, the role tag, and the
//! response wording differ, so the per-kind controllers stay thin wrappers
//! around these functions.

use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::modules::account::crud::{AccountCrud, AccountError};
use crate::modules::account::model::{Account, AccountStatus};
use crate::modules::account::schema::{
    AccountResponse, LoginRequest, RegisterRequest, TokenData,
};
use crate::services::auth::AuthAccount;
use crate::services::email::verify_email_template;
use crate::services::session::{
    removal_cookie, session_cookie, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE,
};
use crate::AppState;

/// Validate the body, hash the password, persist the account, and send the
/// verification email. The email is awaited in the request path; a provider
/// failure surfaces as the generic 500 envelope.
pub async fn register_flow(
    state: &AppState,
    crud: &AccountCrud<'_>,
    req: RegisterRequest,
) -> Result<AccountResponse, AccountError> {
    let RegisterRequest { name, email, password } = req;

    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return Err(AccountError::MissingFields("name, email, and password"));
    };

    let name = name.trim().to_string();
    let email = email.trim().to_string();

    if !email.validate_email() {
        return Err(AccountError::InvalidEmail);
    }

    if crud.email_exists(&email).await? {
        return Err(AccountError::EmailAlreadyRegistered);
    }

    let password_hash = crate::services::hashing::hash_password(&password)
        .map_err(|e| AccountError::Hashing(e.to_string()))?;

    let now = Utc::now();
    let account = Account {
        id: Uuid::new_v4().to_string(),
        name,
        email,
        password_hash,
        role: crud.role().to_string(),
        status: AccountStatus::Active,
        verify_email: false,
        last_login_date: None,
        refresh_token: String::new(),
        avatar: String::new(),
        forgot_password_otp: None,
        forgot_password_expiry: None,
        created_at: now,
        updated_at: now,
    };

    crud.create(&account).await?;

    let verify_url = format!(
        "{}/verify-email?code={}",
        state.config.frontend_url, account.id
    );

    state
        .mailer
        .send(
            &account.email,
            "Verify your email address",
            verify_email_template(&account.name, &verify_url),
        )
        .await
        .map_err(|e| AccountError::Mail(e.to_string()))?;

    Ok(AccountResponse::from(account))
}

/// Check credentials, then deliver the token pair twice: as HTTP-only
/// cookies and in the JSON payload.
pub async fn login_flow(
    state: &AppState,
    crud: &AccountCrud<'_>,
    jar: CookieJar,
    req: LoginRequest,
) -> Result<(CookieJar, TokenData), AccountError> {
    let LoginRequest { email, password } = req;

    let (Some(email), Some(password)) = (email, password) else {
        return Err(AccountError::MissingFields("email and password"));
    };

    let outcome = crud.login(email.trim(), &password).await?;

    let mode = state.config.run_mode;
    let jar = jar
        .add(session_cookie(ACCESS_TOKEN_COOKIE, outcome.access_token.clone(), mode))
        .add(session_cookie(REFRESH_TOKEN_COOKIE, outcome.refresh_token.clone(), mode));

    Ok((
        jar,
        TokenData {
            access_token: outcome.access_token,
            refresh_token: outcome.refresh_token,
        },
    ))
}

pub async fn details_flow(
    crud: &AccountCrud<'_>,
    auth: &AuthAccount,
) -> Result<AccountResponse, AccountError> {
    let account = crud
        .find_by_id(&auth.id)
        .await?
        .ok_or(AccountError::NotFound(crud.role()))?;

    Ok(AccountResponse::from(account))
}

/// Blank the stored refresh token and clear both cookies with the same flag
/// set they were issued with.
pub async fn logout_flow(
    state: &AppState,
    crud: &AccountCrud<'_>,
    jar: CookieJar,
    auth: &AuthAccount,
) -> Result<CookieJar, AccountError> {
    crud.clear_refresh_token(&auth.id).await?;

    let mode = state.config.run_mode;
    let jar = jar
        .add(removal_cookie(ACCESS_TOKEN_COOKIE, mode))
        .add(removal_cookie(REFRESH_TOKEN_COOKIE, mode));

    Ok(jar)
}
