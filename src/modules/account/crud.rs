use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, Utc};

use crate::config::DbPool;
use crate::modules::account::model::{Account, AccountStatus, ROLE_ADMIN, ROLE_USER};
use crate::modules::account::schema::ApiResponse;
use crate::services::{hashing, jwt::JwtService};

/// Everything that can go wrong in the credential subsystem, mapped onto the
/// response envelope by the `IntoResponse` impl below.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Provide {0}")]
    MissingFields(&'static str),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Email is already registered")]
    EmailAlreadyRegistered,

    #[error("{0} not registered")]
    NotRegistered(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Contact Super Admin for activation")]
    Inactive,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("OTP expired, request a new one")]
    OtpExpired,

    #[error("Provide an access token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Mail error: {0}")]
    Mail(String),
}

impl AccountError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields(_)
            | Self::InvalidEmail
            | Self::EmailAlreadyRegistered
            | Self::NotRegistered(_)
            | Self::Inactive
            | Self::IncorrectPassword
            | Self::InvalidVerificationCode
            | Self::InvalidOtp
            | Self::OtpExpired => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingToken | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::Database(_) | Self::Hashing(_) | Self::Token(_) | Self::Mail(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ApiResponse::fail(self.to_string()))).into_response()
    }
}

pub struct LoginOutcome {
    pub account: Account,
    pub access_token: String,
    pub refresh_token: String,
}

/// Data access for one of the two structurally identical account tables.
pub struct AccountCrud<'a> {
    pool: DbPool,
    table: &'static str,
    role: &'static str,
    jwt: &'a JwtService,
}

impl<'a> AccountCrud<'a> {
    pub fn admins(pool: DbPool, jwt: &'a JwtService) -> Self {
        Self { pool, table: "admins", role: ROLE_ADMIN, jwt }
    }

    pub fn users(pool: DbPool, jwt: &'a JwtService) -> Self {
        Self { pool, table: "users", role: ROLE_USER, jwt }
    }

    /// "Admin" or "User", used for role tagging and response messages.
    pub fn role(&self) -> &'static str {
        self.role
    }

    pub async fn create(&self, account: &Account) -> Result<(), AccountError> {
        let query = format!(
            "INSERT INTO {} (id, name, email, password_hash, role, status, verify_email, \
             last_login_date, refresh_token, avatar, forgot_password_otp, \
             forgot_password_expiry, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            self.table
        );

        sqlx::query(&query)
            .bind(&account.id)
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.role)
            .bind(account.status)
            .bind(account.verify_email)
            .bind(account.last_login_date)
            .bind(&account.refresh_token)
            .bind(&account.avatar)
            .bind(&account.forgot_password_otp)
            .bind(account.forgot_password_expiry)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                // The UNIQUE email index is the backstop against
                // duplicate-registration races.
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AccountError::EmailAlreadyRegistered
                }
                _ => AccountError::from(e),
            })?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Account>, AccountError> {
        let query = format!("SELECT * FROM {} WHERE id = ?", self.table);

        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AccountError::from)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let query = format!("SELECT * FROM {} WHERE email = ?", self.table);

        sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AccountError::from)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AccountError> {
        let query = format!("SELECT COUNT(*) FROM {} WHERE email = ?", self.table);

        let result: (i64,) = sqlx::query_as(&query)
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0 > 0)
    }

    /// Full credential check: find the account, gate on status, verify the
    /// password, mint both tokens, then persist the refresh token and the
    /// login timestamp. The persisted refresh token is what makes logout able
    /// to invalidate the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AccountError> {
        let account = self
            .find_by_email(email)
            .await?
            .ok_or(AccountError::NotRegistered(self.role))?;

        if account.status != AccountStatus::Active {
            return Err(AccountError::Inactive);
        }

        let is_valid = hashing::verify_password(password, &account.password_hash)
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        if !is_valid {
            return Err(AccountError::IncorrectPassword);
        }

        let access_token = self.jwt.create_access_token(&account.id, &account.role)?;
        let refresh_token = self.jwt.create_refresh_token(&account.id)?;

        let query = format!(
            "UPDATE {} SET last_login_date = ?, refresh_token = ?, updated_at = ? WHERE id = ?",
            self.table
        );

        let now = Utc::now();
        sqlx::query(&query)
            .bind(now)
            .bind(&refresh_token)
            .bind(now)
            .bind(&account.id)
            .execute(&self.pool)
            .await?;

        Ok(LoginOutcome {
            account,
            access_token,
            refresh_token,
        })
    }

    /// Verifies a refresh token against both its signature and the stored
    /// copy (blanked on logout), then mints a fresh access token. The refresh
    /// token itself is left untouched.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AccountError> {
        let data = self
            .jwt
            .verify_refresh_token(refresh_token)
            .map_err(|_| AccountError::InvalidToken)?;

        let account = self
            .find_by_id(&data.claims.sub)
            .await?
            .ok_or(AccountError::InvalidToken)?;

        if account.refresh_token != refresh_token {
            return Err(AccountError::InvalidToken);
        }

        Ok(self.jwt.create_access_token(&account.id, &account.role)?)
    }

    pub async fn clear_refresh_token(&self, id: &str) -> Result<(), AccountError> {
        let query = format!(
            "UPDATE {} SET refresh_token = '', updated_at = ? WHERE id = ?",
            self.table
        );

        sqlx::query(&query)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn mark_email_verified(&self, id: &str) -> Result<(), AccountError> {
        let query = format!(
            "UPDATE {} SET verify_email = TRUE, updated_at = ? WHERE id = ?",
            self.table
        );

        let result = sqlx::query(&query)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AccountError::InvalidVerificationCode);
        }

        Ok(())
    }

    /// Stores a recovery OTP with a 1 hour deadline and returns the account
    /// it was stored for.
    pub async fn store_password_otp(&self, email: &str, otp: &str) -> Result<Account, AccountError> {
        let account = self
            .find_by_email(email)
            .await?
            .ok_or(AccountError::NotRegistered(self.role))?;

        let query = format!(
            "UPDATE {} SET forgot_password_otp = ?, forgot_password_expiry = ?, updated_at = ? \
             WHERE id = ?",
            self.table
        );

        let now = Utc::now();
        sqlx::query(&query)
            .bind(otp)
            .bind(now + Duration::hours(1))
            .bind(now)
            .bind(&account.id)
            .execute(&self.pool)
            .await?;

        Ok(account)
    }

    /// Consumes a recovery OTP: checks presence, expiry, and equality, then
    /// replaces the password hash and clears the OTP.
    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        let account = self
            .find_by_email(email)
            .await?
            .ok_or(AccountError::NotRegistered(self.role))?;

        let (Some(stored_otp), Some(expiry)) =
            (&account.forgot_password_otp, account.forgot_password_expiry)
        else {
            return Err(AccountError::InvalidOtp);
        };

        if Utc::now() > expiry {
            return Err(AccountError::OtpExpired);
        }

        if stored_otp != otp {
            return Err(AccountError::InvalidOtp);
        }

        let password_hash = hashing::hash_password(new_password)
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        let query = format!(
            "UPDATE {} SET password_hash = ?, forgot_password_otp = NULL, \
             forgot_password_expiry = NULL, updated_at = ? WHERE id = ?",
            self.table
        );

        sqlx::query(&query)
            .bind(&password_hash)
            .bind(Utc::now())
            .bind(&account.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
