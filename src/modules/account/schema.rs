use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{Account, AccountStatus};

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Every endpoint answers with this fixed envelope. `data` is omitted when
/// there is nothing to return.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T = serde_json::Value> {
    pub message: String,
    pub error: bool,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            error: false,
            success: true,
            data: Some(data),
        }
    }
}

impl ApiResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: false,
            success: true,
            data: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: true,
            success: false,
            data: None,
        }
    }
}

// =============================================================================
// REGISTER
// =============================================================================

// Fields are optional so a missing one maps to the envelope's 400 rather
// than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Tokens are delivered twice: as HTTP-only cookies and in this payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    pub access_token: String,
    pub refresh_token: String,
}

// =============================================================================
// REFRESH TOKEN
// =============================================================================

#[derive(Debug, Deserialize, Default)]
pub struct RefreshTokenRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenData {
    pub access_token: String,
}

// =============================================================================
// EMAIL VERIFICATION
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub code: Option<String>,
}

// =============================================================================
// PASSWORD RECOVERY
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
    pub new_password: Option<String>,
}

// =============================================================================
// ACCOUNT DETAILS
// =============================================================================

/// The account as clients see it. Never carries the password hash, the
/// refresh token, or the recovery OTP.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: AccountStatus,
    pub verify_email: bool,
    pub last_login_date: Option<DateTime<Utc>>,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
            status: account.status,
            verify_email: account.verify_email,
            last_login_date: account.last_login_date,
            avatar: account.avatar,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
