use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_USER: &str = "User";

/// Lifecycle status. Inactive accounts are rejected at login even with a
/// correct password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "PascalCase")]
pub enum AccountStatus {
    Active,
    Inactive,
}

/// One account record. Admins and users share this shape; they live in the
/// `admins` and `users` tables respectively.
///
/// `password_hash` only ever holds an argon2id hash. `refresh_token` holds
/// the single currently valid refresh token, or the empty string when the
/// account is logged out.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: AccountStatus,
    pub verify_email: bool,
    pub last_login_date: Option<DateTime<Utc>>,
    pub refresh_token: String,
    pub avatar: String,
    pub forgot_password_otp: Option<String>,
    pub forgot_password_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
