use std::env;

/// Runtime mode. Production tightens cookie flags (Secure + SameSite=None);
/// anything else stays browser-friendly for local development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
}

/// Environment configuration
/// Loads and validates environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub frontend_url: String,
    pub run_mode: RunMode,
    pub port: u16,
    pub database_url: String,
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    pub resend_api_key: Option<String>,
    pub mail_from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let frontend_url = env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        let run_mode = match env::var("RUN_MODE").as_deref() {
            Ok("production") => RunMode::Production,
            _ => RunMode::Development,
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let access_token_secret = env::var("ACCESS_TOKEN_SECRET")
            .map_err(|_| "ACCESS_TOKEN_SECRET must be set".to_string())?;

        let refresh_token_secret = env::var("REFRESH_TOKEN_SECRET")
            .map_err(|_| "REFRESH_TOKEN_SECRET must be set".to_string())?;

        // Mail sending degrades to a logged no-op when the key is absent.
        let resend_api_key = env::var("RESEND_API_KEY").ok().filter(|k| !k.is_empty());

        let mail_from = env::var("MAIL_FROM")
            .unwrap_or_else(|_| "Storefront <noreply@storefront.example>".to_string());

        Ok(Self {
            frontend_url,
            run_mode,
            port,
            database_url,
            access_token_secret,
            refresh_token_secret,
            resend_api_key,
            mail_from,
        })
    }
}
