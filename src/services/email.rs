use reqwest::Client;

/// Transactional mail client for the Resend HTTP API.
///
/// When no API key is configured the client degrades to a logged no-op so
/// local development and tests run without a mail provider.
pub struct MailClient {
    client: Client,
    api_key: Option<String>,
    from: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Mail provider returned status: {0}")]
    Provider(String),
}

impl MailClient {
    pub fn new(api_key: Option<String>, from: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            from,
            base_url: "https://api.resend.com".to_string(),
        }
    }

    pub async fn send(&self, to: &str, subject: &str, html: String) -> Result<(), MailError> {
        let Some(api_key) = &self.api_key else {
            tracing::warn!(to, subject, "mail client not configured, skipping send");
            return Ok(());
        };

        let url = format!("{}/emails", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&serde_json::json!({
                "from": self.from,
                "to": [to],
                "subject": subject,
                "html": html,
            }))
            .send()
            .await
            .map_err(|e| MailError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailError::Provider(response.status().to_string()));
        }

        tracing::debug!(to, subject, "mail sent");
        Ok(())
    }
}

pub fn verify_email_template(name: &str, url: &str) -> String {
    format!(
        r#"<div style="font-family: sans-serif; max-width: 480px;">
    <p>Dear {name},</p>
    <p>Thank you for registering with Storefront. Please confirm your email address to finish setting up your account.</p>
    <p>
        <a href="{url}" style="background: #071263; color: #fff; padding: 12px 20px; text-decoration: none; border-radius: 4px;">
            Verify Email
        </a>
    </p>
    <p>If you did not create this account, you can ignore this message.</p>
</div>"#
    )
}

pub fn forgot_password_template(name: &str, otp: &str) -> String {
    format!(
        r#"<div style="font-family: sans-serif; max-width: 480px;">
    <p>Dear {name},</p>
    <p>You requested a password reset. Use the following one-time code, it is valid for 1 hour:</p>
    <p style="font-size: 24px; font-weight: bold; letter-spacing: 4px;">{otp}</p>
    <p>If you did not request this, you can ignore this message.</p>
</div>"#
    )
}
