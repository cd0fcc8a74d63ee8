use reqwest::Client;
use serde_json::json;

use crate::error::{Error, Result};

/// Thin client for the external mail-sending collaborator: a single
/// authenticated POST of `{to, subject, html}`. Template design and actual
/// SMTP delivery live on the other side of this seam.
#[derive(Clone)]
pub struct MailerService {
    client: Client,
    target_url: String,
}

impl MailerService {
    pub fn new(target_url: String) -> Self {
        Self {
            client: Client::new(),
            target_url,
        }
    }

    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        let secret = crate::config::get_config().webhook_secret.clone();
        let resp = self
            .client
            .post(&self.target_url)
            .header("X-Webhook-Secret", secret)
            .json(&json!({ "to": to, "subject": subject, "html": html }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Error::Internal(format!(
                "Mailer responded with status {}",
                resp.status()
            )));
        }
        Ok(())
    }
}
