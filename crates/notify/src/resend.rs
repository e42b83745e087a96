//! Resend transactional email notifier (primary channel).
//!
//! Posts a rendered notification to the Resend `emails` endpoint with a
//! bearer token. The inquirer's address is set as `reply_to`.

use std::sync::Arc;

use coderx_core::ResendConfig;
use serde::Serialize;

use crate::inquiry::Inquiry;
use crate::templating::TemplateRenderer;
use crate::traits::{ensure_success, Notifier, NotifyError};

#[derive(Debug, Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: String,
    html: String,
    text: String,
}

/// Delivers inquiries through the Resend HTTP API.
#[derive(Debug)]
pub struct ResendNotifier {
    api_url: String,
    api_key: String,
    from: String,
    /// `None` when neither `CONTACT_EMAIL` nor `RESEND_TO_EMAIL` is set.
    to: Option<String>,
    renderer: Arc<TemplateRenderer>,
    client: reqwest::Client,
}

impl ResendNotifier {
    /// Build from config. Returns `None` when no API key is configured.
    pub fn from_config(
        config: &ResendConfig,
        renderer: Arc<TemplateRenderer>,
        client: reqwest::Client,
    ) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            api_url: config.api_url.clone(),
            api_key,
            from: config.from_email.clone(),
            to: config.to_email.clone(),
            renderer,
            client,
        })
    }
}

#[async_trait::async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, inquiry: &Inquiry) -> Result<(), NotifyError> {
        let to = self.to.as_deref().ok_or_else(|| {
            NotifyError::Config("CONTACT_EMAIL or RESEND_TO_EMAIL not configured".to_string())
        })?;

        let rendered = self.renderer.render(inquiry)?;
        let payload = ResendEmail {
            from: &self.from,
            to,
            reply_to: inquiry.email(),
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if let Err(e) = ensure_success(response).await {
            tracing::warn!(channel = "resend", error = %e, "Resend API error");
            return Err(e);
        }

        tracing::info!(channel = "resend", to, "contact notification delivered");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "resend"
    }
}
