//! SendGrid v3 mail notifier (secondary channel).

use std::sync::Arc;

use coderx_core::SendGridConfig;
use serde::Serialize;

use crate::inquiry::Inquiry;
use crate::templating::TemplateRenderer;
use crate::traits::{ensure_success, Notifier, NotifyError};

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct MailSend<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    reply_to: Address<'a>,
    subject: String,
    /// SendGrid requires `text/plain` before `text/html`.
    content: Vec<Content>,
}

/// Delivers inquiries through the SendGrid `mail/send` API.
#[derive(Debug)]
pub struct SendGridNotifier {
    api_url: String,
    api_key: String,
    from: String,
    to: String,
    renderer: Arc<TemplateRenderer>,
    client: reqwest::Client,
}

impl SendGridNotifier {
    /// Build from config. Returns `None` unless key, sender and recipient are all set.
    pub fn from_config(
        config: &SendGridConfig,
        renderer: Arc<TemplateRenderer>,
        client: reqwest::Client,
    ) -> Option<Self> {
        let (Some(api_key), Some(from), Some(to)) = (
            config.api_key.clone(),
            config.from_email.clone(),
            config.to_email.clone(),
        ) else {
            return None;
        };
        Some(Self {
            api_url: config.api_url.clone(),
            api_key,
            from,
            to,
            renderer,
            client,
        })
    }
}

#[async_trait::async_trait]
impl Notifier for SendGridNotifier {
    async fn send(&self, inquiry: &Inquiry) -> Result<(), NotifyError> {
        let rendered = self.renderer.render(inquiry)?;
        let payload = MailSend {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: &self.to,
                    name: None,
                }],
            }],
            from: Address {
                email: &self.from,
                name: None,
            },
            reply_to: Address {
                email: inquiry.email(),
                name: Some(inquiry.name()),
            },
            subject: rendered.subject,
            content: vec![
                Content {
                    content_type: "text/plain",
                    value: rendered.text,
                },
                Content {
                    content_type: "text/html",
                    value: rendered.html,
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        ensure_success(response).await?;

        tracing::info!(channel = "sendgrid", to = %self.to, "contact notification delivered");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "sendgrid"
    }
}
