//! Generic HTTP webhook notifier (last-resort channel).
//!
//! Posts the raw inquiry fields as JSON to a configured URL, for
//! automation services such as Zapier or Make. No authentication.

use chrono::{SecondsFormat, Utc};
use coderx_core::WebhookConfig;
use serde::Serialize;

use crate::inquiry::Inquiry;
use crate::traits::{ensure_success, Notifier, NotifyError};

/// Value of the `source` field on every webhook payload.
pub const WEBHOOK_SOURCE: &str = "contact-form";

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    source: &'static str,
    /// ISO 8601, UTC, millisecond precision.
    timestamp: String,
    #[serde(flatten)]
    inquiry: &'a Inquiry,
}

/// Delivers inquiries as JSON to a webhook URL.
#[derive(Debug)]
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: String, client: reqwest::Client) -> Self {
        Self { url, client }
    }

    /// Build from config. Returns `None` when no URL is configured.
    pub fn from_config(config: &WebhookConfig, client: reqwest::Client) -> Option<Self> {
        config.url.clone().map(|url| Self::new(url, client))
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    /// Deliver the inquiry as a JSON payload to the configured webhook URL.
    async fn send(&self, inquiry: &Inquiry) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            source: WEBHOOK_SOURCE,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            inquiry,
        };

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();

        if let Err(e) = ensure_success(response).await {
            tracing::warn!(url = %self.url, %status, "webhook returned non-2xx status");
            return Err(e);
        }

        tracing::debug!(url = %self.url, %status, "webhook notification delivered");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "webhook"
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::inquiry::ContactSubmission;

    fn inquiry() -> Inquiry {
        Inquiry::parse(ContactSubmission {
            name: Some("Linus".into()),
            email: Some("linus@example.com".into()),
            subject: Some("API access".into()),
            message: Some("How do I get a key?".into()),
        })
        .unwrap()
    }

    #[test]
    fn from_config_requires_url() {
        assert!(WebhookNotifier::from_config(&WebhookConfig::default(), reqwest::Client::new())
            .is_none());
    }

    #[test]
    fn payload_is_flat_with_iso_timestamp() {
        let inquiry = inquiry();
        let payload = WebhookPayload {
            source: WEBHOOK_SOURCE,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            inquiry: &inquiry,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["source"], "contact-form");
        assert_eq!(value["name"], "Linus");
        assert_eq!(value["email"], "linus@example.com");
        assert_eq!(value["subject"], "API access");
        assert_eq!(value["message"], "How do I get a key?");

        let ts = value["timestamp"].as_str().unwrap();
        assert!(ts.ends_with('Z'), "got: {ts}");
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[tokio::test]
    async fn posts_json_without_auth() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/hooks/contact")
                .header("content-type", "application/json")
                .json_body_includes(
                    json!({
                        "source": "contact-form",
                        "name": "Linus",
                        "email": "linus@example.com",
                        "subject": "API access",
                        "message": "How do I get a key?"
                    })
                    .to_string(),
                )
                .body_includes("\"timestamp\":");
            then.status(200);
        });

        let notifier = WebhookNotifier::new(server.url("/hooks/contact"), reqwest::Client::new());
        notifier.send(&inquiry()).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn server_error_is_an_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/hooks/contact");
            then.status(500).body("boom");
        });

        let notifier = WebhookNotifier::new(server.url("/hooks/contact"), reqwest::Client::new());
        let err = notifier.send(&inquiry()).await.unwrap_err();
        assert!(matches!(err, NotifyError::Status { .. }), "got: {err:?}");
        mock.assert();
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let notifier = WebhookNotifier::new(
            "http://127.0.0.1:9/hooks/contact".into(),
            reqwest::Client::new(),
        );
        let err = notifier.send(&inquiry()).await.unwrap_err();
        assert!(matches!(err, NotifyError::Http(_)), "got: {err:?}");
    }

    #[test]
    fn channel_name_is_webhook() {
        let notifier = WebhookNotifier::new("https://example.com".into(), reqwest::Client::new());
        assert_eq!(notifier.channel_name(), "webhook");
    }
}
