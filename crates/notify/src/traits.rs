//! Notifier trait definition and shared error types.

use crate::inquiry::Inquiry;

/// Errors that can occur during notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template rendering failed: {0}")]
    Template(String),
}

/// A single notification channel in the fallback chain.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver the inquiry through this channel.
    async fn send(&self, inquiry: &Inquiry) -> Result<(), NotifyError>;

    /// Human-readable name for this channel (e.g., "resend", "webhook").
    fn channel_name(&self) -> &str;
}

/// Outcome of one channel attempt during a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelAttempt {
    pub channel: String,
    pub success: bool,
    pub error: Option<String>,
    pub duration_ms: u64,
}

/// Turn a non-2xx response into [`NotifyError::Status`], keeping the body for logs.
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<(), NotifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(NotifyError::Status { status, body })
}
