//! Ordered fallback across notification channels.
//!
//! The dispatcher tries each configured channel in priority order and
//! stops at the first one that delivers. A failing channel is logged and
//! skipped; nothing is retried.

use std::sync::Arc;

use coderx_core::ChannelsConfig;

use crate::inquiry::Inquiry;
use crate::resend::ResendNotifier;
use crate::sendgrid::SendGridNotifier;
use crate::templating::TemplateRenderer;
use crate::traits::{ChannelAttempt, Notifier};
use crate::webhook::WebhookNotifier;

/// Why no channel delivered an inquiry. Messages are aimed at operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    /// Resend has a key but no destination mailbox.
    #[error("Email service misconfigured: RESEND_API_KEY is set but CONTACT_EMAIL or RESEND_TO_EMAIL is missing")]
    MissingRecipient,

    /// At least one channel was attempted and every attempt failed.
    #[error("Failed to deliver contact form notification. Check RESEND_API_KEY, SENDGRID_API_KEY, or CONTACT_WEBHOOK_URL configuration")]
    DeliveryFailed,

    #[error("Email service not configured. Please configure RESEND_API_KEY, SENDGRID_API_KEY, or CONTACT_WEBHOOK_URL")]
    NotConfigured,
}

impl FailureReason {
    /// Classify a total failure from the channel configuration.
    pub fn classify(config: &ChannelsConfig) -> Self {
        if config.resend.is_configured() && config.resend.recipient().is_none() {
            FailureReason::MissingRecipient
        } else if config.any_configured() {
            FailureReason::DeliveryFailed
        } else {
            FailureReason::NotConfigured
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{reason}")]
    NotDelivered {
        reason: FailureReason,
        attempts: Vec<ChannelAttempt>,
    },
}

/// A successful dispatch: which channel delivered, and every attempt made.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub channel: String,
    pub attempts: Vec<ChannelAttempt>,
}

/// Delivers an inquiry through the first working channel.
pub struct Dispatcher {
    channels: Vec<Box<dyn Notifier>>,
    /// Reported when every channel fails.
    failure: FailureReason,
}

impl Dispatcher {
    /// Build the chain Resend -> SendGrid -> webhook from configuration.
    ///
    /// Resend joins whenever its key is set; SendGrid only when key, sender
    /// and recipient are all present; the webhook when a URL is set.
    pub fn from_config(config: &ChannelsConfig, client: reqwest::Client) -> Self {
        let renderer = Arc::new(TemplateRenderer::new());
        let mut channels: Vec<Box<dyn Notifier>> = Vec::with_capacity(3);

        if let Some(n) = ResendNotifier::from_config(&config.resend, renderer.clone(), client.clone())
        {
            channels.push(Box::new(n));
        }
        match SendGridNotifier::from_config(&config.sendgrid, renderer, client.clone()) {
            Some(n) => channels.push(Box::new(n)),
            None if config.sendgrid.api_key.is_some() => {
                tracing::debug!("SENDGRID_API_KEY set without sender or recipient, skipping sendgrid");
            }
            None => {}
        }
        if let Some(n) = WebhookNotifier::from_config(&config.webhook, client) {
            channels.push(Box::new(n));
        }

        Self {
            channels,
            failure: FailureReason::classify(config),
        }
    }

    /// Create a dispatcher over an explicit channel list.
    pub fn with_channels(channels: Vec<Box<dyn Notifier>>, failure: FailureReason) -> Self {
        Self { channels, failure }
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.channel_name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Try each channel in order until one delivers.
    ///
    /// Channels run strictly one after another; once a channel succeeds
    /// the remaining ones are never called.
    pub async fn dispatch(&self, inquiry: &Inquiry) -> Result<Delivery, DispatchError> {
        let mut attempts = Vec::with_capacity(self.channels.len());

        for channel in &self.channels {
            let start = std::time::Instant::now();
            let result = channel.send(inquiry).await;
            let duration_ms = start.elapsed().as_millis() as u64;
            let name = channel.channel_name();

            match result {
                Ok(()) => {
                    tracing::info!(channel = name, duration_ms, "Contact form notification sent");
                    attempts.push(ChannelAttempt {
                        channel: name.to_string(),
                        success: true,
                        error: None,
                        duration_ms,
                    });
                    return Ok(Delivery {
                        channel: name.to_string(),
                        attempts,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        channel = name,
                        error = %e,
                        duration_ms,
                        "Notification channel failed, trying next"
                    );
                    attempts.push(ChannelAttempt {
                        channel: name.to_string(),
                        success: false,
                        error: Some(e.to_string()),
                        duration_ms,
                    });
                }
            }
        }

        tracing::error!(
            reason = ?self.failure,
            attempted = attempts.len(),
            "Contact form notification not delivered"
        );
        Err(DispatchError::NotDelivered {
            reason: self.failure,
            attempts,
        })
    }
}
