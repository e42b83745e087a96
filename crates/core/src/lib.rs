//! Shared configuration for the CodeRx contact relay.

pub mod config;

pub use config::{ChannelsConfig, Config, ResendConfig, SendGridConfig, ServerConfig, WebhookConfig};
