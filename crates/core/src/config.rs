use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Key/value accessor backing every config read.
///
/// Wraps either the process environment or an injected lookup function,
/// so `ChannelsConfig` can be built in tests without touching `std::env`.
/// Empty values are treated as unset.
pub struct EnvSource<'a> {
    profile: String,
    lookup: Box<dyn Fn(&str) -> Option<String> + 'a>,
}

impl<'a> EnvSource<'a> {
    /// Read from the process environment.
    pub fn process(profile: &str) -> Self {
        Self::new(profile, |key| env::var(key).ok())
    }

    /// Read through an arbitrary lookup function.
    pub fn new(profile: &str, lookup: impl Fn(&str) -> Option<String> + 'a) -> Self {
        Self {
            profile: profile.to_uppercase(),
            lookup: Box::new(lookup),
        }
    }

    fn raw(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|s| !s.is_empty())
    }

    /// Read a profiled var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
    pub fn opt(&self, key: &str) -> Option<String> {
        if !self.profile.is_empty() {
            let prefixed = format!("{}_{}", self.profile, key);
            if let Some(v) = self.raw(&prefixed) {
                return Some(v);
            }
        }
        self.raw(key)
    }

    pub fn or(&self, key: &str, default: &str) -> String {
        self.opt(key).unwrap_or_else(|| default.to_string())
    }

    pub fn u16_or(&self, key: &str, default: u16) -> u16 {
        self.opt(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// First non-empty value among `keys`, in order.
    pub fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.opt(key))
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub channels: ChannelsConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `CODERX_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env::var("CODERX_PROFILE").unwrap_or_default();
        Self::from_source(&EnvSource::process(&profile))
    }

    /// Build config through an injected lookup, without reading the process environment.
    pub fn from_lookup(profile: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::from_source(&EnvSource::new(profile, lookup))
    }

    pub fn from_source(src: &EnvSource<'_>) -> Self {
        Self {
            profile: src.profile.clone(),
            server: ServerConfig::from_source(src),
            channels: ChannelsConfig::from_source(src),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:    {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  resend:    configured={}, recipient={}",
            self.channels.resend.is_configured(),
            self.channels.resend.recipient().is_some()
        );
        tracing::info!(
            "  sendgrid:  configured={}, key={}",
            self.channels.sendgrid.is_configured(),
            self.channels.sendgrid.api_key.is_some()
        );
        tracing::info!("  webhook:   configured={}", self.channels.webhook.is_configured());
    }

    /// Return a redacted view safe for API responses (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": { "host": self.server.host, "port": self.server.port },
            "channels": self.channels.redacted_summary(),
        })
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_source(src: &EnvSource<'_>) -> Self {
        Self {
            host: src.or("HOST", "0.0.0.0"),
            port: src.u16_or("PORT", 3001),
        }
    }
}

// ── Channels ──────────────────────────────────────────────────

/// Configuration for every notification channel, in dispatch order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelsConfig {
    pub resend: ResendConfig,
    pub sendgrid: SendGridConfig,
    pub webhook: WebhookConfig,
}

impl ChannelsConfig {
    /// Read only the channel settings from the process environment.
    pub fn from_env() -> Self {
        let profile = env::var("CODERX_PROFILE").unwrap_or_default();
        Self::from_source(&EnvSource::process(&profile))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::from_source(&EnvSource::new("", lookup))
    }

    pub fn from_source(src: &EnvSource<'_>) -> Self {
        Self {
            resend: ResendConfig::from_source(src),
            sendgrid: SendGridConfig::from_source(src),
            webhook: WebhookConfig::from_source(src),
        }
    }

    /// True when at least one channel could be attempted.
    pub fn any_configured(&self) -> bool {
        self.resend.is_configured() || self.sendgrid.is_configured() || self.webhook.is_configured()
    }

    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "resend": {
                "configured": self.resend.is_configured(),
                "has_recipient": self.resend.recipient().is_some(),
                "from_email": self.resend.from_email,
            },
            "sendgrid": {
                "configured": self.sendgrid.is_configured(),
                "has_key": self.sendgrid.api_key.is_some(),
            },
            "webhook": { "configured": self.webhook.is_configured() },
        })
    }
}

/// Shared destination mailbox. Takes precedence over provider-specific recipients.
const CONTACT_EMAIL: &str = "CONTACT_EMAIL";

pub const RESEND_DEFAULT_FROM: &str = "onboarding@resend.dev";
pub const RESEND_DEFAULT_URL: &str = "https://api.resend.com/emails";
pub const SENDGRID_DEFAULT_URL: &str = "https://api.sendgrid.com/v3/mail/send";

// ── Resend ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendConfig {
    pub api_key: Option<String>,
    pub from_email: String,
    /// `CONTACT_EMAIL`, else `RESEND_TO_EMAIL`.
    pub to_email: Option<String>,
    pub api_url: String,
}

impl Default for ResendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from_email: RESEND_DEFAULT_FROM.to_string(),
            to_email: None,
            api_url: RESEND_DEFAULT_URL.to_string(),
        }
    }
}

impl ResendConfig {
    fn from_source(src: &EnvSource<'_>) -> Self {
        Self {
            api_key: src.opt("RESEND_API_KEY"),
            from_email: src.or("RESEND_FROM_EMAIL", RESEND_DEFAULT_FROM),
            to_email: src.first_of(&[CONTACT_EMAIL, "RESEND_TO_EMAIL"]),
            api_url: src.or("RESEND_API_URL", RESEND_DEFAULT_URL),
        }
    }

    /// Resend is attempted whenever its API key is set, recipient or not.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn recipient(&self) -> Option<&str> {
        self.to_email.as_deref()
    }
}

// ── SendGrid ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendGridConfig {
    pub api_key: Option<String>,
    pub from_email: Option<String>,
    /// `CONTACT_EMAIL`, else `SENDGRID_TO_EMAIL`.
    pub to_email: Option<String>,
    pub api_url: String,
}

impl Default for SendGridConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from_email: None,
            to_email: None,
            api_url: SENDGRID_DEFAULT_URL.to_string(),
        }
    }
}

impl SendGridConfig {
    fn from_source(src: &EnvSource<'_>) -> Self {
        Self {
            api_key: src.opt("SENDGRID_API_KEY"),
            from_email: src.opt("SENDGRID_FROM_EMAIL"),
            to_email: src.first_of(&[CONTACT_EMAIL, "SENDGRID_TO_EMAIL"]),
            api_url: src.or("SENDGRID_API_URL", SENDGRID_DEFAULT_URL),
        }
    }

    /// Key, sender and recipient must all be present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.from_email.is_some() && self.to_email.is_some()
    }
}

// ── Webhook ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub url: Option<String>,
}

impl WebhookConfig {
    fn from_source(src: &EnvSource<'_>) -> Self {
        Self {
            url: src.opt("CONTACT_WEBHOOK_URL"),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}
