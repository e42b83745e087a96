//! Contact-form inquiries and their validation.
//!
//! A [`ContactSubmission`] is the raw request body; an [`Inquiry`] only
//! exists once every field has passed validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound on `message`, in characters.
pub const MAX_MESSAGE_CHARS: usize = 10_000;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Check the `local@domain.tld` shape. No whitespace, exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Untrusted form payload as posted by the browser.
///
/// A field that is present but not a JSON string deserializes as `None`,
/// so it is reported as missing rather than failing the whole body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmission {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientString {
    Text(String),
    Other(IgnoredAny),
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientString::deserialize(deserializer)? {
        LenientString::Text(s) => Some(s),
        LenientString::Other(_) => None,
    })
}

/// Required inquiry fields, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a submission was rejected. Display strings are returned to the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required fields: name, email, subject, and message are required")]
    MissingField(Field),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Message is too long")]
    MessageTooLong { len: usize },
}

/// A validated contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inquiry {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl Inquiry {
    /// Validate a raw submission.
    ///
    /// Presence of all four fields is checked before the email format, and
    /// the email format before the message length.
    pub fn parse(submission: ContactSubmission) -> Result<Self, ValidationError> {
        let name = required(submission.name, Field::Name)?;
        let email = required(submission.email, Field::Email)?;
        let subject = required(submission.subject, Field::Subject)?;
        let message = required(submission.message, Field::Message)?;

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }

        let len = message.chars().count();
        if len > MAX_MESSAGE_CHARS {
            return Err(ValidationError::MessageTooLong { len });
        }

        Ok(Self {
            name,
            email,
            subject,
            message,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl TryFrom<ContactSubmission> for Inquiry {
    type Error = ValidationError;

    fn try_from(submission: ContactSubmission) -> Result<Self, Self::Error> {
        Self::parse(submission)
    }
}

fn required(value: Option<String>, field: Field) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField(field))
}
