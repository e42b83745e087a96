//! Contact-form notification engine.
//!
//! This crate provides:
//! - `Inquiry` validation for untrusted contact-form submissions
//! - `Notifier` trait for pluggable notification channels
//! - Resend, SendGrid, and webhook notifier implementations
//! - Minijinja rendering of the notification email
//! - Dispatcher that falls back through channels until one delivers

pub mod dispatcher;
pub mod inquiry;
pub mod resend;
pub mod sendgrid;
pub mod templating;
pub mod traits;
pub mod webhook;

pub use dispatcher::{Delivery, DispatchError, Dispatcher, FailureReason};
pub use inquiry::{ContactSubmission, Field, Inquiry, ValidationError};
pub use traits::{ChannelAttempt, Notifier, NotifyError};
