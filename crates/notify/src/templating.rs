//! Minijinja rendering of the notification email.
//!
//! Both templates are compiled into the binary and registered once. The
//! HTML template is named `*.html`, so minijinja auto-escapes every
//! interpolated field.

use minijinja::value::Value;
use minijinja::{Environment, HtmlEscape};

use crate::inquiry::Inquiry;
use crate::traits::NotifyError;

const HTML_TEMPLATE: &str = r#"<h2>New Contact Form Submission</h2>
<p><strong>From:</strong> {{ name }} ({{ email }})</p>
<p><strong>Subject:</strong> {{ subject }}</p>
<hr>
<h3>Message:</h3>
<p>{{ message | nl2br }}</p>"#;

const TEXT_TEMPLATE: &str = "New Contact Form Submission

From: {{ name }} ({{ email }})
Subject: {{ subject }}

Message:
{{ message }}";

/// Prefix for the notification subject line.
pub const SUBJECT_PREFIX: &str = "Contact Form: ";

/// Subject, HTML and plain-text parts of a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Renders inquiries into notification messages.
#[derive(Debug)]
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Create a renderer with the built-in contact templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_filter("nl2br", nl2br_filter);
        // Both templates are constants; a syntax error is caught by the tests below.
        env.add_template("contact.html", HTML_TEMPLATE)
            .expect("html template parses");
        env.add_template("contact.txt", TEXT_TEMPLATE)
            .expect("text template parses");
        Self { env }
    }

    /// Render all three parts of the notification for `inquiry`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Template`] if rendering fails.
    pub fn render(&self, inquiry: &Inquiry) -> Result<RenderedMessage, NotifyError> {
        let html = self.render_named("contact.html", inquiry)?;
        let text = self.render_named("contact.txt", inquiry)?;
        Ok(RenderedMessage {
            subject: format!("{SUBJECT_PREFIX}{}", inquiry.subject()),
            html,
            text,
        })
    }

    fn render_named(&self, name: &str, inquiry: &Inquiry) -> Result<String, NotifyError> {
        self.env
            .get_template(name)
            .and_then(|tmpl| tmpl.render(inquiry))
            .map_err(|e| NotifyError::Template(e.to_string()))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Custom filter: escape HTML, then turn newlines into `<br>`.
fn nl2br_filter(value: String) -> Value {
    Value::from_safe_string(HtmlEscape(&value).to_string().replace('\n', "<br>"))
}
