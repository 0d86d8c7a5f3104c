//! Validated contact form submission and its rendered notification bodies.

use serde::Serialize;

use crate::domain::foundation::ValidationError;

/// A visitor's contact form submission after validation.
///
/// Name and message are trimmed and guaranteed non-empty. A blank email is
/// treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    visitor_name: String,
    visitor_email: Option<String>,
    text: String,
}

impl ContactMessage {
    /// Validates and normalizes a raw submission.
    ///
    /// # Errors
    ///
    /// `ValidationError::EmptyField` for `visitorName` or `message` when the
    /// value is missing or whitespace only. The name is checked first.
    pub fn new(
        visitor_name: impl AsRef<str>,
        text: impl AsRef<str>,
        visitor_email: Option<impl AsRef<str>>,
    ) -> Result<Self, ValidationError> {
        let visitor_name = visitor_name.as_ref().trim();
        if visitor_name.is_empty() {
            return Err(ValidationError::empty_field("visitorName"));
        }

        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(ValidationError::empty_field("message"));
        }

        let visitor_email = visitor_email
            .map(|e| e.as_ref().trim().to_string())
            .filter(|e| !e.is_empty());

        Ok(Self {
            visitor_name: visitor_name.to_string(),
            visitor_email,
            text: text.to_string(),
        })
    }

    pub fn visitor_name(&self) -> &str {
        &self.visitor_name
    }

    pub fn visitor_email(&self) -> Option<&str> {
        self.visitor_email.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Plain-text body for the WhatsApp notification to the owner.
    pub fn chat_body(&self) -> String {
        let mut body = String::from("📬 NEW PORTFOLIO MESSAGE\n\n");
        body.push_str(&format!("👤 From: {}\n", self.visitor_name));
        if let Some(email) = &self.visitor_email {
            body.push_str(&format!("📧 Email: {}\n", email));
        }
        body.push_str(&format!("\n💬 Message:\n{}\n\n---\nSent from: portfolio", self.text));
        body
    }

    /// Subject line for the fallback email.
    pub fn email_subject(&self) -> String {
        format!("Portfolio Contact: Message from {}", self.visitor_name)
    }

    /// HTML body for the fallback email. Visitor input is escaped.
    pub fn email_html(&self) -> String {
        let name = escape_html(&self.visitor_name);
        let email_row = self
            .visitor_email
            .as_deref()
            .map(|e| format!("<p><strong>Email:</strong> {}</p>", escape_html(e)))
            .unwrap_or_default();
        let reply_hint = self
            .visitor_email
            .as_deref()
            .map(escape_html)
            .unwrap_or_else(|| "this email".to_string());
        let text = escape_html(&self.text).replace('\n', "<br>");

        format!(
            concat!(
                "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">",
                "<h2 style=\"color: #10b981;\">New Message from Your Portfolio</h2>",
                "<div style=\"background: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0;\">",
                "<p><strong>Name:</strong> {name}</p>",
                "{email_row}",
                "<hr style=\"border: none; border-top: 1px solid #d1d5db; margin: 20px 0;\">",
                "<p><strong>Message:</strong></p>",
                "<p style=\"word-wrap: break-word;\">{text}</p>",
                "</div>",
                "<p style=\"color: #6b7280; font-size: 12px;\">Reply directly to {reply_hint}.</p>",
                "</div>"
            ),
            name = name,
            email_row = email_row,
            text = text,
            reply_hint = reply_hint,
        )
    }
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
