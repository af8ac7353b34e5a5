use folio_core::{FolioError, FolioResult};
use serde::{Deserialize, Serialize};

use crate::MailSettings;

/// What the contact form posts. Missing fields deserialize as empty so
/// they fail validation rather than JSON parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn validate(&self) -> FolioResult<()> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(FolioError::bad_request("Please provide name, email, and message")
            .with_errors(serde_json::json!({ "missing": missing }))
            .into_anyhow())
    }
}

/// A fully rendered email, independent of any transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    pub from_name: String,
    pub from_address: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl OutboundMail {
    pub fn from_contact(contact: &ContactMessage, settings: &MailSettings) -> Self {
        let name = contact.name.trim();
        let email = contact.email.trim();
        let message = contact.message.trim();

        let text = format!("Name: {name}\nEmail: {email}\n\nMessage:\n{message}\n");
        let html = format!(
            "<h3>New contact form submission</h3>\n\
             <p><strong>Name:</strong> {}</p>\n\
             <p><strong>Email:</strong> {}</p>\n\
             <p><strong>Message:</strong></p>\n\
             <p>{}</p>\n",
            escape_html(name),
            escape_html(email),
            escape_html(message).replace('\n', "<br>"),
        );

        Self {
            from_name: settings.from_name.clone(),
            from_address: settings.from_address.clone(),
            to: settings.recipient.clone(),
            reply_to: email.to_string(),
            subject: format!("Portfolio Contact: Message from {name}"),
            text,
            html,
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
