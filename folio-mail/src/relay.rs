use std::sync::Arc;

use folio_core::{FolioConfigSnapshot, FolioError, FolioResult};

use crate::{ContactMessage, DeliveryReceipt, MailTransport, OutboundMail};

pub const DEFAULT_FROM_NAME: &str = "Portfolio Contact";
pub const DEFAULT_SENDER: &str = "portfolio@localhost";

/// Addressing used for every relayed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub recipient: String,
    pub from_name: String,
    pub from_address: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_SENDER.to_string(),
            from_name: DEFAULT_FROM_NAME.to_string(),
            from_address: DEFAULT_SENDER.to_string(),
        }
    }
}

impl MailSettings {
    /// `mail.user` is both the sender and, unless `mail.recipient` is set,
    /// the recipient: the site owner mails themselves.
    pub fn from_config(config: &FolioConfigSnapshot) -> Self {
        let defaults = Self::default();
        let sender = config
            .get_string("mail.user")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.from_address);

        Self {
            recipient: config
                .get_string("mail.recipient")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| sender.clone()),
            from_name: config
                .get_string("mail.from_name")
                .unwrap_or(defaults.from_name),
            from_address: sender,
        }
    }

    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = recipient.into();
        self
    }
}

/// Validates contact submissions and forwards them to a transport.
#[derive(Clone)]
pub struct MailRelay {
    transport: Arc<dyn MailTransport>,
    settings: MailSettings,
}

impl MailRelay {
    pub fn new(transport: Arc<dyn MailTransport>, settings: MailSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Exactly one delivery attempt per valid message; none for an invalid one.
    pub async fn send(&self, contact: &ContactMessage) -> FolioResult<DeliveryReceipt> {
        contact.validate()?;

        tracing::info!(
            name = contact.name.trim(),
            email = contact.email.trim(),
            message_len = contact.message.trim().len(),
            "contact form submission"
        );

        let mail = OutboundMail::from_contact(contact, &self.settings);
        match self.transport.deliver(&mail).await {
            Ok(receipt) => {
                tracing::info!(
                    message_id = %receipt.message_id,
                    transport = receipt.transport,
                    "contact message delivered"
                );
                Ok(receipt)
            }
            Err(err) => {
                tracing::error!(error = %err, transport = self.transport.name(), "contact delivery failed");
                Err(
                    FolioError::general_error("Failed to send message. Please try again later.")
                        .with_source(err)
                        .into_anyhow(),
                )
            }
        }
    }
}
