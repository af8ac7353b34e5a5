use std::sync::Arc;

use async_trait::async_trait;
use folio_core::FolioConfigSnapshot;
use serde::Serialize;

use crate::{OutboundMail, SandboxMailTransport, SmtpMailTransport, DEFAULT_SANDBOX_CAPACITY};

pub const DEFAULT_SMTP_RELAY: &str = "smtp.gmail.com";

/// What a transport reports back after accepting a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    pub message_id: String,
    pub transport: &'static str,
}

/// Delivers a rendered [`OutboundMail`].
///
/// Any `Err` is treated by the relay as a delivery failure; the error text
/// is never shown to clients outside development.
#[async_trait]
pub trait MailTransport: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(&self, mail: &OutboundMail) -> anyhow::Result<DeliveryReceipt>;
}

/// SMTP when `mail.user` and `mail.pass` are both set, sandbox otherwise.
/// The sandbox keeps the last `mail.sandbox_capacity` messages.
pub fn transport_from_config(
    config: &FolioConfigSnapshot,
) -> anyhow::Result<Arc<dyn MailTransport>> {
    match (config.get_non_empty("mail.user"), config.get_non_empty("mail.pass")) {
        (Some(user), Some(pass)) => {
            let relay = config.get_non_empty("mail.relay").unwrap_or(DEFAULT_SMTP_RELAY);
            tracing::info!(relay, user, "mail: using SMTP transport");
            Ok(Arc::new(SmtpMailTransport::new(relay, user, pass)?))
        }
        _ => {
            let capacity = config
                .get_usize("mail.sandbox_capacity")
                .unwrap_or(DEFAULT_SANDBOX_CAPACITY);
            tracing::info!(capacity, "mail: no credentials configured, using sandbox transport");
            Ok(Arc::new(SandboxMailTransport::with_capacity(capacity)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::FolioConfig;

    #[test]
    fn sandbox_without_credentials() {
        let mut config = FolioConfig::new();
        config.set("mail.user", "someone@example.com");
        let transport = transport_from_config(&config.snapshot()).unwrap();
        assert_eq!(transport.name(), "sandbox");
    }

    #[test]
    fn smtp_with_credentials() {
        let mut config = FolioConfig::new();
        config.set("mail.user", "someone@example.com");
        config.set("mail.pass", "app-password");
        let transport = transport_from_config(&config.snapshot()).unwrap();
        assert_eq!(transport.name(), "smtp");
    }
}
