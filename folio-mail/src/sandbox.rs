use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{DeliveryReceipt, MailTransport, OutboundMail};

pub const DEFAULT_SANDBOX_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
pub struct SandboxedMail {
    pub message_id: String,
    pub received_at: DateTime<Utc>,
    pub mail: OutboundMail,
}

/// Keeps the most recent mail in memory and logs every message. Used when
/// no SMTP credentials are configured.
///
/// The outbox holds at most `capacity` messages; older ones are dropped.
#[derive(Debug)]
pub struct SandboxMailTransport {
    capacity: usize,
    outbox: RwLock<VecDeque<SandboxedMail>>,
}

impl Default for SandboxMailTransport {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SANDBOX_CAPACITY)
    }
}

impl SandboxMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            outbox: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub async fn outbox(&self) -> Vec<SandboxedMail> {
        self.outbox.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.outbox.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.outbox.read().await.is_empty()
    }
}

#[async_trait]
impl MailTransport for SandboxMailTransport {
    fn name(&self) -> &'static str {
        "sandbox"
    }

    async fn deliver(&self, mail: &OutboundMail) -> anyhow::Result<DeliveryReceipt> {
        let message_id = format!("<{}@sandbox.folio>", Uuid::new_v4());

        tracing::info!(
            %message_id,
            to = %mail.to,
            reply_to = %mail.reply_to,
            subject = %mail.subject,
            "sandbox mail captured (not sent)"
        );

        if self.capacity > 0 {
            let mut outbox = self.outbox.write().await;
            while outbox.len() >= self.capacity {
                outbox.pop_front();
            }
            outbox.push_back(SandboxedMail {
                message_id: message_id.clone(),
                received_at: Utc::now(),
                mail: mail.clone(),
            });
        }

        Ok(DeliveryReceipt {
            message_id,
            transport: self.name(),
        })
    }
}
