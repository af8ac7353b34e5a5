use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use uuid::Uuid;

use crate::{DeliveryReceipt, MailTransport, OutboundMail};

/// Authenticated SMTP over TLS.
#[derive(Clone)]
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn new(relay: &str, user: &str, pass: &str) -> anyhow::Result<Self> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(relay)?
            .credentials(Credentials::new(user.to_string(), pass.to_string()))
            .build();
        Ok(Self { mailer })
    }

    fn build_message(mail: &OutboundMail, message_id: &str) -> anyhow::Result<Message> {
        let from = Mailbox::new(Some(mail.from_name.clone()), mail.from_address.parse()?);

        let message = Message::builder()
            .message_id(Some(message_id.to_string()))
            .from(from)
            .reply_to(mail.reply_to.parse()?)
            .to(mail.to.parse()?)
            .subject(mail.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                mail.text.clone(),
                mail.html.clone(),
            ))?;
        Ok(message)
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn deliver(&self, mail: &OutboundMail) -> anyhow::Result<DeliveryReceipt> {
        let message_id = format!("<{}@folio>", Uuid::new_v4());
        let message = Self::build_message(mail, &message_id)?;

        let response = self.mailer.send(message).await?;
        tracing::debug!(code = %response.code(), %message_id, "smtp accepted message");

        Ok(DeliveryReceipt {
            message_id,
            transport: self.name(),
        })
    }
}
