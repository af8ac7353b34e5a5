//! folio-mail: relays contact form submissions as email.
//!
//! [`MailRelay`] validates a submission and hands an [`OutboundMail`] to a
//! [`MailTransport`]. Real SMTP is used when credentials are configured;
//! otherwise submissions land in a bounded in-memory sandbox so the form
//! works in development.

mod message;
mod relay;
mod sandbox;
mod smtp;
mod transport;

pub use message::{ContactMessage, OutboundMail};
pub use relay::{MailRelay, MailSettings, DEFAULT_FROM_NAME};
pub use sandbox::{SandboxMailTransport, SandboxedMail, DEFAULT_SANDBOX_CAPACITY};
pub use smtp::SmtpMailTransport;
pub use transport::{transport_from_config, DeliveryReceipt, MailTransport, DEFAULT_SMTP_RELAY};
