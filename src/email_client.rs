//! Mail delivery for the newsletter.

pub use client::SmtpMailer;
pub use errors::MailerError;
pub use message::NewsletterMessage;
pub use recording::RecordingMailer;

mod client;
mod errors;
mod message;
mod recording;

use async_trait::async_trait;

/// Delivers one subject/body pair to many recipients.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the message to every recipient.
    ///
    /// A recipient that is not a valid address is skipped and logged, any
    /// other failure aborts the whole batch.
    async fn send(&self, recipients: &[String], subject: &str, body: &str)
        -> Result<(), MailerError>;

    /// Release the transport. The mailer must not be used afterwards.
    async fn close(&self) {}
}
