use async_trait::async_trait;
use derivative::Derivative;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Message,
    Tokio1Executor,
};

use crate::app::EmailClientSettings;
use crate::email_client::{
    Mailer,
    MailerError,
};

/// Mailer delivering over one pooled, authenticated SMTP transport.
///
/// Connections are opened on the first send and reused for every message of
/// the batch.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct SmtpMailer {
    #[derivative(Debug = "ignore")]
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &EmailClientSettings) -> Result<Self, MailerError> {
        let sender = settings.sender_email.parse::<Mailbox>()?;
        // `ssl` selects implicit TLS, otherwise the session must upgrade with STARTTLS.
        let builder = if settings.ssl {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        };
        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self { transport, sender })
    }

    /// Build one message per recipient, skipping recipients that are not valid
    /// addresses.
    fn build_messages(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<Vec<Message>, MailerError> {
        let mut messages = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            let mailbox = match recipient.parse::<Mailbox>() {
                Ok(mailbox) => mailbox,
                Err(e) => {
                    tracing::warn!("Invalid email address: {} ({})", recipient, e);
                    continue;
                }
            };
            let message = Message::builder()
                .from(self.sender.clone())
                .to(mailbox)
                .subject(subject)
                .header(ContentType::TEXT_PLAIN)
                .body(body.to_string())?;
            messages.push(message);
        }
        Ok(messages)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[tracing::instrument(
        name = "sending newsletter emails",
        skip(self, recipients, body),
        fields(recipients = recipients.len())
    )]
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), MailerError> {
        for message in self.build_messages(recipients, subject, body)? {
            self.transport.send(message).await?;
        }
        Ok(())
    }

    /// Say QUIT on every pooled connection.
    async fn close(&self) {
        self.transport.shutdown().await;
    }
}
