use std::sync::Mutex;

use async_trait::async_trait;

use crate::email_client::{
    Mailer,
    MailerError,
    NewsletterMessage,
};

/// Mailer keeping every message in memory instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<NewsletterMessage>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, in sending order.
    pub fn messages(&self) -> Vec<NewsletterMessage> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), MailerError> {
        let mut sent = self
            .sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sent.extend(
            recipients
                .iter()
                .map(|recipient| NewsletterMessage::new(recipient, subject, body)),
        );
        Ok(())
    }
}
