use std::convert::TryFrom;

use lettre::message::Mailbox;

use crate::domain::errors::MalformedInput;

/// Longest accepted email, in bytes.
pub const MAX_LENGTH: usize = 512;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriberEmail(String);

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SubscriberEmail {
    type Error = MalformedInput;

    fn try_from(email: String) -> Result<Self, Self::Error> {
        if email.is_empty() {
            return Err(MalformedInput::MissingEmail);
        }
        if email.len() > MAX_LENGTH {
            return Err(MalformedInput::EmailTooLong {
                length: email.len(),
            });
        }
        // same mailbox grammar the mailer applies when sending
        if email.parse::<Mailbox>().is_err() {
            return Err(MalformedInput::InvalidEmail { email });
        }
        Ok(Self(email))
    }
}
