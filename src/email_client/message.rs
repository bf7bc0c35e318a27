/// One newsletter email, as handed to a single recipient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewsletterMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl NewsletterMessage {
    pub fn new(recipient: &str, subject: &str, body: &str) -> Self {
        Self {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }
}
