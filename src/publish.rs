//! The one-shot newsletter send.

use crate::domain::{
    CurrencyPair,
    Quote,
};
use crate::email_client::{
    Mailer,
    MailerError,
};
use crate::rates::{
    RateError,
    RateSource,
};
use crate::subscribers::SubscriberStore;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("failed to fetch the exchange rate: {0}")]
    Rate(#[from] RateError),
    #[error("failed to list subscribers: {0}")]
    Store(#[from] sqlx::Error),
    #[error("failed to send the newsletter: {0}")]
    Mail(#[from] MailerError),
}

pub fn newsletter_subject(quote: &Quote) -> String {
    format!(
        "Your daily {} to {} exchange rate newsletter",
        quote.from, quote.to
    )
}

pub fn newsletter_body(quote: &Quote) -> String {
    format!("The today's exchange rate is {:.2}", quote.rate)
}

/// Mail the current `pair` rate to every subscriber.
///
/// The rate is fetched once and the subscribers are listed once. Nothing is
/// retried: any failure aborts the run. Returns the number of recipients.
#[tracing::instrument(
    name = "publishing newsletter",
    skip(store, rate_source, mailer),
    fields(from = %pair.from, to = %pair.to)
)]
pub async fn publish_newsletter(
    store: &SubscriberStore,
    rate_source: &dyn RateSource,
    mailer: &dyn Mailer,
    pair: &CurrencyPair,
) -> Result<usize, PublishError> {
    let quote = rate_source.fetch(&pair.from, &pair.to).await?;
    let recipients = store.list_emails().await?;

    mailer
        .send(&recipients, &newsletter_subject(&quote), &newsletter_body(&quote))
        .await?;

    tracing::info!("Sent {} emails", recipients.len());
    Ok(recipients.len())
}
