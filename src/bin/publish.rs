//! Sends the newsletter once and exits. Meant to be run by an external scheduler.

use anyhow::Context;
use url::Url;

use newsletter::app::{
    load_configuration,
    open_database,
    setup_tracing,
};
use newsletter::email_client::{
    Mailer,
    SmtpMailer,
};
use newsletter::publish::publish_newsletter;
use newsletter::rates::ExchangeRateApi;
use newsletter::subscribers::SubscriberStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing("newsletter-publish".into(), "info".into());

    let configuration = load_configuration()?;
    let mailer =
        SmtpMailer::new(&configuration.email_client).context("Failed to create the mailer")?;
    let pool = open_database(&configuration.database)
        .await
        .context("Failed to open the database")?;
    let rate_source = ExchangeRateApi::new(Url::parse(&configuration.exchange_rates.base_url)?)?;

    let sent = publish_newsletter(
        &SubscriberStore::new(pool.clone()),
        &rate_source,
        &mailer,
        &configuration.exchange_rates.currency_pair(),
    )
    .await
    .context("Failed to publish the newsletter")?;

    tracing::info!("Newsletter published to {} subscribers", sent);
    mailer.close().await;
    pool.close().await;
    Ok(())
}
