use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{
    Client,
    Url,
};
use serde::Deserialize;

use crate::domain::Quote;
use crate::rates::{
    RateError,
    RateSource,
};

/// Rate source backed by the open.er-api.com `latest` endpoint.
///
/// `base_url` must end with a slash, the base currency is appended to it.
#[derive(Clone, Debug)]
pub struct ExchangeRateApi {
    http_client: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct LatestRates {
    rates: HashMap<String, f64>,
}

impl ExchangeRateApi {
    pub fn new(base_url: Url) -> Result<Self, RateError> {
        Ok(Self {
            http_client: Client::builder().build()?,
            base_url,
        })
    }
}

#[async_trait]
impl RateSource for ExchangeRateApi {
    #[tracing::instrument(name = "fetching exchange rate", skip(self))]
    async fn fetch(&self, from: &str, to: &str) -> Result<Quote, RateError> {
        let url = self.base_url.join(from)?;
        tracing::info!("Fetching rate via {}", url);

        let latest: LatestRates = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let rate = latest
            .rates
            .get(to)
            .copied()
            .ok_or_else(|| RateError::NotFound {
                from: from.to_string(),
                to: to.to_string(),
            })?;

        tracing::info!("Rate fetched from {} to {}: {}", from, to, rate);
        Ok(Quote {
            from: from.to_string(),
            to: to.to_string(),
            rate,
        })
    }
}
