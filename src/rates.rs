//! Exchange rate sources.

pub use exchange_rate_api::ExchangeRateApi;

mod exchange_rate_api;

use async_trait::async_trait;

use crate::domain::Quote;

#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("conversion rate from {from} to {to} not found")]
    NotFound { from: String, to: String },
    #[error("exchange rate request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid exchange rate url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Something able to quote the rate between two currencies.
///
/// Every call is answered fresh: implementations neither cache nor retry.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch(&self, from: &str, to: &str) -> Result<Quote, RateError>;
}

/// Answers every request with the same rate.
#[derive(Clone, Copy, Debug)]
pub struct StaticRateSource {
    rate: f64,
}

impl StaticRateSource {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn fetch(&self, from: &str, to: &str) -> Result<Quote, RateError> {
        Ok(Quote {
            from: from.to_string(),
            to: to.to_string(),
            rate: self.rate,
        })
    }
}
