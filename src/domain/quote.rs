use serde::Deserialize;

/// The source and target currency codes of the newsletter.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CurrencyPair {
    pub from: String,
    pub to: String,
}

impl CurrencyPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A single exchange rate, fetched fresh for every request or publish run.
#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    pub from: String,
    pub to: String,
    pub rate: f64,
}
