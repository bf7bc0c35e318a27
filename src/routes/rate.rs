use actix_web::{
    web,
    HttpResponse,
};

use crate::domain::CurrencyPair;
use crate::rates::RateSource;
use crate::routes::RouteError;

/// Answers with the current rate of the configured pair as a bare JSON number.
#[tracing::instrument(
    name = "fetching current rate",
    skip(rate_source, pair),
    fields(from = %pair.from, to = %pair.to)
)]
pub async fn rate(
    rate_source: web::Data<dyn RateSource>,
    pair: web::Data<CurrencyPair>,
) -> Result<HttpResponse, RouteError> {
    let quote = rate_source
        .fetch(&pair.from, &pair.to)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching rate: {}", e);
            e
        })?;

    Ok(HttpResponse::Ok().json(quote.rate))
}
