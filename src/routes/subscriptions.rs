use std::convert::TryFrom;

use actix_web::{
    web,
    HttpResponse,
};
use serde::Deserialize;

use crate::domain::SubscriberEmail;
use crate::routes::{
    ResponseBody,
    RouteError,
};
use crate::subscribers::SubscriberStore;

#[derive(Deserialize)]
pub struct FormData {
    #[serde(default)]
    email: String,
}

#[tracing::instrument(
    name = "adding new subscriber",
    skip(form, store),
    fields(email = %form.email)
)]
pub async fn subscribe(
    form: web::Form<FormData>,
    store: web::Data<SubscriberStore>,
) -> Result<HttpResponse, RouteError> {
    let email = SubscriberEmail::try_from(form.0.email).map_err(|e| {
        tracing::warn!("{}", e);
        e
    })?;

    store.register(&email).await.map_err(|e| {
        tracing::error!("{:?}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(ResponseBody::success("Subscriber added")))
}
