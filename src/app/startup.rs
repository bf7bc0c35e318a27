use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{
    web,
    App,
    HttpServer,
};
use custom_error::custom_error;
use sqlx::SqlitePool;
use url::Url;

use crate::app::configuration::Settings;
use crate::app::database::open_database;
use crate::app::request_tracing::RequestTracing;
use crate::domain::{
    CurrencyPair,
    MalformedInput,
};
use crate::rates::{
    ExchangeRateApi,
    RateError,
    RateSource,
};
use crate::routes::*;
use crate::subscribers::SubscriberStore;

custom_error! {
///! Custom error for a server that could not be assembled.
pub StartupError
    Bind{source:std::io::Error} = "Error binding the http listener: {source}",
    Database{source:sqlx::Error} = "Error opening the database: {source}",
    InvalidRateUrl{source:url::ParseError} = "Invalid exchange rate base url: {source}",
    RateClient{source:RateError} = "Error creating the rate source: {source}",
}

pub struct NewsletterApp {
    pub server: Server,
    pub port: u16,
    pub pool: SqlitePool,
}

impl NewsletterApp {
    /// Build the server with the rate source configured in `exchange_rates`.
    pub async fn from(configuration: Settings) -> Result<NewsletterApp, StartupError> {
        let base_url = Url::parse(&configuration.exchange_rates.base_url)?;
        let rate_source = ExchangeRateApi::new(base_url)?;
        NewsletterApp::with_rate_source(configuration, Arc::new(rate_source)).await
    }

    pub async fn with_rate_source(
        configuration: Settings,
        rate_source: Arc<dyn RateSource>,
    ) -> Result<NewsletterApp, StartupError> {
        let tcp_listener = TcpListener::bind(configuration.application.binding_address())?;
        let port = tcp_listener.local_addr()?.port();
        let pool = open_database(&configuration.database).await?;

        let server = run(
            tcp_listener,
            SubscriberStore::new(pool.clone()),
            rate_source,
            configuration.exchange_rates.currency_pair(),
            configuration.application.max_pending_connections,
        )?;
        Ok(NewsletterApp { server, port, pool })
    }
}

pub fn run(
    tcp_listener: TcpListener,
    store: SubscriberStore,
    rate_source: Arc<dyn RateSource>,
    currency_pair: CurrencyPair,
    max_pending_connections: u32,
) -> std::io::Result<Server> {
    let store = web::Data::new(store);
    let rate_source: web::Data<dyn RateSource> = web::Data::from(rate_source);
    let currency_pair = web::Data::new(currency_pair);

    // HttpServer handles all transport level concerns
    let server = HttpServer::new(move || {
        // App is where all the application logic lives: routing, middlewares, request
        // handlers, etc.
        App::new()
            .wrap(RequestTracing)
            // every resource falls back to a 405 for the methods it does not route
            .service(
                web::resource("/health")
                    .route(web::get().to(health_check))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/subscribe")
                    .route(web::post().to(subscribe))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/rate")
                    .route(web::get().to(rate))
                    .default_service(web::to(method_not_allowed)),
            )
            .app_data(web::FormConfig::default().error_handler(|err, _| {
                RouteError::from(MalformedInput::UnreadableForm {
                    reason: err.to_string(),
                })
                .into()
            }))
            .app_data(store.clone())
            .app_data(rate_source.clone())
            .app_data(currency_pair.clone())
    })
    .backlog(max_pending_connections)
    .listen(tcp_listener)?
    .run();
    Ok(server)
}
