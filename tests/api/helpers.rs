use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Response;
use sqlx::SqlitePool;
use tempfile::TempDir;

use newsletter::app::{
    load_configuration,
    setup_tracing,
    NewsletterApp,
};
use newsletter::domain::Quote;
use newsletter::email_client::{
    Mailer,
    MailerError,
};
use newsletter::rates::{
    RateError,
    RateSource,
    StaticRateSource,
};
use newsletter::subscribers::SubscriberStore;

// ensure the `tracing` is instantiated only once
lazy_static::lazy_static! {
 static ref TRACING: () = setup_tracing("test".into(),"debug".into());
}

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub store: SubscriberStore,
    // the database file lives as long as the app
    _database_directory: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn subscribe(&self, email: &str) -> Response {
        reqwest::Client::new()
            .post(self.url("/subscribe"))
            .form(&[("email", email)])
            .send()
            .await
            .expect("Fail to execute post request")
    }

    pub async fn subscriber_emails(&self) -> Vec<String> {
        sqlx::query_scalar("SELECT email FROM subscribers ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .expect("Failed to fetch saved subscriptions")
    }
}

/// Rate source whose every call fails with a transport-free error.
pub struct UnavailableRateSource;

#[async_trait]
impl RateSource for UnavailableRateSource {
    async fn fetch(&self, from: &str, to: &str) -> Result<Quote, RateError> {
        Err(RateError::NotFound {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

/// Mailer failing every send, as a server rejecting the sender would.
pub struct RejectingMailer;

#[async_trait]
impl Mailer for RejectingMailer {
    async fn send(
        &self,
        _recipients: &[String],
        _subject: &str,
        _body: &str,
    ) -> Result<(), MailerError> {
        let source = "not-an-email"
            .parse::<lettre::message::Mailbox>()
            .unwrap_err();
        Err(MailerError::InvalidSender { source })
    }
}

/// When a `tokio` runtime is shut down all tasks spawned on it are dropped.
///
/// `actix_rt::test` spins up a new runtime at the beginning of each test case
/// and they shut down at the end of each test case.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_rate_source(Arc::new(StaticRateSource::new(6.9))).await
}

pub async fn spawn_app_with_rate_source(rate_source: Arc<dyn RateSource>) -> TestApp {
    lazy_static::initialize(&TRACING);
    let database_directory = tempfile::tempdir().expect("error creating database directory");

    let configuration = {
        let mut c = load_configuration().unwrap();
        c.database.filename = database_directory
            .path()
            .join("newsletter.db")
            .to_string_lossy()
            .into_owned();
        c.application.host = "127.0.0.1".into();
        c.application.port = 0;
        c
    };

    let app = NewsletterApp::with_rate_source(configuration, rate_source)
        .await
        .expect("error building app");
    let pool = app.pool.clone();

    tokio::spawn(app.server);

    TestApp {
        // the request is done with the protocol:ip:port
        address: format!("http://127.0.0.1:{}", app.port),
        store: SubscriberStore::new(pool.clone()),
        pool,
        _database_directory: database_directory,
    }
}

pub async fn send_post_request(endpoint: &str, body: String) -> Response {
    reqwest::Client::new()
        .post(endpoint)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await
        .expect("Fail to execute post request")
}

pub async fn send_get_request(endpoint: &str) -> Response {
    reqwest::Client::new()
        .get(endpoint)
        .send()
        .await
        .expect("Fail to execute get request")
}
