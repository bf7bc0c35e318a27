use std::env;
use std::env::VarError;

use config::{
    Config,
    ConfigError,
    Environment,
    File,
};
use custom_error::custom_error;
use derivative::Derivative;
use sqlx::sqlite::{
    SqliteConnectOptions,
    SqliteJournalMode,
};

use crate::domain::CurrencyPair;

const DEFAULT_APP_ENVIRONMENT: &str = "local";
const IN_MEMORY_DATABASE: &str = ":memory:";

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub email_client: EmailClientSettings,
    pub exchange_rates: ExchangeRateSettings,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub max_pending_connections: u32,
    pub port: u16,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct DatabaseSettings {
    pub filename: String,
    pub max_db_connections: u32,
    pub wal_mode: bool,
}

#[derive(Clone, Derivative, serde::Deserialize)]
#[derivative(Debug)]
pub struct EmailClientSettings {
    pub host: String,
    #[derivative(Debug = "ignore")]
    pub password: String,
    pub port: u16,
    pub sender_email: String,
    pub ssl: bool,
    pub username: String,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ExchangeRateSettings {
    pub base_url: String,
    pub from: String,
    pub to: String,
}

impl ApplicationSettings {
    pub fn binding_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        let options = if self.filename == IN_MEMORY_DATABASE {
            "sqlite::memory:".parse::<SqliteConnectOptions>()?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.filename)
                .create_if_missing(true)
        };
        let journal_mode = if self.wal_mode {
            SqliteJournalMode::Wal
        } else {
            SqliteJournalMode::Delete
        };
        Ok(options.journal_mode(journal_mode))
    }
}

impl ExchangeRateSettings {
    pub fn currency_pair(&self) -> CurrencyPair {
        CurrencyPair::new(&self.from, &self.to)
    }
}

custom_error! {
///! Custom error for an unreadable env variable or invalid configuration files.
pub ConfigurationError
    InvalidAppEnv{source:VarError} = "`APP_ENVIRONMENT` is not valid unicode \
    (possible values: [`local`|`production`]).",
    InvalidConfig{source:ConfigError} = "{source}",
}

/// Load the configuration from the directory: `configuration`.
///
/// It fails if:
/// - the `APP_ENVIRONMENT` env variable is not valid unicode
/// - the `configuration/base` file is missing
/// - the `configuration/${APP_ENVIRONMENT}` file is missing
/// - the `configuration/*` files have missing or unexpected fields
///
/// `APP_ENVIRONMENT` defaults to `local`.
///
/// # Examples
///
/// ```rust
/// use newsletter::app::load_configuration;
///
/// assert!(load_configuration().is_ok());
/// ```
pub fn load_configuration() -> Result<Settings, ConfigurationError> {
    let app_environment = match env::var("APP_ENVIRONMENT") {
        Ok(app_environment) => app_environment,
        Err(VarError::NotPresent) => DEFAULT_APP_ENVIRONMENT.to_string(),
        Err(e) => return Err(e.into()),
    };

    // Add in settings from environment variables (with a prefix of APP and '__' as
    // separator) E.g. `APP_EMAIL_CLIENT__PASSWORD=secret` would set
    // `Settings.email_client.password`
    let config = Config::builder()
        .add_source(File::with_name("configuration/base").required(true))
        .add_source(File::with_name(&format!("configuration/{}", app_environment)).required(true))
        .add_source(
            Environment::with_prefix("app")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
