//! The `newsletter` entry point.
//!
//! Subscribers register their email through the HTTP API, and the `publish`
//! binary mails them the current exchange rate.

pub mod app;
pub mod domain;
pub mod email_client;
pub mod publish;
pub mod rates;
pub mod routes;
pub mod subscribers;
