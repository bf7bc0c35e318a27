pub mod helpers;
mod rate;
mod subscriptions;
