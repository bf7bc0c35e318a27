pub use errors::MalformedInput;
pub use quote::{CurrencyPair, Quote};
pub use subscriber_email::SubscriberEmail;

mod errors;
mod quote;
mod subscriber_email;
