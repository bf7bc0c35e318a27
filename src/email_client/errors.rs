use custom_error::custom_error;
use lettre::address::AddressError;
use lettre::transport::smtp;

custom_error! {
///! Custom error for Email client error.
pub MailerError
    InvalidSender{source:AddressError} = "Invalid sender address: {source}",
    InvalidMessage{source:lettre::error::Error} = "Invalid message: {source}",
    Transport{source:smtp::Error} = "{source}",
}
