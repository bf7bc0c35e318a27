use custom_error::custom_error;

custom_error! {
///! Custom error for a subscription request carrying an unusable email.
pub MalformedInput
    MissingEmail = "Email is required",
    EmailTooLong{length: usize} = "Email too long ({length} bytes)",
    InvalidEmail{email: String} = "Invalid email address: {email}",
    UnreadableForm{reason: String} = "Invalid form body: {reason}",
}
