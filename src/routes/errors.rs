use actix_web::http::StatusCode;
use actix_web::{
    HttpResponse,
    ResponseError,
};
use custom_error::custom_error;
use serde::Serialize;

use crate::domain::MalformedInput;
use crate::rates::RateError;
use crate::subscribers::RegisterError;

/// Body shared by every JSON answer carrying a message.
#[derive(Debug, Serialize)]
pub struct ResponseBody<'a> {
    pub ok: bool,
    pub message: &'a str,
}

impl<'a> ResponseBody<'a> {
    pub fn success(message: &'a str) -> Self {
        Self { ok: true, message }
    }

    pub fn failure(message: &'a str) -> Self {
        Self { ok: false, message }
    }
}

custom_error! {
///! Error inside route handler.
///!
///! Only the status is decided here, the body is rendered by the request
///! tracing middleware. Messages never carry the underlying error.
pub RouteError
    InvalidFormData{source:MalformedInput} = "{source}",
    Conflict = "Subscriber already exists",
    MethodNotAllowed = "Method not allowed",
    UpstreamFailure{source:RateError} = "Failed to fetch the exchange rate",
    Internal{source:sqlx::Error} = "Internal server error",
}

impl From<RegisterError> for RouteError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::Conflict => RouteError::Conflict,
            RegisterError::Internal(source) => RouteError::Internal { source },
        }
    }
}

impl ResponseError for RouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            RouteError::InvalidFormData { .. } => StatusCode::BAD_REQUEST,
            RouteError::Conflict => StatusCode::CONFLICT,
            RouteError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RouteError::UpstreamFailure { .. } | RouteError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).finish()
    }
}
