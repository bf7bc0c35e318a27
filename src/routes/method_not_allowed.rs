use crate::routes::RouteError;
use actix_web::HttpResponse;

/// Fallback for a known path requested with the wrong method.
pub async fn method_not_allowed() -> Result<HttpResponse, RouteError> {
    Err(RouteError::MethodNotAllowed)
}
