use std::future::{
    ready,
    Future,
    Ready,
};
use std::pin::Pin;
use std::time::{
    Duration,
    Instant,
};

use actix_web::body::{
    BoxBody,
    EitherBody,
    MessageBody,
};
use actix_web::dev::{
    forward_ready,
    Service,
    ServiceRequest,
    ServiceResponse,
    Transform,
};
use actix_web::error::InternalError;
use actix_web::http::header::{
    HeaderName,
    HeaderValue,
    CONTENT_TYPE,
};
use actix_web::http::StatusCode;
use actix_web::{
    Error,
    HttpMessage,
    HttpResponse,
};
use rand::Rng;
use tracing_futures::Instrument;

use crate::routes::ResponseBody;

const CORRELATION_ID_ALPHABET: &[u8] =
    b"_-0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const CORRELATION_ID_LENGTH: usize = 10;

/// Response header echoing the correlation id of the request.
pub const CORRELATION_ID_HEADER: &str = "x-request-id";

/// Per-request tracing state, stored in the request extensions.
///
/// Handlers can read it with `web::ReqData<RequestTrace>`. The copy kept by
/// the middleware also records the final status and whether it was chosen
/// before the failure surfaced.
#[derive(Clone, Debug)]
pub struct RequestTrace {
    correlation_id: String,
    started_at: Instant,
    observed_status: Option<StatusCode>,
    headers_committed: bool,
}

impl RequestTrace {
    fn start() -> Self {
        let mut rng = rand::thread_rng();
        let correlation_id = (0..CORRELATION_ID_LENGTH)
            .map(|_| CORRELATION_ID_ALPHABET[rng.gen_range(0..CORRELATION_ID_ALPHABET.len())] as char)
            .collect();
        Self {
            correlation_id,
            started_at: Instant::now(),
            observed_status: None,
            headers_committed: false,
        }
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Status sent to the client, once the response exists.
    pub fn observed_status(&self) -> Option<StatusCode> {
        self.observed_status
    }

    pub fn headers_committed(&self) -> bool {
        self.headers_committed
    }

    fn observe(&mut self, status: StatusCode, headers_committed: bool) {
        self.observed_status = Some(status);
        self.headers_committed = headers_committed;
    }
}

/// Middleware giving every request a correlation id, timing it and rendering
/// handler failures as `{"ok": false, "message": ...}`.
///
/// A failure whose status was already chosen keeps it. A failure surfacing
/// as an error from the wrapped service has no status yet and becomes a 500.
pub struct RequestTracing;

impl<S, B> Transform<S, ServiceRequest> for RequestTracing
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTracingMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTracingMiddleware { service }))
    }
}

pub struct RequestTracingMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTracingMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let mut trace = RequestTrace::start();
        let span = tracing::info_span!("request", correlation_id = %trace.correlation_id());

        let fut = span.in_scope(|| {
            tracing::info!(method = %req.method(), path = %req.path(), "Request received");
            req.extensions_mut().insert(trace.clone());
            self.service.call(req)
        });

        Box::pin(
            async move {
                match fut.await {
                    Ok(response) => {
                        let mut response = render_handler_error(response);
                        trace.observe(response.status(), true);
                        if let Ok(value) = HeaderValue::from_str(trace.correlation_id()) {
                            response
                                .headers_mut()
                                .insert(HeaderName::from_static(CORRELATION_ID_HEADER), value);
                        }
                        log_handled(&trace);
                        Ok(response)
                    }
                    Err(error) => {
                        // nothing was sent yet: answer with a uniform 500
                        let message = error.to_string();
                        tracing::error!(error = %message, "Error handling request");
                        let response = HttpResponse::InternalServerError()
                            .insert_header((CORRELATION_ID_HEADER, trace.correlation_id()))
                            .json(ResponseBody::failure(&message));
                        trace.observe(response.status(), false);
                        log_handled(&trace);
                        Err(InternalError::from_response(message, response).into())
                    }
                }
            }
            .instrument(span),
        )
    }
}

fn log_handled(trace: &RequestTrace) {
    tracing::info!(
        status = trace.observed_status().map(|status| status.as_u16()),
        headers_committed = trace.headers_committed(),
        elapsed_ms = trace.elapsed().as_millis() as u64,
        "Request handled"
    );
}

/// Replace the body of a response produced from a handler error with the
/// uniform failure body, keeping the status the handler chose.
fn render_handler_error<B>(response: ServiceResponse<B>) -> ServiceResponse<EitherBody<B>>
where
    B: MessageBody + 'static,
{
    let message = match response.response().error() {
        Some(error) => error.to_string(),
        None => return response.map_into_left_body(),
    };
    tracing::error!(
        status = response.status().as_u16(),
        error = %message,
        "Error handling request"
    );

    let body = serde_json::to_string(&ResponseBody::failure(&message)).unwrap_or_default();
    response.map_body(|head, _| {
        if !head.headers().contains_key(CONTENT_TYPE) {
            head.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        EitherBody::right(BoxBody::new(body))
    })
}
