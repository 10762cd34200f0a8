use actix_web::{
  dev::{ServiceRequest, ServiceResponse},
  http::StatusCode,
  Error,
  ResponseError,
};
use tracing::Span;
use tracing_actix_web::RootSpanBuilder;

/// One span per request carrying method, path and final status, without the header and
/// user agent noise of the default builder.
pub struct QuieterRootSpanBuilder;

impl RootSpanBuilder for QuieterRootSpanBuilder {
  fn on_request_start(request: &ServiceRequest) -> Span {
    tracing::info_span!(
      "HTTP request",
      http.method = %request.method(),
      http.target = %request.uri().path(),
      http.status_code = tracing::field::Empty,
      exception.message = tracing::field::Empty,
    )
  }

  fn on_request_end<B>(span: Span, outcome: &Result<ServiceResponse<B>, Error>) {
    match outcome {
      Ok(response) => match response.response().error() {
        Some(error) => record_error(&span, response.status(), error.as_response_error()),
        None => {
          span.record("http.status_code", response.status().as_u16());
        }
      },
      Err(error) => {
        let response_error = error.as_response_error();
        record_error(&span, response_error.status_code(), response_error);
      }
    }
  }
}

fn record_error(span: &Span, status_code: StatusCode, response_error: &dyn ResponseError) {
  // pre-formatting errors is a workaround for https://github.com/tokio-rs/tracing/issues/1565
  let message = format!("{}", response_error);
  span.record("http.status_code", status_code.as_u16());
  span.record("exception.message", tracing::field::display(&message));
  if status_code.is_client_error() {
    tracing::warn!(parent: span, "{}", message);
  } else {
    tracing::error!(parent: span, "{}\n{:?}", message, response_error);
  }
}
