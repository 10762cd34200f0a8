use serde::{Deserialize, Serialize};
use std::{backtrace::Backtrace, fmt, fmt::Debug};
use strum::Display;

#[derive(Display, Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(tag = "error", content = "message", rename_all = "snake_case")]
#[non_exhaustive]
pub enum CommentaryErrorType {
  NotLoggedIn,
  IncorrectLogin,
  NotAuthorized,
  NotFound,
  /// The named type has no comments collection.
  NoSuchCapability(String),
  /// A field outside the permitted set was submitted.
  UnpermittedField(String),
  /// Field-level validation failures, as full human readable messages.
  ValidationFailed(Vec<String>),
  CouldntLoadSeedFile,
  PersonAlreadyExists,
  Unknown(String),
}

pub type CommentaryResult<T> = Result<T, CommentaryError>;

pub struct CommentaryError {
  pub error_type: CommentaryErrorType,
  pub inner: anyhow::Error,
  pub context: Backtrace,
}

impl CommentaryError {
  /// The validation messages carried by this error, if it is a validation failure.
  pub fn validation_messages(&self) -> Option<&[String]> {
    match &self.error_type {
      CommentaryErrorType::ValidationFailed(messages) => Some(messages),
      _ => None,
    }
  }
}

impl<T> From<T> for CommentaryError
where
  T: Into<anyhow::Error>,
{
  fn from(t: T) -> Self {
    let cause = t.into();
    CommentaryError {
      error_type: CommentaryErrorType::Unknown(format!("{}", &cause)),
      inner: cause,
      context: Backtrace::capture(),
    }
  }
}

impl Debug for CommentaryError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CommentaryError")
      .field("message", &self.error_type)
      .field("inner", &self.inner)
      .field("context", &self.context)
      .finish()
  }
}

impl fmt::Display for CommentaryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}: ", &self.error_type)?;
    writeln!(f, "{}", self.inner)?;
    fmt::Display::fmt(&self.context, f)
  }
}

impl actix_web::error::ResponseError for CommentaryError {
  fn status_code(&self) -> actix_web::http::StatusCode {
    use actix_web::http::StatusCode;
    match self.error_type {
      CommentaryErrorType::NotLoggedIn | CommentaryErrorType::IncorrectLogin => {
        StatusCode::UNAUTHORIZED
      }
      CommentaryErrorType::NotAuthorized => StatusCode::FORBIDDEN,
      CommentaryErrorType::NotFound => StatusCode::NOT_FOUND,
      CommentaryErrorType::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
      CommentaryErrorType::NoSuchCapability(_) => StatusCode::INTERNAL_SERVER_ERROR,
      _ => StatusCode::BAD_REQUEST,
    }
  }

  fn error_response(&self) -> actix_web::HttpResponse {
    actix_web::HttpResponse::build(self.status_code()).json(&self.error_type)
  }
}

impl From<CommentaryErrorType> for CommentaryError {
  fn from(error_type: CommentaryErrorType) -> Self {
    let inner = anyhow::anyhow!("{}", error_type);
    CommentaryError {
      error_type,
      inner,
      context: Backtrace::capture(),
    }
  }
}

pub trait CommentaryErrorExt<T, E: Into<anyhow::Error>> {
  fn with_commentary_type(self, error_type: CommentaryErrorType) -> CommentaryResult<T>;
}

impl<T, E: Into<anyhow::Error>> CommentaryErrorExt<T, E> for Result<T, E> {
  fn with_commentary_type(self, error_type: CommentaryErrorType) -> CommentaryResult<T> {
    self.map_err(|error| CommentaryError {
      error_type,
      inner: error.into(),
      context: Backtrace::capture(),
    })
  }
}
