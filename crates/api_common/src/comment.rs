use actix_web::http::StatusCode;
use commentary_db_schema::newtypes::CommentId;
use commentary_db_views::structs::{CommentSlimView, CommentableView};
use commentary_utils::error::{CommentaryErrorType, CommentaryResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;
use strum::Display;

/// Keys sent inside a `comment` object which are not on its permitted list.
type UnpermittedKeys = BTreeMap<String, Value>;

fn check_permitted(unpermitted: &UnpermittedKeys) -> CommentaryResult<()> {
  match unpermitted.keys().next() {
    Some(name) => Err(CommentaryErrorType::UnpermittedField(name.clone()).into()),
    None => Ok(()),
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
/// Create a comment on a project, package or request.
pub struct CreateComment {
  /// `Project`, `Package` or `BsRequest`.
  pub commentable_type: String,
  pub commentable_id: i32,
  pub comment: CommentParams,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CommentParams {
  pub body: Option<String>,
  /// Reply to this comment.
  pub parent_id: Option<CommentId>,
  #[serde(flatten)]
  pub unpermitted: UnpermittedKeys,
}

impl CommentParams {
  /// Only `body` and `parent_id` may be assigned by the client. The author always comes from
  /// the session.
  pub fn permit(&self) -> CommentaryResult<()> {
    check_permitted(&self.unpermitted)
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
/// Edit the body of a comment.
pub struct EditComment {
  pub comment_id: CommentId,
  pub comment: EditCommentParams,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct EditCommentParams {
  pub body: Option<String>,
  #[serde(flatten)]
  pub unpermitted: UnpermittedKeys,
}

impl EditCommentParams {
  pub fn permit(&self) -> CommentaryResult<()> {
    check_permitted(&self.unpermitted)
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
/// Delete a comment. Comments with replies are blanked instead.
pub struct DeleteComment {
  pub comment_id: CommentId,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
/// Get the comment list of a commentable.
pub struct GetComments {
  pub commentable_type: String,
  pub commentable_id: i32,
}

/// The outcome of a comment operation.
#[derive(Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CommentStatus {
  Ok,
  UnprocessableEntity,
  Forbidden,
}

impl CommentStatus {
  pub fn status_code(self) -> StatusCode {
    match self {
      CommentStatus::Ok => StatusCode::OK,
      CommentStatus::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
      CommentStatus::Forbidden => StatusCode::FORBIDDEN,
    }
  }
}

#[derive(Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
  Success,
  Error,
}

/// A one-shot message shown above the comment list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Flash {
  pub kind: FlashKind,
  pub message: String,
}

impl Flash {
  pub fn success(message: impl Into<String>) -> Self {
    Flash {
      kind: FlashKind::Success,
      message: message.into(),
    }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Flash {
      kind: FlashKind::Error,
      message: message.into(),
    }
  }
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
/// The re-rendered comment list of a commentable, returned by every comment operation.
pub struct CommentListResponse {
  pub commentable: CommentableView,
  pub comments: Vec<CommentSlimView>,
  pub status: CommentStatus,
  pub flash: Option<Flash>,
}
