use commentary_db_schema::{newtypes::CommentableRef, CommentableType};
use commentary_utils::error::{CommentaryErrorType, CommentaryResult};
use std::str::FromStr;

/// Resolves a `commentable_type` / `commentable_id` pair sent by a client.
///
/// A type without a comments collection is a server side failure, not a bad request.
pub fn parse_commentable(
  commentable_type: &str,
  commentable_id: i32,
) -> CommentaryResult<CommentableRef> {
  match CommentableType::from_str(commentable_type) {
    Ok(kind) => Ok(kind.with_id(commentable_id)),
    Err(_) => {
      tracing::error!("{} has no comments", commentable_type);
      Err(CommentaryErrorType::NoSuchCapability(commentable_type.to_string()))?
    }
  }
}
