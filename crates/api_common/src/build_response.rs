use crate::{
  comment::{CommentListResponse, CommentStatus, Flash},
  context::CommentaryContext,
};
use commentary_db_schema::newtypes::CommentableRef;
use commentary_db_views::structs::CommentableView;
use commentary_utils::error::CommentaryResult;

/// Loads the commentable fresh and renders its comment list together with the outcome.
pub async fn build_comment_list(
  context: &CommentaryContext,
  commentable: CommentableRef,
  status: CommentStatus,
  flash: Option<Flash>,
) -> CommentaryResult<CommentListResponse> {
  let commentable = CommentableView::read(context.pool(), commentable).await?;
  let comments = commentable.comments(context.pool()).await?;
  Ok(CommentListResponse {
    commentable,
    comments,
    status,
    flash,
  })
}
