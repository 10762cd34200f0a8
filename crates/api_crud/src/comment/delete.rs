use actix_web::web::{Data, Json};
use commentary_api_common::{
  build_response::build_comment_list,
  comment::{CommentListResponse, CommentStatus, DeleteComment, Flash},
  context::CommentaryContext,
  policy::{CommentAction, CommentPolicy},
};
use commentary_db_schema::source::comment::{BlankOrDestroy, Comment};
use commentary_db_views::structs::{CommentView, LocalUserView};
use commentary_utils::{
  error::{CommentaryErrorType, CommentaryResult},
  utils::validation::to_sentence,
};

#[tracing::instrument(skip(context))]
pub async fn delete_comment(
  data: Json<DeleteComment>,
  context: Data<CommentaryContext>,
  local_user_view: Option<LocalUserView>,
) -> CommentaryResult<Json<CommentListResponse>> {
  let orig_comment = CommentView::read(context.pool(), data.comment_id).await?;
  let commentable = orig_comment.comment.commentable;

  let action = CommentAction::Destroy;
  match CommentPolicy::authorize(local_user_view.as_ref(), &orig_comment, action) {
    Err(e) if e.error_type == CommentaryErrorType::NotAuthorized => {
      tracing::warn!("Refused to delete comment {}", data.comment_id);
      let flash = Flash::error("Sorry, you are not authorized to delete this Comment.");
      return Ok(Json(
        build_comment_list(&context, commentable, CommentStatus::Forbidden, Some(flash)).await?,
      ));
    }
    other => other?,
  }

  let (status, flash) = match Comment::blank_or_destroy(context.pool(), data.comment_id).await {
    Ok(outcome) => {
      match outcome {
        BlankOrDestroy::Blanked(_) => {
          tracing::info!("Blanked comment {}, it has replies", data.comment_id);
        }
        BlankOrDestroy::Destroyed(removed) => {
          tracing::info!("Removed comment {} ({} rows)", data.comment_id, removed);
        }
      }
      (
        CommentStatus::Ok,
        Flash::success("Comment deleted successfully."),
      )
    }
    Err(e) => match e.validation_messages() {
      Some(messages) => (
        CommentStatus::UnprocessableEntity,
        Flash::error(format!(
          "Failed to delete comment: {}.",
          to_sentence(messages)
        )),
      ),
      None => return Err(e),
    },
  };

  Ok(Json(
    build_comment_list(&context, commentable, status, Some(flash)).await?,
  ))
}
