use actix_web::web::{Data, Json};
use chrono::Utc;
use commentary_api_common::{
  build_response::build_comment_list,
  comment::{CommentListResponse, CommentStatus, EditComment, Flash},
  context::CommentaryContext,
  policy::{CommentAction, CommentPolicy},
};
use commentary_db_schema::{
  source::comment::{Comment, CommentUpdateForm},
  traits::Crud,
};
use commentary_db_views::structs::{CommentView, LocalUserView};
use commentary_utils::error::{CommentaryErrorType, CommentaryResult};

#[tracing::instrument(skip(context))]
pub async fn update_comment(
  data: Json<EditComment>,
  context: Data<CommentaryContext>,
  local_user_view: Option<LocalUserView>,
) -> CommentaryResult<Json<CommentListResponse>> {
  let orig_comment = CommentView::read(context.pool(), data.comment_id).await?;
  let commentable = orig_comment.comment.commentable;
  data.comment.permit()?;

  let action = CommentAction::Update;
  match CommentPolicy::authorize(local_user_view.as_ref(), &orig_comment, action) {
    Err(e) if e.error_type == CommentaryErrorType::NotAuthorized => {
      tracing::warn!("Refused to update comment {}", data.comment_id);
      let flash = Flash::error("Sorry, you are not authorized to update this Comment.");
      return Ok(Json(
        build_comment_list(&context, commentable, CommentStatus::Forbidden, Some(flash)).await?,
      ));
    }
    other => other?,
  }

  let form = CommentUpdateForm {
    body: data.comment.body.clone(),
    updated: Some(Some(Utc::now())),
    ..Default::default()
  };
  let (status, flash) = match Comment::update(context.pool(), data.comment_id, &form).await {
    Ok(_) => (
      CommentStatus::Ok,
      Flash::success("Comment updated successfully."),
    ),
    Err(e) if e.validation_messages().is_some() => (
      CommentStatus::UnprocessableEntity,
      Flash::error("Failed to update comment."),
    ),
    Err(e) => return Err(e),
  };

  Ok(Json(
    build_comment_list(&context, commentable, status, Some(flash)).await?,
  ))
}
