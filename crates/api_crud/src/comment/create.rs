use actix_web::web::{Data, Json};
use commentary_api_common::{
  build_response::build_comment_list,
  comment::{CommentListResponse, CommentStatus, CreateComment, Flash},
  context::CommentaryContext,
  utils::parse_commentable,
};
use commentary_db_schema::{
  source::comment::{Comment, CommentInsertForm},
  traits::Crud,
};
use commentary_db_views::structs::{CommentableView, LocalUserView};
use commentary_utils::{
  error::{CommentaryErrorType, CommentaryResult},
  utils::validation::to_sentence,
};

#[tracing::instrument(skip(context))]
pub async fn create_comment(
  data: Json<CreateComment>,
  context: Data<CommentaryContext>,
  local_user_view: Option<LocalUserView>,
) -> CommentaryResult<Json<CommentListResponse>> {
  let commentable = parse_commentable(&data.commentable_type, data.commentable_id)?;
  // Make sure it exists before anything else
  CommentableView::read(context.pool(), commentable).await?;
  data.comment.permit()?;
  let local_user_view = local_user_view.ok_or(CommentaryErrorType::NotLoggedIn)?;

  let form = CommentInsertForm {
    parent_id: data.comment.parent_id,
    ..CommentInsertForm::new(
      local_user_view.person.id,
      commentable,
      data.comment.body.clone().unwrap_or_default(),
    )
  };
  let (status, flash) = match Comment::create(context.pool(), &form).await {
    Ok(comment) => {
      tracing::info!(
        "{} commented on {} as {}",
        local_user_view.person.name,
        commentable,
        comment.id
      );
      (
        CommentStatus::Ok,
        Flash::success("Comment created successfully."),
      )
    }
    Err(e) => match e.validation_messages() {
      Some(messages) => (
        CommentStatus::UnprocessableEntity,
        Flash::error(format!(
          "Failed to create comment: {}.",
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
