use actix_web::web::{Data, Json, Query};
use commentary_api_common::{
  build_response::build_comment_list,
  comment::{CommentListResponse, CommentStatus, GetComments},
  context::CommentaryContext,
  utils::parse_commentable,
};
use commentary_utils::error::CommentaryResult;

#[tracing::instrument(skip(context))]
pub async fn list_comments(
  data: Query<GetComments>,
  context: Data<CommentaryContext>,
) -> CommentaryResult<Json<CommentListResponse>> {
  let commentable = parse_commentable(&data.commentable_type, data.commentable_id)?;
  Ok(Json(
    build_comment_list(&context, commentable, CommentStatus::Ok, None).await?,
  ))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::comment::test_data::{comment_by, init_data};
  use commentary_db_schema::newtypes::CommentableRef;
  use commentary_utils::error::CommentaryErrorType;
  use pretty_assertions::assert_eq;

  fn query(commentable_type: &str, commentable_id: i32) -> Query<GetComments> {
    Query(GetComments {
      commentable_type: commentable_type.to_string(),
      commentable_id,
    })
  }

  #[tokio::test]
  async fn lists_comments_of_one_commentable() -> CommentaryResult<()> {
    let context = Data::new(CommentaryContext::init_test_context());
    let data = init_data(&context).await?;
    let request = CommentableRef::Request(data.request.id);
    comment_by(&context, &data.luck, request, "First").await?;
    comment_by(&context, &data.tom, request, "Second").await?;
    let project = CommentableRef::Project(data.project.id);
    comment_by(&context, &data.tom, project, "Elsewhere").await?;

    let response = list_comments(query("BsRequest", data.request.id.0), context)
      .await?
      .into_inner();
    assert_eq!(CommentStatus::Ok, response.status);
    assert_eq!(None, response.flash);
    assert_eq!(
      vec![
        ("First".to_string(), Some("luck".to_string())),
        ("Second".to_string(), Some("tom".to_string())),
      ],
      response
        .comments
        .into_iter()
        .map(|c| (c.comment.body, c.creator.map(|p| p.name)))
        .collect::<Vec<_>>()
    );
    Ok(())
  }

  #[tokio::test]
  async fn unknown_commentables() -> CommentaryResult<()> {
    let context = Data::new(CommentaryContext::init_test_context());

    let err = list_comments(query("Package", 1), context.clone())
      .await
      .err();
    assert_eq!(
      Some(CommentaryErrorType::NotFound),
      err.map(|e| e.error_type)
    );
    let err = list_comments(query("Distribution", 1), context).await.err();
    assert_eq!(
      Some(CommentaryErrorType::NoSuchCapability(
        "Distribution".to_string()
      )),
      err.map(|e| e.error_type)
    );
    Ok(())
  }
}
