use crate::structs::{CommentSlimView, CommentView, CommentableView};
use commentary_db_schema::{
  newtypes::{CommentId, CommentableRef, PersonId},
  source::{comment::Comment, person::Person},
  traits::Crud,
  utils::DbPool,
};
use commentary_utils::error::CommentaryResult;

async fn read_creator(pool: &DbPool, creator_id: Option<PersonId>) -> Option<Person> {
  match creator_id {
    Some(id) => Person::read(pool, id).await.ok(),
    None => None,
  }
}

impl CommentView {
  pub async fn read(pool: &DbPool, comment_id: CommentId) -> CommentaryResult<Self> {
    let comment = Comment::read(pool, comment_id).await?;
    let creator = read_creator(pool, comment.creator_id).await;
    let commentable = CommentableView::read(pool, comment.commentable).await?;
    Ok(Self {
      comment,
      creator,
      commentable,
    })
  }
}

impl CommentSlimView {
  /// The comment list of one commentable, oldest first.
  pub async fn list(pool: &DbPool, commentable: CommentableRef) -> CommentaryResult<Vec<Self>> {
    let comments = Comment::list_for_commentable(pool, commentable).await;
    let mut views = Vec::with_capacity(comments.len());
    for comment in comments {
      let creator = read_creator(pool, comment.creator_id).await;
      views.push(Self { comment, creator });
    }
    Ok(views)
  }
}
