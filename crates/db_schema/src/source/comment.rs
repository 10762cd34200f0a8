use crate::newtypes::{CommentId, CommentableRef, PersonId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Body written into a comment which was deleted while replies still point at it.
pub const DELETED_COMMENT_BODY: &str = "This comment has been deleted";

#[skip_serializing_none]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Comment {
  pub id: CommentId,
  /// The project, package or request this comment belongs to. Never changes.
  pub commentable: CommentableRef,
  /// `None` once the author account was deleted, or the comment was blanked.
  pub creator_id: Option<PersonId>,
  pub parent_id: Option<CommentId>,
  pub body: String,
  /// Whether the comment was blanked instead of removed, because it still has replies.
  pub deleted: bool,
  pub published: DateTime<Utc>,
  pub updated: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug)]
pub struct CommentInsertForm {
  pub commentable: CommentableRef,
  pub creator_id: PersonId,
  pub body: String,
  pub parent_id: Option<CommentId>,
}

impl CommentInsertForm {
  pub fn new(creator_id: PersonId, commentable: CommentableRef, body: String) -> Self {
    Self {
      commentable,
      creator_id,
      body,
      parent_id: None,
    }
  }
}

#[derive(Clone, Debug, Default)]
pub struct CommentUpdateForm {
  pub body: Option<String>,
  pub creator_id: Option<Option<PersonId>>,
  pub deleted: Option<bool>,
  pub updated: Option<Option<DateTime<Utc>>>,
}

/// What `Comment::blank_or_destroy` ended up doing.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BlankOrDestroy {
  /// The comment has replies, so its row was kept with body and creator cleared.
  Blanked(Comment),
  /// The row was removed, together with the number of rows removed in total.
  Destroyed(usize),
}
