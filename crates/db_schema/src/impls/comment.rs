use crate::{
  newtypes::{CommentId, CommentableRef, PersonId},
  source::comment::{
    BlankOrDestroy,
    Comment,
    CommentInsertForm,
    CommentUpdateForm,
    DELETED_COMMENT_BODY,
  },
  traits::Crud,
  utils::{DbPool, Tables},
};
use async_trait::async_trait;
use chrono::Utc;
use commentary_utils::{
  error::{CommentaryErrorType, CommentaryResult},
  utils::validation::comment_body_errors,
};

const PARENT_MISMATCH_MESSAGE: &str = "Parent must belong to the same commentable";
const PARENT_DELETED_MESSAGE: &str = "Parent has been deleted";
const COMMENT_DELETED_MESSAGE: &str = "Comment has been deleted";

impl Tables {
  pub(crate) fn commentable_exists(&self, commentable: CommentableRef) -> bool {
    match commentable {
      CommentableRef::Project(id) => self.projects.contains_key(&id),
      CommentableRef::Package(id) => self.packages.contains_key(&id),
      CommentableRef::Request(id) => self.requests.contains_key(&id),
    }
  }

  fn comment_has_children(&self, comment_id: CommentId) -> bool {
    self
      .comments
      .values()
      .any(|c| c.parent_id == Some(comment_id))
  }

  /// Removes a comment row. Afterwards a blanked parent which is left without replies has no
  /// reason to exist anymore, so it is removed too, up the whole chain.
  fn remove_comment(&mut self, comment_id: CommentId) -> usize {
    let mut removed = 0;
    let mut next = Some(comment_id);
    while let Some(id) = next.take() {
      if let Some(comment) = self.comments.remove(&id) {
        removed += 1;
        if let Some(parent_id) = comment.parent_id {
          let parent_blanked = self.comments.get(&parent_id).is_some_and(|p| p.deleted);
          if parent_blanked && !self.comment_has_children(parent_id) {
            next = Some(parent_id);
          }
        }
      }
    }
    removed
  }

  /// Applies `form` to a stored comment. Bodies are validated, and a blanked comment keeps its
  /// marker body.
  fn update_comment(
    &mut self,
    comment_id: CommentId,
    form: &CommentUpdateForm,
    max_body_length: usize,
  ) -> CommentaryResult<Comment> {
    let mut comment = self
      .comments
      .get(&comment_id)
      .cloned()
      .ok_or(CommentaryErrorType::NotFound)?;

    if let Some(body) = &form.body {
      // The marker body written while blanking is not user input
      let blanking = form.deleted == Some(true) && !comment.deleted;
      if !blanking {
        let mut errors = comment_body_errors(body, max_body_length);
        if comment.deleted {
          errors.push(COMMENT_DELETED_MESSAGE.to_string());
        }
        if !errors.is_empty() {
          Err(CommentaryErrorType::ValidationFailed(errors))?
        }
      }
      comment.body.clone_from(body);
    }
    if let Some(creator_id) = form.creator_id {
      comment.creator_id = creator_id;
    }
    if let Some(deleted) = form.deleted {
      comment.deleted = deleted;
    }
    if let Some(updated) = form.updated {
      comment.updated = updated;
    }

    self.comments.insert(comment_id, comment.clone());
    Ok(comment)
  }

  pub(crate) fn anonymize_comments_of(&mut self, person_id: PersonId) -> usize {
    let mut updated = 0;
    for comment in self.comments.values_mut() {
      if comment.creator_id == Some(person_id) {
        comment.creator_id = None;
        updated += 1;
      }
    }
    updated
  }
}

#[async_trait]
impl Crud for Comment {
  type InsertForm = CommentInsertForm;
  type UpdateForm = CommentUpdateForm;
  type IdType = CommentId;

  async fn create(pool: &DbPool, form: &Self::InsertForm) -> CommentaryResult<Self> {
    let mut tables = pool.write().await;
    if !tables.commentable_exists(form.commentable) || !tables.persons.contains_key(&form.creator_id)
    {
      Err(CommentaryErrorType::NotFound)?
    }

    let mut errors = comment_body_errors(&form.body, pool.max_body_length());
    if let Some(parent_id) = form.parent_id {
      match tables.comments.get(&parent_id) {
        Some(parent) if parent.commentable != form.commentable => {
          errors.push(PARENT_MISMATCH_MESSAGE.to_string());
        }
        Some(parent) if parent.deleted => errors.push(PARENT_DELETED_MESSAGE.to_string()),
        Some(_) => {}
        None => errors.push(PARENT_MISMATCH_MESSAGE.to_string()),
      }
    }
    if !errors.is_empty() {
      Err(CommentaryErrorType::ValidationFailed(errors))?
    }

    let id = tables.sequences.next_comment();
    let comment = Comment {
      id,
      commentable: form.commentable,
      creator_id: Some(form.creator_id),
      parent_id: form.parent_id,
      body: form.body.clone(),
      deleted: false,
      published: Utc::now(),
      updated: None,
    };
    tables.comments.insert(id, comment.clone());
    Ok(comment)
  }

  async fn read(pool: &DbPool, comment_id: CommentId) -> CommentaryResult<Self> {
    pool
      .read()
      .await
      .comments
      .get(&comment_id)
      .cloned()
      .ok_or_else(|| CommentaryErrorType::NotFound.into())
  }

  async fn update(
    pool: &DbPool,
    comment_id: CommentId,
    form: &Self::UpdateForm,
  ) -> CommentaryResult<Self> {
    pool
      .write()
      .await
      .update_comment(comment_id, form, pool.max_body_length())
  }

  async fn delete(pool: &DbPool, comment_id: CommentId) -> CommentaryResult<usize> {
    let mut tables = pool.write().await;
    if !tables.comments.contains_key(&comment_id) {
      Err(CommentaryErrorType::NotFound)?
    }
    Ok(tables.remove_comment(comment_id))
  }
}

impl Comment {
  /// Whether any comment replies directly to this one.
  pub async fn has_children(pool: &DbPool, comment_id: CommentId) -> bool {
    pool.read().await.comment_has_children(comment_id)
  }

  /// Deletes a comment without orphaning its replies.
  ///
  /// With replies the row stays, its body is replaced and the creator cleared. Without replies
  /// the row is removed.
  pub async fn blank_or_destroy(
    pool: &DbPool,
    comment_id: CommentId,
  ) -> CommentaryResult<BlankOrDestroy> {
    let mut tables = pool.write().await;
    if !tables.comments.contains_key(&comment_id) {
      Err(CommentaryErrorType::NotFound)?
    }

    if tables.comment_has_children(comment_id) {
      let form = CommentUpdateForm {
        body: Some(DELETED_COMMENT_BODY.to_string()),
        creator_id: Some(None),
        deleted: Some(true),
        updated: Some(Some(Utc::now())),
      };
      let comment = tables.update_comment(comment_id, &form, pool.max_body_length())?;
      Ok(BlankOrDestroy::Blanked(comment))
    } else {
      Ok(BlankOrDestroy::Destroyed(tables.remove_comment(comment_id)))
    }
  }

  /// All comments of one commentable, oldest first.
  pub async fn list_for_commentable(pool: &DbPool, commentable: CommentableRef) -> Vec<Self> {
    pool
      .read()
      .await
      .comments
      .values()
      .filter(|c| c.commentable == commentable)
      .cloned()
      .collect()
  }

  /// All comments a person wrote, oldest first.
  pub async fn list_for_creator(pool: &DbPool, creator_id: PersonId) -> Vec<Self> {
    pool
      .read()
      .await
      .comments
      .values()
      .filter(|c| c.creator_id == Some(creator_id))
      .cloned()
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    newtypes::CommentableRef,
    source::{
      person::{Person, PersonInsertForm},
      project::{Project, ProjectInsertForm},
    },
    utils::{build_db_pool_for_tests, DbPool},
  };
  use pretty_assertions::assert_eq;

  struct Data {
    person: Person,
    project: CommentableRef,
    other_project: CommentableRef,
  }

  async fn init_data(pool: &DbPool) -> CommentaryResult<Data> {
    let person = Person::create(pool, &PersonInsertForm::test_form("terry")).await?;
    let project = Project::create(
      pool,
      &ProjectInsertForm {
        name: "home:terry".to_string(),
      },
    )
    .await?;
    let other_project = Project::create(
      pool,
      &ProjectInsertForm {
        name: "openSUSE:Factory".to_string(),
      },
    )
    .await?;
    Ok(Data {
      person,
      project: CommentableRef::Project(project.id),
      other_project: CommentableRef::Project(other_project.id),
    })
  }

  async fn reply(
    pool: &DbPool,
    data: &Data,
    parent: &Comment,
    body: &str,
  ) -> CommentaryResult<Comment> {
    let form = CommentInsertForm {
      parent_id: Some(parent.id),
      ..CommentInsertForm::new(data.person.id, parent.commentable, body.to_string())
    };
    Comment::create(pool, &form).await
  }

  #[tokio::test]
  async fn test_crud() -> CommentaryResult<()> {
    let pool = &build_db_pool_for_tests();
    let data = init_data(pool).await?;

    let form = CommentInsertForm::new(data.person.id, data.project, "A test comment".into());
    let inserted = Comment::create(pool, &form).await?;

    let expected = Comment {
      id: inserted.id,
      commentable: data.project,
      creator_id: Some(data.person.id),
      parent_id: None,
      body: "A test comment".into(),
      deleted: false,
      published: inserted.published,
      updated: None,
    };
    assert_eq!(expected, inserted);
    assert_eq!(expected, Comment::read(pool, inserted.id).await?);

    let update_form = CommentUpdateForm {
      body: Some("A changed comment".into()),
      ..Default::default()
    };
    let updated = Comment::update(pool, inserted.id, &update_form).await?;
    assert_eq!("A changed comment", updated.body);
    assert_eq!(inserted.commentable, updated.commentable);

    assert_eq!(1, Comment::delete(pool, inserted.id).await?);
    let read = Comment::read(pool, inserted.id).await;
    assert!(matches!(
      read.map_err(|e| e.error_type),
      Err(CommentaryErrorType::NotFound)
    ));
    Ok(())
  }

  #[tokio::test]
  async fn blank_body_is_not_persisted() -> CommentaryResult<()> {
    let pool = &build_db_pool_for_tests();
    let data = init_data(pool).await?;

    let form = CommentInsertForm::new(data.person.id, data.project, "   ".into());
    let err = Comment::create(pool, &form).await.err();
    let messages = err.as_ref().and_then(|e| e.validation_messages());
    assert_eq!(Some(&["Body can't be blank".to_string()][..]), messages);
    assert!(Comment::list_for_commentable(pool, data.project)
      .await
      .is_empty());
    Ok(())
  }

  #[tokio::test]
  async fn update_rejects_blank_body() -> CommentaryResult<()> {
    let pool = &build_db_pool_for_tests();
    let data = init_data(pool).await?;
    let form = CommentInsertForm::new(data.person.id, data.project, "Original".into());
    let inserted = Comment::create(pool, &form).await?;

    let update_form = CommentUpdateForm {
      body: Some(String::new()),
      ..Default::default()
    };
    assert!(Comment::update(pool, inserted.id, &update_form)
      .await
      .is_err());
    assert_eq!("Original", Comment::read(pool, inserted.id).await?.body);
    Ok(())
  }

  #[tokio::test]
  async fn reply_must_stay_on_same_commentable() -> CommentaryResult<()> {
    let pool = &build_db_pool_for_tests();
    let data = init_data(pool).await?;
    let form = CommentInsertForm::new(data.person.id, data.project, "Parent".into());
    let parent = Comment::create(pool, &form).await?;

    let stray = CommentInsertForm {
      parent_id: Some(parent.id),
      ..CommentInsertForm::new(data.person.id, data.other_project, "Stray".into())
    };
    let err = Comment::create(pool, &stray).await.err();
    assert_eq!(
      Some(&[PARENT_MISMATCH_MESSAGE.to_string()][..]),
      err.as_ref().and_then(|e| e.validation_messages())
    );

    let child = reply(pool, &data, &parent, "Child").await?;
    assert_eq!(Some(parent.id), child.parent_id);
    Ok(())
  }

  #[tokio::test]
  async fn unknown_commentable_is_not_found() -> CommentaryResult<()> {
    let pool = &build_db_pool_for_tests();
    let data = init_data(pool).await?;
    let form = CommentInsertForm::new(
      data.person.id,
      CommentableRef::Package(crate::newtypes::PackageId(404)),
      "Hello".into(),
    );
    let res = Comment::create(pool, &form).await;
    assert!(matches!(
      res.map_err(|e| e.error_type),
      Err(CommentaryErrorType::NotFound)
    ));
    Ok(())
  }

  #[tokio::test]
  async fn blank_or_destroy_keeps_comments_with_replies() -> CommentaryResult<()> {
    let pool = &build_db_pool_for_tests();
    let data = init_data(pool).await?;
    let form = CommentInsertForm::new(data.person.id, data.project, "Parent".into());
    let parent = Comment::create(pool, &form).await?;
    let child = reply(pool, &data, &parent, "Child").await?;

    assert!(Comment::has_children(pool, parent.id).await);
    let BlankOrDestroy::Blanked(blanked) = Comment::blank_or_destroy(pool, parent.id).await? else {
      panic!("comment with replies must be blanked");
    };
    assert_eq!(DELETED_COMMENT_BODY, blanked.body);
    assert_eq!(None, blanked.creator_id);
    assert!(blanked.deleted);
    assert_eq!(2, Comment::list_for_commentable(pool, data.project).await.len());

    // Removing the last reply takes the blanked parent with it
    assert!(!Comment::has_children(pool, child.id).await);
    assert_eq!(
      BlankOrDestroy::Destroyed(2),
      Comment::blank_or_destroy(pool, child.id).await?
    );
    assert!(Comment::list_for_commentable(pool, data.project)
      .await
      .is_empty());
    Ok(())
  }

  #[tokio::test]
  async fn removing_a_leaf_clears_the_blanked_chain_above_it() -> CommentaryResult<()> {
    let pool = &build_db_pool_for_tests();
    let data = init_data(pool).await?;
    let form = CommentInsertForm::new(data.person.id, data.project, "Grandparent".into());
    let grandparent = Comment::create(pool, &form).await?;
    let parent = reply(pool, &data, &grandparent, "Parent").await?;
    let leaf = reply(pool, &data, &parent, "Leaf").await?;

    for id in [grandparent.id, parent.id] {
      assert!(matches!(
        Comment::blank_or_destroy(pool, id).await?,
        BlankOrDestroy::Blanked(_)
      ));
    }
    assert_eq!(
      BlankOrDestroy::Destroyed(3),
      Comment::blank_or_destroy(pool, leaf.id).await?
    );
    assert!(Comment::list_for_commentable(pool, data.project)
      .await
      .is_empty());
    Ok(())
  }

  #[tokio::test]
  async fn cascade_stops_at_a_live_ancestor() -> CommentaryResult<()> {
    let pool = &build_db_pool_for_tests();
    let data = init_data(pool).await?;
    let form = CommentInsertForm::new(data.person.id, data.project, "Grandparent".into());
    let grandparent = Comment::create(pool, &form).await?;
    let parent = reply(pool, &data, &grandparent, "Parent").await?;
    let leaf = reply(pool, &data, &parent, "Leaf").await?;

    assert!(matches!(
      Comment::blank_or_destroy(pool, parent.id).await?,
      BlankOrDestroy::Blanked(_)
    ));
    assert_eq!(
      BlankOrDestroy::Destroyed(2),
      Comment::blank_or_destroy(pool, leaf.id).await?
    );
    assert_eq!(grandparent, Comment::read(pool, grandparent.id).await?);
    assert_eq!(
      vec![grandparent],
      Comment::list_for_commentable(pool, data.project).await
    );
    Ok(())
  }

  #[tokio::test]
  async fn blanked_comments_are_frozen() -> CommentaryResult<()> {
    let pool = &build_db_pool_for_tests();
    let data = init_data(pool).await?;
    let form = CommentInsertForm::new(data.person.id, data.project, "Parent".into());
    let parent = Comment::create(pool, &form).await?;
    reply(pool, &data, &parent, "Child").await?;
    Comment::blank_or_destroy(pool, parent.id).await?;

    let update_form = CommentUpdateForm {
      body: Some("Resurrected".into()),
      ..Default::default()
    };
    let err = Comment::update(pool, parent.id, &update_form).await.err();
    assert_eq!(
      Some(&[COMMENT_DELETED_MESSAGE.to_string()][..]),
      err.as_ref().and_then(|e| e.validation_messages())
    );
    assert_eq!(DELETED_COMMENT_BODY, Comment::read(pool, parent.id).await?.body);

    let err = reply(pool, &data, &parent, "Late reply").await.err();
    assert_eq!(
      Some(&[PARENT_DELETED_MESSAGE.to_string()][..]),
      err.as_ref().and_then(|e| e.validation_messages())
    );
    Ok(())
  }

  #[tokio::test]
  async fn blanking_ignores_the_body_limit() -> CommentaryResult<()> {
    let pool = &DbPool::new(5);
    let data = init_data(pool).await?;
    let form = CommentInsertForm::new(data.person.id, data.project, "Hi".into());
    let parent = Comment::create(pool, &form).await?;
    reply(pool, &data, &parent, "Yo").await?;

    let BlankOrDestroy::Blanked(blanked) = Comment::blank_or_destroy(pool, parent.id).await? else {
      panic!("comment with replies must be blanked");
    };
    assert_eq!(DELETED_COMMENT_BODY, blanked.body);
    Ok(())
  }

  #[tokio::test]
  async fn blank_or_destroy_removes_childless_comments() -> CommentaryResult<()> {
    let pool = &build_db_pool_for_tests();
    let data = init_data(pool).await?;
    let form = CommentInsertForm::new(data.person.id, data.project, "Parent".into());
    let parent = Comment::create(pool, &form).await?;
    let child = reply(pool, &data, &parent, "Child").await?;

    assert_eq!(
      BlankOrDestroy::Destroyed(1),
      Comment::blank_or_destroy(pool, child.id).await?
    );
    // The parent was never blanked, so it stays
    assert_eq!(parent, Comment::read(pool, parent.id).await?);
    Ok(())
  }

  #[tokio::test]
  async fn lists_by_creator() -> CommentaryResult<()> {
    let pool = &build_db_pool_for_tests();
    let data = init_data(pool).await?;
    let other = Person::create(pool, &PersonInsertForm::test_form("tom")).await?;

    let first = CommentInsertForm::new(data.person.id, data.project, "One".into());
    let second = CommentInsertForm::new(data.person.id, data.other_project, "Two".into());
    let foreign = CommentInsertForm::new(other.id, data.project, "Three".into());
    Comment::create(pool, &first).await?;
    Comment::create(pool, &second).await?;
    Comment::create(pool, &foreign).await?;

    let bodies = Comment::list_for_creator(pool, data.person.id)
      .await
      .into_iter()
      .map(|c| c.body)
      .collect::<Vec<_>>();
    assert_eq!(vec!["One".to_string(), "Two".to_string()], bodies);
    Ok(())
  }
}
