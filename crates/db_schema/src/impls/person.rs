use crate::{
  newtypes::PersonId,
  source::person::{Person, PersonInsertForm, PersonUpdateForm},
  traits::Crud,
  utils::{DbPool, Tables},
};
use async_trait::async_trait;
use chrono::Utc;
use commentary_utils::error::{CommentaryErrorType, CommentaryResult};

impl Tables {
  fn update_person(
    &mut self,
    person_id: PersonId,
    form: &PersonUpdateForm,
  ) -> CommentaryResult<Person> {
    let person = self
      .persons
      .get_mut(&person_id)
      .ok_or(CommentaryErrorType::NotFound)?;
    if let Some(admin) = form.admin {
      person.admin = admin;
    }
    if let Some(deleted) = form.deleted {
      person.deleted = deleted;
    }
    Ok(person.clone())
  }
}

#[async_trait]
impl Crud for Person {
  type InsertForm = PersonInsertForm;
  type UpdateForm = PersonUpdateForm;
  type IdType = PersonId;

  async fn create(pool: &DbPool, form: &Self::InsertForm) -> CommentaryResult<Self> {
    let mut tables = pool.write().await;
    if tables.persons.values().any(|p| p.name == form.name) {
      Err(CommentaryErrorType::PersonAlreadyExists)?
    }
    let id = tables.sequences.next_person();
    let person = Person {
      id,
      name: form.name.clone(),
      admin: form.admin.unwrap_or(false),
      deleted: false,
      published: Utc::now(),
    };
    tables.persons.insert(id, person.clone());
    Ok(person)
  }

  async fn read(pool: &DbPool, person_id: PersonId) -> CommentaryResult<Self> {
    pool
      .read()
      .await
      .persons
      .get(&person_id)
      .cloned()
      .ok_or_else(|| CommentaryErrorType::NotFound.into())
  }

  async fn update(
    pool: &DbPool,
    person_id: PersonId,
    form: &Self::UpdateForm,
  ) -> CommentaryResult<Self> {
    pool.write().await.update_person(person_id, form)
  }
}

impl Person {
  pub async fn read_by_name(pool: &DbPool, name: &str) -> CommentaryResult<Self> {
    pool
      .read()
      .await
      .persons
      .values()
      .find(|p| p.name == name)
      .cloned()
      .ok_or_else(|| CommentaryErrorType::NotFound.into())
  }

  /// Deletes the account but keeps everything it wrote.
  ///
  /// Its comments lose their creator, and its roles and logins are dropped.
  pub async fn delete_account(pool: &DbPool, person_id: PersonId) -> CommentaryResult<Self> {
    let mut tables = pool.write().await;
    let form = PersonUpdateForm {
      deleted: Some(true),
      ..Default::default()
    };
    let person = tables.update_person(person_id, &form)?;
    let anonymized = tables.anonymize_comments_of(person_id);
    tables.relationships.retain(|r| r.person_id != person_id);
    tables.login_tokens.retain(|_, t| t.person_id != person_id);
    tracing::info!(
      "Deleted account {} and anonymized {} comments",
      person.name,
      anonymized
    );
    Ok(person)
  }
}
