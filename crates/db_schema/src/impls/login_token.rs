use crate::{newtypes::PersonId, source::login_token::LoginToken, utils::DbPool};
use chrono::Utc;
use commentary_utils::{
  error::{CommentaryErrorType, CommentaryResult},
  utils::generate_random_string,
};

impl LoginToken {
  pub async fn create(pool: &DbPool, person_id: PersonId) -> CommentaryResult<Self> {
    Self::create_with_token(pool, person_id, generate_random_string()).await
  }

  /// Stores a token chosen by the caller, e.g. one from a seed file.
  pub async fn create_with_token(
    pool: &DbPool,
    person_id: PersonId,
    token: String,
  ) -> CommentaryResult<Self> {
    let mut tables = pool.write().await;
    if !tables.persons.contains_key(&person_id) {
      Err(CommentaryErrorType::NotFound)?
    }
    let login_token = LoginToken {
      token: token.clone(),
      person_id,
      published: Utc::now(),
    };
    tables.login_tokens.insert(token, login_token.clone());
    Ok(login_token)
  }

  pub async fn read(pool: &DbPool, token: &str) -> Option<Self> {
    pool.read().await.login_tokens.get(token).cloned()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    source::person::{Person, PersonInsertForm},
    traits::Crud,
    utils::build_db_pool_for_tests,
  };
  use pretty_assertions::assert_eq;

  #[tokio::test]
  async fn test_tokens() -> CommentaryResult<()> {
    let pool = &build_db_pool_for_tests();
    let person = Person::create(pool, &PersonInsertForm::test_form("luck")).await?;

    let token = LoginToken::create(pool, person.id).await?;
    assert_eq!(30, token.token.len());
    assert_eq!(Some(person.id), LoginToken::read(pool, &token.token).await.map(|t| t.person_id));

    assert_eq!(None, LoginToken::read(pool, "unknown").await);

    let chosen = LoginToken::create_with_token(pool, person.id, "chosen".to_string()).await?;
    assert_eq!("chosen", chosen.token);
    Person::delete_account(pool, person.id).await?;
    assert_eq!(None, LoginToken::read(pool, &token.token).await);
    Ok(())
  }
}
