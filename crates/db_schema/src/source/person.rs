use crate::newtypes::PersonId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account which can act on comments.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Person {
  pub id: PersonId,
  pub name: String,
  /// Administrators may change any comment.
  pub admin: bool,
  /// Deleted accounts keep their row, but can no longer act.
  pub deleted: bool,
  pub published: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct PersonInsertForm {
  pub name: String,
  pub admin: Option<bool>,
}

impl PersonInsertForm {
  pub fn test_form(name: &str) -> Self {
    Self {
      name: name.to_string(),
      admin: None,
    }
  }
}

#[derive(Clone, Debug, Default)]
pub struct PersonUpdateForm {
  pub admin: Option<bool>,
  pub deleted: Option<bool>,
}
