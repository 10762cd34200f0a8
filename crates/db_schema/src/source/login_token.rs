use crate::newtypes::PersonId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stores data related to a specific user login session.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LoginToken {
  /// Opaque token for this login
  #[serde(skip)]
  pub token: String,
  pub person_id: PersonId,
  /// Time of login
  pub published: DateTime<Utc>,
}
