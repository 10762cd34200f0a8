use crate::newtypes::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Project {
  pub id: ProjectId,
  pub name: String,
  pub published: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct ProjectInsertForm {
  pub name: String,
}
