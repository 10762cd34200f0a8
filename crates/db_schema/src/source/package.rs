use crate::newtypes::{PackageId, ProjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A package always lives inside one project.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Package {
  pub id: PackageId,
  pub project_id: ProjectId,
  pub name: String,
  pub published: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct PackageInsertForm {
  pub project_id: ProjectId,
  pub name: String,
}
