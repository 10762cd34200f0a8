use crate::{
  newtypes::{PackageId, PersonId, ProjectId, RequestId},
  RequestActionType,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A review request, e.g. to submit a package into another project.
#[skip_serializing_none]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Request {
  pub id: RequestId,
  pub creator_id: Option<PersonId>,
  pub description: Option<String>,
  pub actions: Vec<RequestAction>,
  pub published: DateTime<Utc>,
}

#[skip_serializing_none]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RequestAction {
  pub action_type: RequestActionType,
  pub target_project: ProjectId,
  /// Unset when the action targets the whole project.
  pub target_package: Option<PackageId>,
}

#[derive(Clone, Debug)]
pub struct RequestInsertForm {
  pub creator_id: PersonId,
  pub description: Option<String>,
  pub actions: Vec<RequestAction>,
}
