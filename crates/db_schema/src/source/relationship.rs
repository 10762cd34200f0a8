use crate::{
  newtypes::{PersonId, RoleTarget},
  Role,
};
use serde::{Deserialize, Serialize};

/// A role held by a person on a project or a package.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Relationship {
  pub person_id: PersonId,
  pub role: Role,
  pub target: RoleTarget,
}

#[derive(Clone, Debug)]
pub struct RelationshipForm {
  pub person_id: PersonId,
  pub role: Role,
  pub target: RoleTarget,
}
