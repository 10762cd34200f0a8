use crate::{
  newtypes::{PersonId, RoleTarget},
  source::relationship::{Relationship, RelationshipForm},
  utils::DbPool,
};
use commentary_utils::error::{CommentaryErrorType, CommentaryResult};

impl Relationship {
  /// Grants a role. Granting the same role twice is a no-op.
  pub async fn create(pool: &DbPool, form: &RelationshipForm) -> CommentaryResult<Self> {
    let mut tables = pool.write().await;
    let target_exists = match form.target {
      RoleTarget::Project(id) => tables.projects.contains_key(&id),
      RoleTarget::Package(id) => tables.packages.contains_key(&id),
    };
    if !target_exists || !tables.persons.contains_key(&form.person_id) {
      Err(CommentaryErrorType::NotFound)?
    }
    let relationship = Relationship {
      person_id: form.person_id,
      role: form.role,
      target: form.target,
    };
    if !tables.relationships.contains(&relationship) {
      tables.relationships.push(relationship.clone());
    }
    Ok(relationship)
  }

  pub async fn list_for_person(pool: &DbPool, person_id: PersonId) -> Vec<Self> {
    pool
      .read()
      .await
      .relationships
      .iter()
      .filter(|r| r.person_id == person_id)
      .cloned()
      .collect()
  }
}
