use crate::{
  newtypes::ProjectId,
  source::project::{Project, ProjectInsertForm},
  utils::DbPool,
};
use chrono::Utc;
use commentary_utils::error::{CommentaryErrorType, CommentaryResult};

impl Project {
  pub async fn create(pool: &DbPool, form: &ProjectInsertForm) -> CommentaryResult<Self> {
    let mut tables = pool.write().await;
    let id = tables.sequences.next_project();
    let project = Project {
      id,
      name: form.name.clone(),
      published: Utc::now(),
    };
    tables.projects.insert(id, project.clone());
    Ok(project)
  }

  pub async fn read(pool: &DbPool, project_id: ProjectId) -> CommentaryResult<Self> {
    pool
      .read()
      .await
      .projects
      .get(&project_id)
      .cloned()
      .ok_or_else(|| CommentaryErrorType::NotFound.into())
  }

  pub async fn read_by_name(pool: &DbPool, name: &str) -> CommentaryResult<Self> {
    pool
      .read()
      .await
      .projects
      .values()
      .find(|p| p.name == name)
      .cloned()
      .ok_or_else(|| CommentaryErrorType::NotFound.into())
  }
}
