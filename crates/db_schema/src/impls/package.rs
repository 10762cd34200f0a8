use crate::{
  newtypes::PackageId,
  source::package::{Package, PackageInsertForm},
  utils::DbPool,
};
use chrono::Utc;
use commentary_utils::error::{CommentaryErrorType, CommentaryResult};

impl Package {
  pub async fn create(pool: &DbPool, form: &PackageInsertForm) -> CommentaryResult<Self> {
    let mut tables = pool.write().await;
    if !tables.projects.contains_key(&form.project_id) {
      Err(CommentaryErrorType::NotFound)?
    }
    let id = tables.sequences.next_package();
    let package = Package {
      id,
      project_id: form.project_id,
      name: form.name.clone(),
      published: Utc::now(),
    };
    tables.packages.insert(id, package.clone());
    Ok(package)
  }

  pub async fn read(pool: &DbPool, package_id: PackageId) -> CommentaryResult<Self> {
    pool
      .read()
      .await
      .packages
      .get(&package_id)
      .cloned()
      .ok_or_else(|| CommentaryErrorType::NotFound.into())
  }
}
