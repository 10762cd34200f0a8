use crate::{
  newtypes::RequestId,
  source::request::{Request, RequestInsertForm},
  utils::DbPool,
};
use chrono::Utc;
use commentary_utils::error::{CommentaryErrorType, CommentaryResult};

impl Request {
  pub async fn create(pool: &DbPool, form: &RequestInsertForm) -> CommentaryResult<Self> {
    let mut tables = pool.write().await;
    let targets_exist = form.actions.iter().all(|action| {
      tables.projects.contains_key(&action.target_project)
        && action
          .target_package
          .is_none_or(|package_id| tables.packages.contains_key(&package_id))
    });
    if !tables.persons.contains_key(&form.creator_id) || !targets_exist {
      Err(CommentaryErrorType::NotFound)?
    }
    let id = tables.sequences.next_request();
    let request = Request {
      id,
      creator_id: Some(form.creator_id),
      description: form.description.clone(),
      actions: form.actions.clone(),
      published: Utc::now(),
    };
    tables.requests.insert(id, request.clone());
    Ok(request)
  }

  pub async fn read(pool: &DbPool, request_id: RequestId) -> CommentaryResult<Self> {
    pool
      .read()
      .await
      .requests
      .get(&request_id)
      .cloned()
      .ok_or_else(|| CommentaryErrorType::NotFound.into())
  }
}
