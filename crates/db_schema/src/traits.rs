use crate::utils::DbPool;
use async_trait::async_trait;
use commentary_utils::error::{CommentaryErrorType, CommentaryResult};

#[async_trait]
pub trait Crud {
  type InsertForm: Sync;
  type UpdateForm: Sync;
  type IdType: Send;
  async fn create(pool: &DbPool, form: &Self::InsertForm) -> CommentaryResult<Self>
  where
    Self: Sized;
  async fn read(pool: &DbPool, id: Self::IdType) -> CommentaryResult<Self>
  where
    Self: Sized;
  /// when you want to null out a column, you have to send Some(None)), since sending None means
  /// you just don't want to update that column.
  async fn update(
    pool: &DbPool,
    id: Self::IdType,
    form: &Self::UpdateForm,
  ) -> CommentaryResult<Self>
  where
    Self: Sized;
  async fn delete(_pool: &DbPool, _id: Self::IdType) -> CommentaryResult<usize>
  where
    Self: Sized,
  {
    Err(CommentaryErrorType::NotFound.into())
  }
}
