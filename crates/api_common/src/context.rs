use commentary_db_schema::utils::DbPool;
use commentary_utils::settings::structs::Settings;

#[derive(Clone)]
pub struct CommentaryContext {
  pool: DbPool,
}

impl CommentaryContext {
  pub fn create(pool: DbPool) -> CommentaryContext {
    CommentaryContext { pool }
  }

  /// Builds an empty store limited the way `settings` says.
  pub fn from_settings(settings: &Settings) -> CommentaryContext {
    Self::create(DbPool::new(settings.comments.max_body_length))
  }

  pub fn pool(&self) -> &DbPool {
    &self.pool
  }

  /// Context with an empty store and default limits, for tests.
  pub fn init_test_context() -> CommentaryContext {
    Self::from_settings(&Settings::default())
  }
}
