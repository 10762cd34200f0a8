use crate::{
  newtypes::{CommentId, PackageId, PersonId, ProjectId, RequestId},
  source::{
    comment::Comment,
    login_token::LoginToken,
    package::Package,
    person::Person,
    project::Project,
    relationship::Relationship,
    request::Request,
  },
};
use std::{
  collections::{BTreeMap, HashMap},
  sync::Arc,
};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Default for the longest comment body accepted by the store.
pub const DEFAULT_MAX_BODY_LENGTH: usize = 65_535;

/// Per table serial counters. Ids are never reused, even after a row is removed.
#[derive(Default)]
pub(crate) struct Sequences {
  person: i32,
  project: i32,
  package: i32,
  request: i32,
  comment: i32,
}

impl Sequences {
  pub(crate) fn next_person(&mut self) -> PersonId {
    self.person += 1;
    PersonId(self.person)
  }
  pub(crate) fn next_project(&mut self) -> ProjectId {
    self.project += 1;
    ProjectId(self.project)
  }
  pub(crate) fn next_package(&mut self) -> PackageId {
    self.package += 1;
    PackageId(self.package)
  }
  pub(crate) fn next_request(&mut self) -> RequestId {
    self.request += 1;
    RequestId(self.request)
  }
  pub(crate) fn next_comment(&mut self) -> CommentId {
    self.comment += 1;
    CommentId(self.comment)
  }
}

#[derive(Default)]
pub(crate) struct Tables {
  pub(crate) sequences: Sequences,
  pub(crate) persons: BTreeMap<PersonId, Person>,
  pub(crate) projects: BTreeMap<ProjectId, Project>,
  pub(crate) packages: BTreeMap<PackageId, Package>,
  pub(crate) requests: BTreeMap<RequestId, Request>,
  pub(crate) relationships: Vec<Relationship>,
  pub(crate) comments: BTreeMap<CommentId, Comment>,
  pub(crate) login_tokens: HashMap<String, LoginToken>,
}

/// Handle to the in-process store.
///
/// All tables sit behind one lock, so every call observes a consistent snapshot and concurrent
/// writes to the same row resolve as last write wins.
#[derive(Clone)]
pub struct DbPool {
  tables: Arc<RwLock<Tables>>,
  max_body_length: usize,
}

impl Default for DbPool {
  fn default() -> Self {
    DbPool::new(DEFAULT_MAX_BODY_LENGTH)
  }
}

impl DbPool {
  pub fn new(max_body_length: usize) -> Self {
    DbPool {
      tables: Arc::new(RwLock::new(Tables::default())),
      max_body_length,
    }
  }

  pub fn max_body_length(&self) -> usize {
    self.max_body_length
  }

  pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Tables> {
    self.tables.read().await
  }

  pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
    self.tables.write().await
  }
}

pub fn build_db_pool_for_tests() -> DbPool {
  DbPool::default()
}
