use commentary_db_schema::source::{
  comment::Comment,
  package::Package,
  person::Person,
  project::Project,
  relationship::Relationship,
  request::Request,
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// The acting principal: a person together with the roles they hold.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LocalUserView {
  pub person: Person,
  pub relationships: Vec<Relationship>,
}

/// A comment with everything needed to decide who may change it.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CommentView {
  pub comment: Comment,
  pub creator: Option<Person>,
  pub commentable: CommentableView,
}

/// A comment as it appears in the comment list of its commentable.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CommentSlimView {
  pub comment: Comment,
  pub creator: Option<Person>,
}

/// The loaded entity a comment belongs to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type_", content = "data")]
pub enum CommentableView {
  Project(Project),
  Package(Package),
  #[serde(rename = "BsRequest")]
  Request(RequestView),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RequestView {
  pub request: Request,
  /// The loaded targets of every request action, in action order.
  pub targets: Vec<RequestTarget>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RequestTarget {
  pub project: Project,
  pub package: Option<Package>,
}
