pub mod impls;
pub mod newtypes;
pub mod source;
pub mod traits;
pub mod utils;

use newtypes::{CommentableRef, PackageId, ProjectId, RequestId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The entity kinds which carry a comments collection.
#[derive(EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentableType {
  Project,
  Package,
  #[strum(to_string = "BsRequest", serialize = "Request")]
  #[serde(rename = "BsRequest", alias = "Request")]
  Request,
}

impl CommentableType {
  pub fn with_id(self, id: i32) -> CommentableRef {
    match self {
      CommentableType::Project => CommentableRef::Project(ProjectId(id)),
      CommentableType::Package => CommentableRef::Package(PackageId(id)),
      CommentableType::Request => CommentableRef::Request(RequestId(id)),
    }
  }
}

/// Permissions which a role grants on the project or package it is held on.
#[derive(EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Permission {
  ChangeProject,
  ChangePackage,
}

#[derive(EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
  Maintainer,
  Bugowner,
  Reviewer,
}

impl Role {
  pub fn grants(self, permission: Permission) -> bool {
    match self {
      Role::Maintainer => matches!(
        permission,
        Permission::ChangeProject | Permission::ChangePackage
      ),
      Role::Bugowner | Role::Reviewer => false,
    }
  }
}

#[derive(EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestActionType {
  Submit,
  Delete,
  SetBugowner,
  AddRole,
}
