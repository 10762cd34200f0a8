use crate::structs::LocalUserView;
use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use commentary_db_schema::{
  newtypes::{PersonId, RoleTarget},
  source::{
    login_token::LoginToken,
    package::Package,
    person::Person,
    project::Project,
    relationship::Relationship,
  },
  traits::Crud,
  utils::DbPool,
  Permission,
};
use commentary_utils::error::{CommentaryError, CommentaryErrorType, CommentaryResult};
use futures_util::future::{ready, Ready};

/// Something a role can be held on, directly or through an enclosing entity.
pub trait LocalPermissionTarget {
  /// Every role target whose roles apply to this entity.
  fn role_targets(&self) -> Vec<RoleTarget>;
}

impl LocalPermissionTarget for Project {
  fn role_targets(&self) -> Vec<RoleTarget> {
    vec![RoleTarget::Project(self.id)]
  }
}

/// Roles on the enclosing project apply to all of its packages.
impl LocalPermissionTarget for Package {
  fn role_targets(&self) -> Vec<RoleTarget> {
    vec![
      RoleTarget::Package(self.id),
      RoleTarget::Project(self.project_id),
    ]
  }
}

impl LocalUserView {
  pub async fn read(pool: &DbPool, person_id: PersonId) -> CommentaryResult<Self> {
    let person = Person::read(pool, person_id).await?;
    let relationships = Relationship::list_for_person(pool, person_id).await;
    Ok(Self {
      person,
      relationships,
    })
  }

  /// Resolves a login token. Unknown tokens and deleted accounts are an incorrect login.
  pub async fn read_from_token(pool: &DbPool, token: &str) -> CommentaryResult<Self> {
    let login_token = LoginToken::read(pool, token)
      .await
      .ok_or(CommentaryErrorType::IncorrectLogin)?;
    let local_user_view = Self::read(pool, login_token.person_id).await?;
    if local_user_view.person.deleted {
      Err(CommentaryErrorType::IncorrectLogin)?
    }
    Ok(local_user_view)
  }

  pub fn is_admin(&self) -> bool {
    self.person.admin
  }

  /// Whether one of this person's roles grants `permission` on `target`.
  pub fn has_local_permission(
    &self,
    permission: Permission,
    target: &impl LocalPermissionTarget,
  ) -> bool {
    let targets = target.role_targets();
    self
      .relationships
      .iter()
      .any(|r| r.role.grants(permission) && targets.contains(&r.target))
  }
}

impl FromRequest for LocalUserView {
  type Error = CommentaryError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(match req.extensions().get::<LocalUserView>() {
      Some(c) => Ok(c.clone()),
      None => Err(CommentaryErrorType::NotLoggedIn.into()),
    })
  }
}
