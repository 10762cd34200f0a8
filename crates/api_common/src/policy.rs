use commentary_db_schema::Permission;
use commentary_db_views::structs::{CommentView, CommentableView, LocalUserView};
use commentary_utils::error::{CommentaryErrorType, CommentaryResult};
use strum::Display;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum CommentAction {
  Update,
  Destroy,
}

/// Decides who may change an existing comment.
///
/// Checked in order, the first matching rule wins:
/// 1. nobody logged in: deny
/// 2. admins: allow
/// 3. the author: allow
/// 4. destroy only: a role on the commentable which lets the person change it
///
/// Anyone else is denied. Nobody owns a comment whose author account was deleted.
pub struct CommentPolicy;

impl CommentPolicy {
  pub fn permits(
    principal: Option<&LocalUserView>,
    comment_view: &CommentView,
    action: CommentAction,
  ) -> bool {
    let Some(principal) = principal.filter(|p| !p.person.deleted) else {
      return false;
    };
    if principal.is_admin() || comment_view.comment.creator_id == Some(principal.person.id) {
      return true;
    }
    match action {
      CommentAction::Update => false,
      CommentAction::Destroy => match &comment_view.commentable {
        CommentableView::Project(project) => {
          principal.has_local_permission(Permission::ChangeProject, project)
        }
        CommentableView::Package(package) => {
          principal.has_local_permission(Permission::ChangePackage, package)
        }
        CommentableView::Request(request) => request.is_target_maintainer(principal),
      },
    }
  }

  pub fn authorize(
    principal: Option<&LocalUserView>,
    comment_view: &CommentView,
    action: CommentAction,
  ) -> CommentaryResult<()> {
    if !Self::permits(principal, comment_view, action) {
      Err(CommentaryErrorType::NotAuthorized)?
    }
    Ok(())
  }
}
