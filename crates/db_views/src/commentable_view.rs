use crate::structs::{CommentSlimView, CommentableView, LocalUserView, RequestTarget, RequestView};
use commentary_db_schema::{
  newtypes::{CommentableRef, RequestId},
  source::{package::Package, project::Project, request::Request},
  utils::DbPool,
  Permission,
};
use commentary_utils::error::CommentaryResult;

impl CommentableView {
  pub async fn read(pool: &DbPool, commentable: CommentableRef) -> CommentaryResult<Self> {
    Ok(match commentable {
      CommentableRef::Project(id) => CommentableView::Project(Project::read(pool, id).await?),
      CommentableRef::Package(id) => CommentableView::Package(Package::read(pool, id).await?),
      CommentableRef::Request(id) => CommentableView::Request(RequestView::read(pool, id).await?),
    })
  }

  pub fn commentable_ref(&self) -> CommentableRef {
    match self {
      CommentableView::Project(project) => CommentableRef::Project(project.id),
      CommentableView::Package(package) => CommentableRef::Package(package.id),
      CommentableView::Request(request) => CommentableRef::Request(request.request.id),
    }
  }

  pub async fn comments(&self, pool: &DbPool) -> CommentaryResult<Vec<CommentSlimView>> {
    CommentSlimView::list(pool, self.commentable_ref()).await
  }
}

impl RequestView {
  pub async fn read(pool: &DbPool, request_id: RequestId) -> CommentaryResult<Self> {
    let request = Request::read(pool, request_id).await?;
    let mut targets = Vec::with_capacity(request.actions.len());
    for action in &request.actions {
      let project = Project::read(pool, action.target_project).await?;
      let package = match action.target_package {
        Some(package_id) => Some(Package::read(pool, package_id).await?),
        None => None,
      };
      targets.push(RequestTarget { project, package });
    }
    Ok(Self { request, targets })
  }

  /// Whether `person` maintains any target of this request.
  ///
  /// A target naming a package needs `change_package` on it, a target naming only a project
  /// needs `change_project`.
  pub fn is_target_maintainer(&self, person: &LocalUserView) -> bool {
    self.targets.iter().any(|target| match &target.package {
      Some(package) => person.has_local_permission(Permission::ChangePackage, package),
      None => person.has_local_permission(Permission::ChangeProject, &target.project),
    })
  }
}
