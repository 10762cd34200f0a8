use commentary_api_common::context::CommentaryContext;
use commentary_db_schema::{
  newtypes::{CommentableRef, RoleTarget},
  source::{
    comment::{Comment, CommentInsertForm},
    package::{Package, PackageInsertForm},
    person::{Person, PersonInsertForm},
    project::{Project, ProjectInsertForm},
    relationship::{Relationship, RelationshipForm},
    request::{Request, RequestAction, RequestInsertForm},
  },
  traits::Crud,
  RequestActionType,
  Role,
};
use commentary_db_views::structs::LocalUserView;
use commentary_utils::error::CommentaryResult;

pub(crate) struct Data {
  pub(crate) luck: LocalUserView,
  pub(crate) tom: LocalUserView,
  pub(crate) admin: LocalUserView,
  pub(crate) maintainer: LocalUserView,
  pub(crate) project: Project,
  pub(crate) package: Package,
  pub(crate) request: Request,
}

async fn person(context: &CommentaryContext, name: &str, admin: bool) -> CommentaryResult<Person> {
  let form = PersonInsertForm {
    admin: Some(admin),
    ..PersonInsertForm::test_form(name)
  };
  Person::create(context.pool(), &form).await
}

/// luck, tom and Admin, a project with one package maintained by Iggy, and a request by
/// burdenski targeting that package.
pub(crate) async fn init_data(context: &CommentaryContext) -> CommentaryResult<Data> {
  let pool = context.pool();
  let luck = person(context, "luck", false).await?;
  let tom = person(context, "tom", false).await?;
  let admin = person(context, "Admin", true).await?;
  let maintainer = person(context, "Iggy", false).await?;
  let burdenski = person(context, "burdenski", false).await?;

  let project = Project::create(
    pool,
    &ProjectInsertForm {
      name: "home:Iggy".to_string(),
    },
  )
  .await?;
  let package = Package::create(
    pool,
    &PackageInsertForm {
      project_id: project.id,
      name: "TestPack".to_string(),
    },
  )
  .await?;
  Relationship::create(
    pool,
    &RelationshipForm {
      person_id: maintainer.id,
      role: Role::Maintainer,
      target: RoleTarget::Project(project.id),
    },
  )
  .await?;
  let request = Request::create(
    pool,
    &RequestInsertForm {
      creator_id: burdenski.id,
      description: None,
      actions: vec![RequestAction {
        action_type: RequestActionType::SetBugowner,
        target_project: project.id,
        target_package: Some(package.id),
      }],
    },
  )
  .await?;

  Ok(Data {
    luck: LocalUserView::read(pool, luck.id).await?,
    tom: LocalUserView::read(pool, tom.id).await?,
    admin: LocalUserView::read(pool, admin.id).await?,
    maintainer: LocalUserView::read(pool, maintainer.id).await?,
    project,
    package,
    request,
  })
}

pub(crate) async fn comment_by(
  context: &CommentaryContext,
  author: &LocalUserView,
  commentable: CommentableRef,
  body: &str,
) -> CommentaryResult<Comment> {
  let form = CommentInsertForm::new(author.person.id, commentable, body.to_string());
  Comment::create(context.pool(), &form).await
}
