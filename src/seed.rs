use commentary_db_schema::{
  newtypes::{PackageId, RoleTarget},
  source::{
    login_token::LoginToken,
    package::{Package, PackageInsertForm},
    person::{Person, PersonInsertForm},
    project::{Project, ProjectInsertForm},
    relationship::{Relationship, RelationshipForm},
    request::{Request, RequestAction, RequestInsertForm},
  },
  traits::Crud,
  utils::DbPool,
  RequestActionType,
  Role,
};
use commentary_utils::error::{CommentaryErrorExt, CommentaryErrorType, CommentaryResult};
use serde::Deserialize;
use std::collections::HashMap;

/// Fixture data loaded into the store at startup. Everything refers to other entries by name.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Seed {
  pub persons: Vec<SeedPerson>,
  pub projects: Vec<String>,
  pub packages: Vec<SeedPackage>,
  pub relationships: Vec<SeedRelationship>,
  pub requests: Vec<SeedRequest>,
  pub login_tokens: Vec<SeedLoginToken>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedPerson {
  pub name: String,
  #[serde(default)]
  pub admin: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedPackage {
  pub project: String,
  pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedRelationship {
  pub person: String,
  pub role: Role,
  pub project: String,
  /// Holds the role on this package of `project` instead of the whole project.
  pub package: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedRequest {
  pub creator: String,
  pub description: Option<String>,
  pub actions: Vec<SeedRequestAction>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedRequestAction {
  pub action_type: RequestActionType,
  pub target_project: String,
  pub target_package: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedLoginToken {
  pub person: String,
  pub token: String,
}

pub async fn load_seed_file(pool: &DbPool, path: &str) -> CommentaryResult<()> {
  let contents = tokio::fs::read_to_string(path)
    .await
    .with_commentary_type(CommentaryErrorType::CouldntLoadSeedFile)?;
  let seed: Seed = serde_json::from_str(&contents)
    .with_commentary_type(CommentaryErrorType::CouldntLoadSeedFile)?;
  load_seed(pool, &seed).await?;
  tracing::info!(
    "Loaded {} persons, {} projects, {} packages and {} requests from {}",
    seed.persons.len(),
    seed.projects.len(),
    seed.packages.len(),
    seed.requests.len(),
    path
  );
  Ok(())
}

pub async fn load_seed(pool: &DbPool, seed: &Seed) -> CommentaryResult<()> {
  for person in &seed.persons {
    let form = PersonInsertForm {
      admin: Some(person.admin),
      ..PersonInsertForm::test_form(&person.name)
    };
    Person::create(pool, &form).await?;
  }
  for name in &seed.projects {
    Project::create(pool, &ProjectInsertForm { name: name.clone() }).await?;
  }

  let mut packages: HashMap<(&str, &str), PackageId> = HashMap::new();
  for package in &seed.packages {
    let project = Project::read_by_name(pool, &package.project).await?;
    let form = PackageInsertForm {
      project_id: project.id,
      name: package.name.clone(),
    };
    let inserted = Package::create(pool, &form).await?;
    packages.insert((package.project.as_str(), package.name.as_str()), inserted.id);
  }
  let package_id = |project: &str, name: &str| {
    packages
      .get(&(project, name))
      .copied()
      .ok_or(CommentaryErrorType::NotFound)
  };

  for relationship in &seed.relationships {
    let person = Person::read_by_name(pool, &relationship.person).await?;
    let target = match &relationship.package {
      Some(package) => RoleTarget::Package(package_id(&relationship.project, package)?),
      None => RoleTarget::Project(Project::read_by_name(pool, &relationship.project).await?.id),
    };
    let form = RelationshipForm {
      person_id: person.id,
      role: relationship.role,
      target,
    };
    Relationship::create(pool, &form).await?;
  }

  for request in &seed.requests {
    let creator = Person::read_by_name(pool, &request.creator).await?;
    let mut actions = Vec::with_capacity(request.actions.len());
    for action in &request.actions {
      let target_project = Project::read_by_name(pool, &action.target_project).await?;
      let target_package = match &action.target_package {
        Some(package) => Some(package_id(&action.target_project, package)?),
        None => None,
      };
      actions.push(RequestAction {
        action_type: action.action_type,
        target_project: target_project.id,
        target_package,
      });
    }
    let form = RequestInsertForm {
      creator_id: creator.id,
      description: request.description.clone(),
      actions,
    };
    Request::create(pool, &form).await?;
  }

  for login_token in &seed.login_tokens {
    let person = Person::read_by_name(pool, &login_token.person).await?;
    LoginToken::create_with_token(pool, person.id, login_token.token.clone()).await?;
  }
  Ok(())
}
