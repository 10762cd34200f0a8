use actix_web::{
  web::{self, Data, Json, Query},
  HttpResponse,
};
use commentary_api_common::{
  comment::{CommentListResponse, CreateComment, DeleteComment, EditComment, GetComments},
  commentary_db_views::structs::LocalUserView,
  context::CommentaryContext,
};
use commentary_api_crud::comment::{
  create::create_comment,
  delete::delete_comment,
  list::list_comments,
  update::update_comment,
};
use commentary_utils::error::CommentaryResult;

pub fn config(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1").service(
      web::scope("/comment")
        .route("", web::post().to(route_create_comment))
        .route("", web::put().to(route_update_comment))
        .route("/delete", web::post().to(route_delete_comment))
        .route("/list", web::get().to(route_list_comments)),
    ),
  );
}

/// Sends the comment list with the http status matching its outcome.
fn respond(Json(response): Json<CommentListResponse>) -> HttpResponse {
  HttpResponse::build(response.status.status_code()).json(response)
}

async fn route_create_comment(
  data: Json<CreateComment>,
  context: Data<CommentaryContext>,
  local_user_view: Option<LocalUserView>,
) -> CommentaryResult<HttpResponse> {
  Ok(respond(
    create_comment(data, context, local_user_view).await?,
  ))
}

async fn route_update_comment(
  data: Json<EditComment>,
  context: Data<CommentaryContext>,
  local_user_view: Option<LocalUserView>,
) -> CommentaryResult<HttpResponse> {
  Ok(respond(
    update_comment(data, context, local_user_view).await?,
  ))
}

async fn route_delete_comment(
  data: Json<DeleteComment>,
  context: Data<CommentaryContext>,
  local_user_view: Option<LocalUserView>,
) -> CommentaryResult<HttpResponse> {
  Ok(respond(
    delete_comment(data, context, local_user_view).await?,
  ))
}

async fn route_list_comments(
  data: Query<GetComments>,
  context: Data<CommentaryContext>,
) -> CommentaryResult<HttpResponse> {
  Ok(respond(list_comments(data, context).await?))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    seed::{load_seed, Seed},
    session_middleware::SessionMiddleware,
  };
  use actix_web::{http::StatusCode, test, App};
  use pretty_assertions::assert_eq;
  use serde_json::{json, Value};

  async fn init_context() -> CommentaryResult<CommentaryContext> {
    let context = CommentaryContext::init_test_context();
    let seed: Seed = serde_json::from_value(json!({
      "persons": [{ "name": "luck" }, { "name": "tom" }, { "name": "Admin", "admin": true }],
      "projects": ["home:luck"],
      "login_tokens": [
        { "person": "luck", "token": "luck-token" },
        { "person": "tom", "token": "tom-token" },
        { "person": "Admin", "token": "admin-token" }
      ]
    }))?;
    load_seed(context.pool(), &seed).await?;
    Ok(context)
  }

  #[actix_web::test]
  async fn comment_lifecycle_over_http() -> CommentaryResult<()> {
    let context = init_context().await?;
    let app = test::init_service(
      App::new()
        .wrap(SessionMiddleware::new(context.clone()))
        .app_data(Data::new(context.clone()))
        .configure(config),
    )
    .await;

    let req = test::TestRequest::post()
      .uri("/api/v1/comment")
      .insert_header(("auth", "luck-token"))
      .set_json(json!({
        "commentable_type": "Project",
        "commentable_id": 1,
        "comment": { "body": "This project is AWESOME!" }
      }))
      .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(StatusCode::OK, res.status());
    let body: Value = test::read_body_json(res).await;
    assert_eq!(json!("ok"), body["status"]);
    assert_eq!(json!("Comment created successfully."), body["flash"]["message"]);
    assert_eq!(json!("This project is AWESOME!"), body["comments"][0]["comment"]["body"]);

    let req = test::TestRequest::put()
      .uri("/api/v1/comment")
      .insert_header(("auth", "tom-token"))
      .set_json(json!({ "comment_id": 1, "comment": { "body": "Mine now" } }))
      .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(StatusCode::FORBIDDEN, res.status());

    let req = test::TestRequest::put()
      .uri("/api/v1/comment")
      .insert_header(("auth", "luck-token"))
      .set_json(json!({ "comment_id": 1, "comment": { "body": "  " } }))
      .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, res.status());

    let req = test::TestRequest::post()
      .uri("/api/v1/comment/delete")
      .insert_header(("auth", "admin-token"))
      .set_json(json!({ "comment_id": 1 }))
      .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(StatusCode::OK, res.status());

    let req = test::TestRequest::get()
      .uri("/api/v1/comment/list?commentable_type=Project&commentable_id=1")
      .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(json!([]), body["comments"]);
    assert_eq!(None, body.get("flash"));
    Ok(())
  }

  #[actix_web::test]
  async fn hard_failures_over_http() -> CommentaryResult<()> {
    let context = init_context().await?;
    let app = test::init_service(
      App::new()
        .wrap(SessionMiddleware::new(context.clone()))
        .app_data(Data::new(context.clone()))
        .configure(config),
    )
    .await;

    let create = |token: Option<&str>, body: Value| {
      let mut req = test::TestRequest::post().uri("/api/v1/comment").set_json(body);
      if let Some(token) = token {
        req = req.insert_header(("auth", token.to_string()));
      }
      req.to_request()
    };

    let res = test::call_service(
      &app,
      create(
        None,
        json!({
          "commentable_type": "Project",
          "commentable_id": 1,
          "comment": { "body": "Hi" }
        }),
      ),
    )
    .await;
    assert_eq!(StatusCode::UNAUTHORIZED, res.status());
    let body: Value = test::read_body_json(res).await;
    assert_eq!(json!({ "error": "not_logged_in" }), body);

    let res = test::call_service(
      &app,
      create(
        Some("luck-token"),
        json!({
          "commentable_type": "Project",
          "commentable_id": 1,
          "comment": { "body": "Hi", "user_id": 2 }
        }),
      ),
    )
    .await;
    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let res = test::call_service(
      &app,
      create(
        Some("luck-token"),
        json!({
          "commentable_type": "Distribution",
          "commentable_id": 1,
          "comment": { "body": "Hi" }
        }),
      ),
    )
    .await;
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());

    let req = test::TestRequest::post()
      .uri("/api/v1/comment/delete")
      .insert_header(("auth", "admin-token"))
      .set_json(json!({ "comment_id": 4711 }))
      .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(StatusCode::NOT_FOUND, res.status());
    Ok(())
  }
}
