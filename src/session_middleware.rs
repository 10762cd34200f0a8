use actix_web::{
  body::MessageBody,
  dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
  http::header::{HeaderValue, CACHE_CONTROL},
  Error,
  HttpMessage,
};
use commentary_api_common::{
  commentary_db_views::structs::LocalUserView,
  context::CommentaryContext,
};
use core::future::Ready;
use futures_util::future::LocalBoxFuture;
use std::{future::ready, rc::Rc};

static AUTH_COOKIE_NAME: &str = "auth";

/// Resolves the `auth` login token of a request into the acting person.
#[derive(Clone)]
pub struct SessionMiddleware {
  context: CommentaryContext,
}

impl SessionMiddleware {
  pub fn new(context: CommentaryContext) -> Self {
    SessionMiddleware { context }
  }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = SessionService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(SessionService {
      service: Rc::new(service),
      context: self.context.clone(),
    }))
  }
}

pub struct SessionService<S> {
  service: Rc<S>,
  context: CommentaryContext,
}

impl<S, B> Service<ServiceRequest> for SessionService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let svc = self.service.clone();
    let context = self.context.clone();

    Box::pin(async move {
      // Header first, then cookie
      let token = req
        .headers()
        .get(AUTH_COOKIE_NAME)
        .and_then(|h| h.to_str().ok())
        .map(ToString::to_string)
        .or_else(|| req.cookie(AUTH_COOKIE_NAME).map(|c| c.value().to_string()));

      if let Some(token) = &token {
        // An unknown token leaves the request anonymous
        match LocalUserView::read_from_token(context.pool(), token).await {
          Ok(local_user_view) => {
            req.extensions_mut().insert(local_user_view);
          }
          Err(e) => tracing::debug!("Ignoring login token: {}", e.error_type),
        }
      }

      let mut res = svc.call(req).await?;

      let cache_value = if token.is_some() {
        "private"
      } else {
        "public, max-age=60"
      };
      res
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static(cache_value));
      Ok(res)
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::{
    cookie::Cookie,
    test,
    web::{self, Data},
    App,
    HttpResponse,
  };
  use commentary_db_schema::{
    source::{
      login_token::LoginToken,
      person::{Person, PersonInsertForm},
    },
    traits::Crud,
  };
  use commentary_utils::error::CommentaryResult;
  use pretty_assertions::assert_eq;

  async fn whoami(local_user_view: Option<LocalUserView>) -> HttpResponse {
    HttpResponse::Ok().body(
      local_user_view
        .map(|v| v.person.name)
        .unwrap_or_else(|| "anonymous".to_string()),
    )
  }

  #[actix_web::test]
  async fn resolves_header_and_cookie_tokens() -> CommentaryResult<()> {
    let context = CommentaryContext::init_test_context();
    let person = Person::create(context.pool(), &PersonInsertForm::test_form("luck")).await?;
    let token = LoginToken::create(context.pool(), person.id).await?.token;

    let app = test::init_service(
      App::new()
        .wrap(SessionMiddleware::new(context.clone()))
        .app_data(Data::new(context.clone()))
        .route("/whoami", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
      .uri("/whoami")
      .insert_header((AUTH_COOKIE_NAME, token.as_str()))
      .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(
      Some("private"),
      res
        .headers()
        .get(CACHE_CONTROL)
        .and_then(|h| h.to_str().ok())
    );
    assert_eq!("luck", test::read_body(res).await);

    let req = test::TestRequest::get()
      .uri("/whoami")
      .cookie(Cookie::new(AUTH_COOKIE_NAME, token.clone()))
      .to_request();
    assert_eq!("luck", test::call_and_read_body(&app, req).await);

    let req = test::TestRequest::get()
      .uri("/whoami")
      .insert_header((AUTH_COOKIE_NAME, "not-a-token"))
      .to_request();
    assert_eq!("anonymous", test::call_and_read_body(&app, req).await);

    Person::delete_account(context.pool(), person.id).await?;
    let req = test::TestRequest::get()
      .uri("/whoami")
      .insert_header((AUTH_COOKIE_NAME, token.as_str()))
      .to_request();
    assert_eq!("anonymous", test::call_and_read_body(&app, req).await);
    Ok(())
  }
}
