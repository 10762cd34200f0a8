pub mod api_routes;
pub mod root_span_builder;
pub mod seed;
pub mod session_middleware;

use actix_web::{web::Data, App, HttpServer};
use clap::Parser;
use commentary_api_common::context::CommentaryContext;
use commentary_utils::{
  error::CommentaryResult,
  settings::{config_docs, structs::Settings, SETTINGS},
  VERSION,
};
use root_span_builder::QuieterRootSpanBuilder;
use session_middleware::SessionMiddleware;
use tracing_actix_web::TracingLogger;

#[derive(Parser, Debug)]
#[command(
  version,
  about = "Comments on projects, packages and review requests",
  long_about = "Comments on projects, packages and review requests.\n\nThis is the comment server \
                of a build service. It keeps its data in memory, optionally seeded from a JSON \
                fixture named in the config file."
)]
pub struct CmdArgs {
  /// Read the configuration from this file instead of `COMMENTARY_CONFIG_LOCATION` or
  /// `config/config.hjson`.
  #[arg(long)]
  config: Option<String>,
  /// Print the documented default configuration and exit.
  #[arg(long, default_value_t = false)]
  print_config_docs: bool,
}

/// Placing the main function in lib.rs allows other crates to import it and embed the server.
pub async fn start_commentary_server(args: CmdArgs) -> CommentaryResult<()> {
  if args.print_config_docs {
    println!("{}", config_docs());
    return Ok(());
  }

  let settings = match &args.config {
    Some(path) => Settings::init_from(path)?,
    None => SETTINGS.clone(),
  };
  tracing::info!("Starting commentary v{VERSION}");

  let context = CommentaryContext::from_settings(&settings);
  if let Some(seed_file) = &settings.seed_file {
    seed::load_seed_file(context.pool(), seed_file).await?;
  }

  let bind = settings.bind_address();
  tracing::info!("Listening on {}:{}", bind.0, bind.1);
  HttpServer::new(move || {
    App::new()
      .wrap(SessionMiddleware::new(context.clone()))
      .wrap(TracingLogger::<QuieterRootSpanBuilder>::new())
      .app_data(Data::new(context.clone()))
      .configure(api_routes::config)
  })
  .bind(bind)?
  .run()
  .await?;

  Ok(())
}
