use clap::Parser;
use commentary_server::{start_commentary_server, CmdArgs};
use commentary_utils::error::CommentaryResult;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
pub async fn main() -> CommentaryResult<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();
  tracing_subscriber::fmt().with_env_filter(filter).init();

  let args = CmdArgs::parse();

  start_commentary_server(args).await?;
  Ok(())
}
