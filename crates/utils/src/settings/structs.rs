use doku::Document;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::net::{IpAddr, Ipv4Addr};

#[derive(Debug, Deserialize, Serialize, Clone, SmartDefault, Document)]
#[serde(default)]
pub struct Settings {
  /// Address where commentary should listen for incoming requests
  #[default(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)))]
  #[doku(as = "String")]
  pub bind: IpAddr,
  /// Port where commentary should listen for incoming requests
  #[default(8536)]
  pub port: u16,
  /// Limits applied when comments are validated
  #[default(Default::default())]
  pub comments: CommentConfig,
  /// JSON file with persons, projects, packages, requests and login tokens which is loaded into
  /// the store at startup
  #[default(None)]
  #[doku(example = "config/seed.json")]
  pub seed_file: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, SmartDefault, Document)]
#[serde(default, deny_unknown_fields)]
pub struct CommentConfig {
  /// Maximum length of a comment body, counted in UTF-16 code units
  #[default(65_535)]
  pub max_body_length: usize,
}
