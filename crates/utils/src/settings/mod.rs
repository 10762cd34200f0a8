use crate::error::CommentaryResult;
use deser_hjson::from_str;
use std::{env, fs, sync::LazyLock};
use structs::Settings;

pub mod structs;

static DEFAULT_CONFIG_FILE: &str = "config/config.hjson";

#[allow(clippy::expect_used)]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(|| {
  if env::var("COMMENTARY_INITIALIZE_WITH_DEFAULT_SETTINGS").is_ok() {
    println!(
      "COMMENTARY_INITIALIZE_WITH_DEFAULT_SETTINGS was set, any configuration file has been ignored."
    );
    println!("Use with other environment variables to configure this instance further; e.g. COMMENTARY_PORT.");
    Settings::default()
  } else {
    Settings::init().expect("Failed to load settings file, see config/defaults.hjson.")
  }
});

impl Settings {
  /// Reads config from configuration file.
  ///
  /// Note: `COMMENTARY_CONFIG_LOCATION` selects another file, and `COMMENTARY_PORT` overrides
  /// the port after the file was read.
  pub fn init() -> CommentaryResult<Self> {
    Self::init_from(&Self::get_config_location())
  }

  /// Reads config from the given file, `COMMENTARY_PORT` still applies.
  pub fn init_from(path: &str) -> CommentaryResult<Self> {
    let mut config = from_str::<Settings>(&fs::read_to_string(path)?)?;
    if let Ok(port) = env::var("COMMENTARY_PORT") {
      config.port = port.parse()?;
    }
    Ok(config)
  }

  pub fn get_config_location() -> String {
    env::var("COMMENTARY_CONFIG_LOCATION").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
  }

  /// Address and port for the http server.
  pub fn bind_address(&self) -> (std::net::IpAddr, u16) {
    (self.bind, self.port)
  }
}

/// The documented default configuration, in hjson.
pub fn config_docs() -> String {
  use doku::json::{AutoComments, CommentsStyle, Formatting, ObjectsStyle};
  let fmt = Formatting {
    auto_comments: AutoComments::none(),
    comments_style: CommentsStyle {
      separator: "#".to_owned(),
    },
    objects_style: ObjectsStyle {
      surround_keys_with_quotes: false,
      use_comma_as_separator: false,
    },
    ..Default::default()
  };
  doku::to_json_fmt_val(&fmt, &Settings::default())
}
