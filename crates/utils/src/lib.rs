pub mod error;
pub mod settings;
pub mod utils;

pub use error::{CommentaryError, CommentaryResult};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
