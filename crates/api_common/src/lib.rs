pub mod build_response;
pub mod comment;
pub mod context;
pub mod policy;
pub mod utils;

pub extern crate commentary_db_schema;
pub extern crate commentary_db_views;
pub extern crate commentary_utils;
