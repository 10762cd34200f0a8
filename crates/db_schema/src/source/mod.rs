pub mod comment;
pub mod login_token;
pub mod package;
pub mod person;
pub mod project;
pub mod relationship;
pub mod request;
