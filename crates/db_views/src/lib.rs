pub mod comment_view;
pub mod commentable_view;
pub mod local_user_view;
pub mod structs;
