pub mod about;
pub mod auth;
pub mod blog;
pub mod home;
pub mod media;
