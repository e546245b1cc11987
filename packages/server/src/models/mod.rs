pub mod auth;
pub mod blog;
pub mod home;
pub mod profile;
pub mod shared;
