mod about;
mod auth;
mod home;
mod repository;
