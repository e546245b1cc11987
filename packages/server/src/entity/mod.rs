pub mod post;
pub mod post_meta;
pub mod profile;
