pub mod hash;
pub mod jwt;
pub mod response;
pub mod url;
