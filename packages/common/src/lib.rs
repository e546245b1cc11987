pub mod assets;
pub mod filename;
pub mod page;
pub mod storage;

pub use assets::Assets;
pub use page::{AssetRef, Page};
