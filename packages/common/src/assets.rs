//! Naming-convention lookups for page assets.
//!
//! Every lookup is split in two: a pure function deciding over a directory
//! listing snapshot, and an [`Assets`] method that takes the snapshot from the
//! injected [`AssetStore`] and calls it. Resolution order never depends on
//! filesystem iteration order.

use std::sync::Arc;

use tracing::{debug, info};

use crate::filename::{extension_of, secure_filename};
use crate::page::{
    AssetRef, DOCUMENT_EXTENSIONS, FIG_DIR, IMAGE_EXTENSIONS, LOGOS_DIR, Page, RESUME_DIR,
    has_allowed_extension,
};
use crate::storage::{AssetStore, StorageError};

/// Resume extensions in lookup priority order.
pub const RESUME_PRIORITY: [&str; 3] = [".pdf", ".docx", ".doc"];

/// Default logo extension looked up by slug.
pub const DEFAULT_LOGO_EXTENSION: &str = ".png";

/// Fixed page-level images on the home page.
pub const HOME_LOGO: &str = "logo.png";
pub const HOME_BACKGROUND: &str = "background.png";

/// Page intro files, in fallback order.
pub const PAGE_TEXT_FILES: [&str; 2] = ["index.md", "index.txt"];

/// Stem under which the profile resume is saved.
pub const PROFILE_RESUME_STEM: &str = "resume";

/// First `slug.<ext>` present in `listing`, following [`RESUME_PRIORITY`].
pub fn resume_in<'a>(listing: &'a [String], slug: &str) -> Option<&'a str> {
    RESUME_PRIORITY.iter().find_map(|ext| {
        let wanted = format!("{slug}{ext}");
        listing
            .iter()
            .find(|name| **name == wanted)
            .map(String::as_str)
    })
}

/// `slug.png` if present in the logos listing.
pub fn default_logo_in<'a>(listing: &'a [String], slug: &str) -> Option<&'a str> {
    let wanted = format!("{slug}{DEFAULT_LOGO_EXTENSION}");
    listing
        .iter()
        .find(|name| **name == wanted)
        .map(String::as_str)
}

/// Logo precedence: sidecar override, then the slug-named default, then none.
///
/// Returns a path relative to the blog page directory.
pub fn resolve_logo(meta_logo: Option<&str>, logo_listing: &[String], slug: &str) -> Option<String> {
    if let Some(logo) = meta_logo.filter(|l| !l.trim().is_empty()) {
        return Some(logo.to_string());
    }
    default_logo_in(logo_listing, slug).map(|name| format!("{LOGOS_DIR}/{name}"))
}

/// Allowed images in `listing`, sorted alphabetically.
pub fn images_in(listing: &[String]) -> Vec<String> {
    let mut images: Vec<String> = listing
        .iter()
        .filter(|name| has_allowed_extension(name, IMAGE_EXTENSIONS))
        .cloned()
        .collect();
    images.sort();
    images
}

/// Lexicographically last allowed document in `listing`.
///
/// This is the profile page's "most recent resume" rule. It deliberately
/// ignores modification times.
pub fn latest_document_in(listing: &[String]) -> Option<&str> {
    let mut documents: Vec<&String> = listing
        .iter()
        .filter(|name| has_allowed_extension(name, DOCUMENT_EXTENSIONS))
        .collect();
    documents.sort();
    documents.last().copied().map(String::as_str)
}

/// Asset Store: slug- and convention-based lookups and writes over an
/// [`AssetStore`].
#[derive(Clone)]
pub struct Assets {
    store: Arc<dyn AssetStore>,
}

impl Assets {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn AssetStore {
        &*self.store
    }

    /// Directory listing snapshot of a page subdirectory.
    pub async fn snapshot(&self, page: Page, sub: &str) -> Result<Vec<String>, StorageError> {
        self.store.list(&page.dir(sub)).await
    }

    /// Create every page directory.
    pub async fn ensure_layout(&self) -> Result<(), StorageError> {
        for page in Page::ALL {
            for sub in page.subdirs() {
                self.store.ensure_dir(&page.dir(sub)).await?;
            }
        }
        Ok(())
    }

    /// Resume for `slug` under `<page>/resume`, by extension priority.
    pub async fn find_resume(
        &self,
        page: Page,
        slug: &str,
    ) -> Result<Option<AssetRef>, StorageError> {
        let listing = self.snapshot(page, RESUME_DIR).await?;
        Ok(resume_in(&listing, slug)
            .map(|name| AssetRef::new(page, format!("{RESUME_DIR}/{name}"))))
    }

    /// Blog logo for `slug`, honouring a sidecar override.
    pub async fn find_logo(
        &self,
        meta_logo: Option<&str>,
        slug: &str,
    ) -> Result<Option<AssetRef>, StorageError> {
        if let Some(logo) = meta_logo.filter(|l| !l.trim().is_empty()) {
            return Ok(Some(AssetRef::new(Page::Blog, logo)));
        }
        let listing = self.snapshot(Page::Blog, LOGOS_DIR).await?;
        Ok(resolve_logo(None, &listing, slug).map(|p| AssetRef::new(Page::Blog, p)))
    }

    /// Remove every resume extension stored for `slug`, then write the new file
    /// under its own extension.
    ///
    /// `ext` must already be an allowed document extension.
    pub async fn replace_resume(
        &self,
        page: Page,
        slug: &str,
        ext: &str,
        data: &[u8],
    ) -> Result<AssetRef, StorageError> {
        let filename = secure_filename(&format!("{slug}{ext}"));
        if extension_of(&filename).as_deref() != Some(ext) {
            return Err(StorageError::InvalidPath(format!(
                "resume name for slug '{slug}' is not usable"
            )));
        }

        for old_ext in RESUME_PRIORITY {
            let old_name = secure_filename(&format!("{slug}{old_ext}"));
            if old_name.is_empty() {
                continue;
            }
            let old_path = page.path(&format!("{RESUME_DIR}/{old_name}"));
            if self.store.delete(&old_path).await? {
                debug!(path = %old_path, "Removed previous resume");
            }
        }

        let asset = AssetRef::new(page, format!("{RESUME_DIR}/{filename}"));
        self.store.put(&asset.storage_path(), data).await?;
        info!(path = %asset.storage_path(), size = data.len(), "Stored resume");
        Ok(asset)
    }

    /// Write an uploaded logo as `blog/logos/<slug><ext>`.
    pub async fn store_logo(
        &self,
        slug: &str,
        ext: &str,
        data: &[u8],
    ) -> Result<AssetRef, StorageError> {
        let filename = secure_filename(&format!("{slug}{ext}"));
        if extension_of(&filename).as_deref() != Some(ext) {
            return Err(StorageError::InvalidPath(format!(
                "logo name for slug '{slug}' is not usable"
            )));
        }
        let asset = AssetRef::new(Page::Blog, format!("{LOGOS_DIR}/{filename}"));
        self.store.put(&asset.storage_path(), data).await?;
        info!(path = %asset.storage_path(), size = data.len(), "Stored logo");
        Ok(asset)
    }

    /// Write the profile resume as `about/resume/resume<ext>`.
    pub async fn save_profile_resume(&self, ext: &str, data: &[u8]) -> Result<AssetRef, StorageError> {
        let filename = secure_filename(&format!("{PROFILE_RESUME_STEM}{ext}"));
        let asset = AssetRef::new(Page::About, format!("{RESUME_DIR}/{filename}"));
        self.store.put(&asset.storage_path(), data).await?;
        info!(path = %asset.storage_path(), size = data.len(), "Stored profile resume");
        Ok(asset)
    }

    /// Gallery image names of a page, sorted.
    pub async fn list_images(&self, page: Page) -> Result<Vec<String>, StorageError> {
        let listing = self.snapshot(page, FIG_DIR).await?;
        Ok(images_in(&listing))
    }

    /// Lexicographically last document under `<page>/resume`.
    pub async fn latest_document(&self, page: Page) -> Result<Option<AssetRef>, StorageError> {
        let listing = self.snapshot(page, RESUME_DIR).await?;
        Ok(latest_document_in(&listing)
            .map(|name| AssetRef::new(page, format!("{RESUME_DIR}/{name}"))))
    }

    /// A fixed-name file directly under the page directory, if present.
    pub async fn page_file(&self, page: Page, name: &str) -> Result<Option<AssetRef>, StorageError> {
        if self.store.exists(&page.path(name)).await? {
            Ok(Some(AssetRef::new(page, name)))
        } else {
            Ok(None)
        }
    }

    /// Intro text of a page from the first existing [`PAGE_TEXT_FILES`] entry.
    pub async fn read_page_text(&self, page: Page) -> Result<Option<String>, StorageError> {
        for name in PAGE_TEXT_FILES {
            let path = page.path(name);
            if self.store.exists(&path).await? {
                let bytes = self.store.get(&path).await?;
                return Ok(Some(String::from_utf8_lossy(&bytes).into_owned()));
            }
        }
        Ok(None)
    }
}
