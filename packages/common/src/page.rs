use std::fmt;

use serde::{Deserialize, Serialize};

use crate::filename::extension_of;

pub const MARKDOWN_EXTENSIONS: &[&str] = &[".md"];
pub const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp"];
pub const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx"];

/// Image gallery directory present under every page.
pub const FIG_DIR: &str = "fig";
pub const POSTS_DIR: &str = "posts";
pub const LOGOS_DIR: &str = "logos";
pub const RESUME_DIR: &str = "resume";

/// A top-level page of the site. Each page owns a directory tree under the
/// pages root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    About,
    Blog,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::About, Page::Blog];

    pub fn as_str(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Blog => "blog",
        }
    }

    /// Parse a page from a URL segment.
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == segment)
    }

    /// Subdirectories that must exist for this page.
    pub fn subdirs(self) -> &'static [&'static str] {
        match self {
            Page::Home => &[FIG_DIR],
            Page::About => &[FIG_DIR, RESUME_DIR],
            Page::Blog => &[FIG_DIR, POSTS_DIR, LOGOS_DIR, RESUME_DIR],
        }
    }

    /// Virtual path of a subdirectory, e.g. `blog/resume`.
    pub fn dir(self, sub: &str) -> String {
        format!("{}/{}", self.as_str(), sub)
    }

    /// Virtual path of a file relative to this page, e.g. `blog/logos/x.png`.
    pub fn path(self, relative: &str) -> String {
        format!("{}/{}", self.as_str(), relative)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if the filename's lowercase extension is in `allowed`.
pub fn has_allowed_extension(filename: &str, allowed: &[&str]) -> bool {
    extension_of(filename).is_some_and(|ext| allowed.contains(&ext.as_str()))
}

/// A resolved, not persisted, reference to a file under a page directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRef {
    pub page: Page,
    /// Path relative to the page directory (`resume/intro.pdf`).
    pub path: String,
}

impl AssetRef {
    pub fn new(page: Page, path: impl Into<String>) -> Self {
        Self {
            page,
            path: path.into(),
        }
    }

    /// Public URL served by the asset route.
    pub fn url(&self) -> String {
        format!("/assets/{}/{}", self.page, self.path)
    }

    /// Virtual storage path (`blog/resume/intro.pdf`).
    pub fn storage_path(&self) -> String {
        self.page.path(&self.path)
    }

    /// Lowercase extension including the dot.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.path)
    }

    /// Final path component.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}
