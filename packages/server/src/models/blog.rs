use serde::{Deserialize, Serialize};

/// One entry of a post listing.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub logo: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct PostView {
    pub slug: String,
    pub title: String,
    /// Raw markdown.
    pub content: String,
    pub logo: Option<String>,
    pub resume: Option<String>,
    /// Lowercase extension of `resume`, e.g. `.pdf`.
    pub resume_ext: Option<String>,
    pub resume_download: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct BlogListView {
    pub posts: Vec<PostSummary>,
}

#[derive(Deserialize, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize, Debug)]
pub struct SearchView {
    pub query: String,
    pub posts: Vec<PostSummary>,
}

/// Current state of a post for the editor. Empty for a slug with no post.
#[derive(Serialize, Debug)]
pub struct EditorView {
    pub slug: String,
    pub exists: bool,
    pub title: String,
    pub content: String,
    pub logo: Option<String>,
    pub resume: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct UploadFormView {
    pub accepted_extensions: &'static [&'static str],
}
