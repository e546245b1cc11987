use serde::Serialize;

use super::blog::PostSummary;

#[derive(Serialize, Debug)]
pub struct HomeView {
    pub logo: Option<String>,
    pub background: Option<String>,
    /// Text of `home/index.md` or `home/index.txt`.
    pub intro: Option<String>,
    pub images: Vec<String>,
    /// Newest posts first.
    pub latest_posts: Vec<PostSummary>,
}
