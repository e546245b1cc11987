//! Content Resolver: merges repository rows with filesystem fallbacks into
//! view models.

use folio_common::assets::{HOME_BACKGROUND, HOME_LOGO, resolve_logo};
use folio_common::page::LOGOS_DIR;
use folio_common::{AssetRef, Assets, Page};
use sea_orm::DatabaseConnection;

use crate::config::SiteConfig;
use crate::entity::post;
use crate::error::AppError;
use crate::models::blog::{EditorView, PostSummary, PostView};
use crate::models::home::HomeView;
use crate::models::profile::{ProfileEditView, ProfileView};
use crate::repository::post as posts;
use crate::repository::profile as profiles;

/// Number of posts shown on the home page.
pub const HOME_RECENT_POSTS: u64 = 5;

pub const PROFILE_RESUME_DOWNLOAD: &str = "/about/resume/download";

pub fn post_resume_download(slug: &str) -> String {
    format!("/blog/resume/{slug}/download")
}

/// Gallery URL of a `fig` image.
pub fn media_url(page: Page, name: &str) -> String {
    format!("/media/{page}/{name}")
}

/// Summaries with logos resolved against a single listing of `blog/logos`.
pub async fn summarize(
    db: &DatabaseConnection,
    assets: &Assets,
    items: Vec<post::Model>,
) -> Result<Vec<PostSummary>, AppError> {
    let metas = posts::meta_by_post(db, &items).await?;
    let logos = assets.snapshot(Page::Blog, LOGOS_DIR).await?;

    Ok(items
        .into_iter()
        .map(|p| {
            let meta_logo = metas.get(&p.id).and_then(|m| m.logo.as_deref());
            let logo = resolve_logo(meta_logo, &logos, &p.slug)
                .map(|path| AssetRef::new(Page::Blog, path).url());
            PostSummary {
                slug: p.slug,
                title: p.title,
                logo,
            }
        })
        .collect())
}

pub async fn post_view(
    db: &DatabaseConnection,
    assets: &Assets,
    slug: &str,
) -> Result<PostView, AppError> {
    let (post, meta) = posts::find_with_meta(db, slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))?;

    let logo = assets
        .find_logo(meta.as_ref().and_then(|m| m.logo.as_deref()), &post.slug)
        .await?;
    let resume = assets.find_resume(Page::Blog, &post.slug).await?;

    let title = if post.title.trim().is_empty() {
        post.slug.clone()
    } else {
        post.title
    };

    Ok(PostView {
        resume_ext: resume.as_ref().and_then(AssetRef::extension),
        resume_download: resume.as_ref().map(|_| post_resume_download(&post.slug)),
        resume: resume.map(|r| r.url()),
        logo: logo.map(|l| l.url()),
        title,
        content: post.content,
        slug: post.slug,
    })
}

pub async fn home_view(db: &DatabaseConnection, assets: &Assets) -> Result<HomeView, AppError> {
    let recent = posts::list_recent(db, HOME_RECENT_POSTS).await?;
    let latest_posts = summarize(db, assets, recent).await?;

    let logo = assets.page_file(Page::Home, HOME_LOGO).await?;
    let background = assets.page_file(Page::Home, HOME_BACKGROUND).await?;
    let intro = assets.read_page_text(Page::Home).await?;
    let images = assets
        .list_images(Page::Home)
        .await?
        .iter()
        .map(|name| media_url(Page::Home, name))
        .collect();

    Ok(HomeView {
        logo: logo.map(|a| a.url()),
        background: background.map(|a| a.url()),
        intro,
        images,
        latest_posts,
    })
}

pub async fn profile_view(
    db: &DatabaseConnection,
    assets: &Assets,
    site: &SiteConfig,
) -> Result<ProfileView, AppError> {
    let profile = profiles::fields(db).await?;
    let resume = assets.latest_document(Page::About).await?;
    let intro = assets.read_page_text(Page::About).await?;
    let images = assets
        .list_images(Page::About)
        .await?
        .iter()
        .map(|name| media_url(Page::About, name))
        .collect();

    Ok(ProfileView {
        name: profile.name.unwrap_or_else(|| site.owner_name.clone()),
        direction: profile.direction,
        message: profile.message,
        experience: profile.experience,
        awards: profile.awards,
        resume_download: resume.as_ref().map(|_| PROFILE_RESUME_DOWNLOAD.to_string()),
        resume: resume.map(|r| r.url()),
        intro,
        images,
    })
}

pub async fn editor_view(
    db: &DatabaseConnection,
    assets: &Assets,
    slug: &str,
) -> Result<EditorView, AppError> {
    let found = posts::find_with_meta(db, slug).await?;
    let meta_logo = found
        .as_ref()
        .and_then(|(_, meta)| meta.as_ref())
        .and_then(|m| m.logo.clone());

    let logo = assets.find_logo(meta_logo.as_deref(), slug).await?;
    let resume = assets.find_resume(Page::Blog, slug).await?;

    let (exists, title, content) = match found {
        Some((post, _)) => (true, post.title, post.content),
        None => (false, String::new(), String::new()),
    };

    Ok(EditorView {
        slug: slug.to_string(),
        exists,
        title,
        content,
        logo: logo.map(|l| l.url()),
        resume: resume.map(|r| r.url()),
    })
}

pub async fn profile_edit_view(
    db: &DatabaseConnection,
    assets: &Assets,
) -> Result<ProfileEditView, AppError> {
    let profile = profiles::fields(db).await?;
    let resume = assets.latest_document(Page::About).await?;

    Ok(ProfileEditView {
        name: profile.name.unwrap_or_default(),
        direction: profile.direction.unwrap_or_default(),
        message: profile.message.unwrap_or_default(),
        experience: profile.experience.unwrap_or_default(),
        awards: profile.awards.unwrap_or_default(),
        resume: resume.map(|r| r.url()),
    })
}
