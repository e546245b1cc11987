use folio_common::filename::{file_stem, secure_filename};
use folio_common::page::{LOGOS_DIR, MARKDOWN_EXTENSIONS, POSTS_DIR, has_allowed_extension};
use folio_common::{Assets, Page};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::error::AppError;
use crate::repository::post as posts;

/// Import `blog/posts/*.md` files that predate the post table.
///
/// Best effort: a file that cannot be read or stored is logged and skipped.
/// Slugs already present in the table are left alone. Returns the number of
/// posts created.
pub async fn import_legacy_posts(db: &DatabaseConnection, assets: &Assets) -> usize {
    let listing = match assets.snapshot(Page::Blog, POSTS_DIR).await {
        Ok(listing) => listing,
        Err(e) => {
            warn!("Skipping legacy post import: {e}");
            return 0;
        }
    };
    let logos = assets
        .snapshot(Page::Blog, LOGOS_DIR)
        .await
        .unwrap_or_else(|e| {
            warn!("Could not list blog logos: {e}");
            Vec::new()
        });

    let mut imported = 0;
    for name in listing
        .iter()
        .filter(|n| has_allowed_extension(n, MARKDOWN_EXTENSIONS))
    {
        match import_one(db, assets, name, &logos).await {
            Ok(true) => imported += 1,
            Ok(false) => {}
            Err(e) => warn!(file = %name, "Legacy post import failed: {e:?}"),
        }
    }

    if imported > 0 {
        info!(imported, "Imported legacy posts");
    }
    imported
}

async fn import_one(
    db: &DatabaseConnection,
    assets: &Assets,
    name: &str,
    logos: &[String],
) -> Result<bool, AppError> {
    let slug = secure_filename(file_stem(name));
    if slug.is_empty() || posts::find_by_slug(db, &slug).await?.is_some() {
        return Ok(false);
    }

    let bytes = assets
        .store()
        .get(&Page::Blog.path(&format!("{POSTS_DIR}/{name}")))
        .await?;
    let content = String::from_utf8_lossy(&bytes).into_owned();
    let title = posts::derive_title(None, &content, None, &slug);

    let post = posts::create_or_replace(db, &slug, Some(&title), &content).await?;
    posts::attach_default_logo(db, &post, logos).await?;
    Ok(true)
}
