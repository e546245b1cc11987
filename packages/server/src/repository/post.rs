//! Post Repository: post rows and their sidecar metadata.

use std::collections::HashMap;

use chrono::Utc;
use folio_common::assets::default_logo_in;
use folio_common::page::LOGOS_DIR;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::{debug, info};

use crate::entity::{post, post_meta};

/// Result of [`rename_slug`].
#[derive(Debug)]
pub enum RenameOutcome {
    Renamed(post::Model),
    /// Target slug already taken; nothing changed.
    Conflict,
    NotFound,
}

/// Title for a post write.
///
/// Explicit non-blank title, else the first line's text if it is a markdown
/// heading, else the existing title, else the slug. Never empty.
pub fn derive_title(explicit: Option<&str>, content: &str, existing: Option<&str>, slug: &str) -> String {
    if let Some(title) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    if let Some(heading) = heading_title(content) {
        return heading;
    }
    if let Some(title) = existing.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    slug.to_string()
}

/// Text of the first line when it starts with `#`.
fn heading_title(content: &str) -> Option<String> {
    let first = content.lines().next()?;
    if !first.starts_with('#') {
        return None;
    }
    let text = first.trim_start_matches('#').trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// All posts, newest first.
pub async fn list_all_ordered_by_recency<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<post::Model>, DbErr> {
    recency_query().all(db).await
}

/// The `limit` newest posts.
pub async fn list_recent<C: ConnectionTrait>(
    db: &C,
    limit: u64,
) -> Result<Vec<post::Model>, DbErr> {
    recency_query().limit(Some(limit)).all(db).await
}

/// Posts whose title or slug contains `query`, case-insensitively, newest first.
pub async fn search<C: ConnectionTrait>(db: &C, query: &str) -> Result<Vec<post::Model>, DbErr> {
    let term = escape_like(query.trim()).to_lowercase();
    let pattern = format!("%{term}%");

    recency_query()
        .filter(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col(post::Column::Title)))
                        .like(LikeExpr::new(pattern.clone()).escape('\\')),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col(post::Column::Slug)))
                        .like(LikeExpr::new(pattern).escape('\\')),
                ),
        )
        .all(db)
        .await
}

fn recency_query() -> Select<post::Entity> {
    post::Entity::find()
        .order_by_desc(post::Column::CreatedAt)
        .order_by_desc(post::Column::Id)
}

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

pub async fn find_by_slug<C: ConnectionTrait>(
    db: &C,
    slug: &str,
) -> Result<Option<post::Model>, DbErr> {
    post::Entity::find()
        .filter(post::Column::Slug.eq(slug))
        .one(db)
        .await
}

/// A post together with its sidecar row, if any.
pub async fn find_with_meta<C: ConnectionTrait>(
    db: &C,
    slug: &str,
) -> Result<Option<(post::Model, Option<post_meta::Model>)>, DbErr> {
    let Some(post) = find_by_slug(db, slug).await? else {
        return Ok(None);
    };
    let meta = find_meta(db, post.id).await?;
    Ok(Some((post, meta)))
}

pub async fn find_meta<C: ConnectionTrait>(
    db: &C,
    post_id: i32,
) -> Result<Option<post_meta::Model>, DbErr> {
    post_meta::Entity::find()
        .filter(post_meta::Column::PostId.eq(post_id))
        .one(db)
        .await
}

/// Sidecar rows for a batch of posts, keyed by post id.
pub async fn meta_by_post<C: ConnectionTrait>(
    db: &C,
    posts: &[post::Model],
) -> Result<HashMap<i32, post_meta::Model>, DbErr> {
    if posts.is_empty() {
        return Ok(HashMap::new());
    }
    let ids: Vec<i32> = posts.iter().map(|p| p.id).collect();
    let metas = post_meta::Entity::find()
        .filter(post_meta::Column::PostId.is_in(ids))
        .all(db)
        .await?;
    Ok(metas.into_iter().map(|m| (m.post_id, m)).collect())
}

/// Create the post at `slug`, or overwrite its title and content.
pub async fn create_or_replace<C: ConnectionTrait>(
    db: &C,
    slug: &str,
    title: Option<&str>,
    content: &str,
) -> Result<post::Model, DbErr> {
    let now = Utc::now();

    match find_by_slug(db, slug).await? {
        Some(existing) => {
            let title = derive_title(title, content, Some(&existing.title), slug);
            let mut active: post::ActiveModel = existing.into();
            active.title = Set(title);
            active.content = Set(content.to_string());
            active.updated_at = Set(now);
            let model = active.update(db).await?;
            debug!(slug = %model.slug, "Updated post");
            Ok(model)
        }
        None => {
            let new_post = post::ActiveModel {
                slug: Set(slug.to_string()),
                title: Set(derive_title(title, content, None, slug)),
                content: Set(content.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            let model = new_post.insert(db).await?;
            info!(slug = %model.slug, "Created post");
            Ok(model)
        }
    }
}

/// Move a post to a new slug unless the new slug is taken.
pub async fn rename_slug(
    db: &DatabaseConnection,
    old: &str,
    new: &str,
) -> Result<RenameOutcome, DbErr> {
    let txn = db.begin().await?;

    let Some(existing) = find_by_slug(&txn, old).await? else {
        return Ok(RenameOutcome::NotFound);
    };
    if old == new {
        return Ok(RenameOutcome::Renamed(existing));
    }
    if find_by_slug(&txn, new).await?.is_some() {
        debug!(old, new, "Slug rename skipped: target exists");
        return Ok(RenameOutcome::Conflict);
    }

    let mut active: post::ActiveModel = existing.into();
    active.slug = Set(new.to_string());
    active.updated_at = Set(Utc::now());
    let model = active.update(&txn).await?;

    txn.commit().await?;
    info!(old, new, "Renamed post");
    Ok(RenameOutcome::Renamed(model))
}

/// Delete a post and its sidecar row. Returns false if the slug was unknown.
pub async fn delete(db: &DatabaseConnection, slug: &str) -> Result<bool, DbErr> {
    let txn = db.begin().await?;

    let Some(existing) = find_by_slug(&txn, slug).await? else {
        return Ok(false);
    };

    post_meta::Entity::delete_many()
        .filter(post_meta::Column::PostId.eq(existing.id))
        .exec(&txn)
        .await?;
    post::Entity::delete_by_id(existing.id).exec(&txn).await?;

    txn.commit().await?;
    info!(slug, "Deleted post");
    Ok(true)
}

/// Record a logo override in the sidecar row, creating it if needed.
pub async fn set_logo<C: ConnectionTrait>(
    db: &C,
    post_id: i32,
    logo: &str,
) -> Result<post_meta::Model, DbErr> {
    match find_meta(db, post_id).await? {
        Some(meta) => {
            let mut active: post_meta::ActiveModel = meta.into();
            active.logo = Set(Some(logo.to_string()));
            active.update(db).await
        }
        None => {
            post_meta::ActiveModel {
                post_id: Set(post_id),
                logo: Set(Some(logo.to_string())),
                ..Default::default()
            }
            .insert(db)
            .await
        }
    }
}

/// Create the sidecar row pointing at `logos/<slug>.png` when the post has no
/// sidecar yet and that file is in `logo_listing`.
pub async fn attach_default_logo<C: ConnectionTrait>(
    db: &C,
    post: &post::Model,
    logo_listing: &[String],
) -> Result<Option<post_meta::Model>, DbErr> {
    if find_meta(db, post.id).await?.is_some() {
        return Ok(None);
    }
    let Some(name) = default_logo_in(logo_listing, &post.slug) else {
        return Ok(None);
    };
    let meta = set_logo(db, post.id, &format!("{LOGOS_DIR}/{name}")).await?;
    debug!(slug = %post.slug, "Recorded default logo");
    Ok(Some(meta))
}
