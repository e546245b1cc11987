use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use folio_common::Page;
use folio_common::filename::{file_stem, secure_filename};
use folio_common::page::{
    DOCUMENT_EXTENSIONS, IMAGE_EXTENSIONS, LOGOS_DIR, MARKDOWN_EXTENSIONS, has_allowed_extension,
};
use tracing::{debug, info, instrument};

use crate::error::AppError;
use crate::extractors::auth::{OwnerSession, Viewer};
use crate::guard::OwnerState;
use crate::models::blog::{
    BlogListView, EditorView, PostView, SearchQuery, SearchView, UploadFormView,
};
use crate::models::shared::{MultipartForm, PageView, UploadedFile};
use crate::repository::post::{self as posts, RenameOutcome, derive_title};
use crate::resolver;
use crate::state::AppState;
use crate::utils::response::{Disposition, asset_response};
use crate::utils::url;

const NAV: &str = "blog";
const LIST_PATH: &str = "/blog";
const UPLOAD_PATH: &str = "/blog/upload";

fn post_path(slug: &str) -> String {
    format!("/blog/{}", url::encode(slug))
}

fn edit_path(slug: &str) -> String {
    format!("/blog/edit/{}", url::encode(slug))
}

/// Extension and body of an optional file part, or an upload rejection.
fn accept_optional(
    file: Option<UploadedFile>,
    allowed: &[&str],
    back_to: &str,
) -> Result<Option<(String, Bytes)>, AppError> {
    let Some(file) = file else {
        return Ok(None);
    };
    match file.accepted_extension(allowed) {
        Some(ext) => Ok(Some((ext, file.data))),
        None => Err(AppError::InvalidUpload {
            back_to: back_to.to_string(),
        }),
    }
}

/// Slug for a post created from the editor.
///
/// A requested slug owned by another post falls back to the path slug. Never
/// resolves to an existing row.
async fn new_post_slug(
    state: &AppState,
    path_slug: &str,
    desired: String,
    back_to: &str,
) -> Result<String, AppError> {
    if posts::find_by_slug(&state.db, &desired).await?.is_none() {
        return Ok(desired);
    }
    debug!(desired = %desired, "Requested slug taken; keeping the path slug");

    let own = secure_filename(path_slug);
    if own.is_empty() || posts::find_by_slug(&state.db, &own).await?.is_some() {
        return Err(AppError::InvalidUpload {
            back_to: back_to.to_string(),
        });
    }
    Ok(own)
}

#[instrument(skip(state, viewer))]
pub async fn list(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> Result<Json<PageView<BlogListView>>, AppError> {
    let items = posts::list_all_ordered_by_recency(&state.db).await?;
    let posts = resolver::summarize(&state.db, &state.assets, items).await?;
    Ok(Json(PageView::new(NAV, viewer, BlogListView { posts })))
}

/// Title/slug search. An empty query goes back to the full list.
#[instrument(skip(state, viewer, query), fields(q = %query.q))]
pub async fn search(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Ok(Redirect::to(LIST_PATH).into_response());
    }

    let items = posts::search(&state.db, q).await?;
    let posts = resolver::summarize(&state.db, &state.assets, items).await?;
    let view = SearchView {
        query: q.to_string(),
        posts,
    };
    Ok(Json(PageView::new(NAV, viewer, view)).into_response())
}

#[instrument(skip(state, viewer))]
pub async fn show(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(slug): Path<String>,
) -> Result<Json<PageView<PostView>>, AppError> {
    let view = resolver::post_view(&state.db, &state.assets, &slug).await?;
    Ok(Json(PageView::new(NAV, viewer, view)))
}

#[instrument(skip(state, _owner))]
pub async fn edit_form(
    State(state): State<AppState>,
    _owner: OwnerSession,
    Path(slug): Path<String>,
) -> Result<Json<PageView<EditorView>>, AppError> {
    let view = resolver::editor_view(&state.db, &state.assets, &slug).await?;
    Ok(Json(PageView::new(NAV, OwnerState::Owner, view)))
}

/// Save a post from the editor.
///
/// Form fields: `slug` (optional rename target), `title`, `content`, and the
/// optional files `resume` and `logo`. A rename onto an existing slug is
/// skipped and the post keeps its slug; a new post asking for a taken slug is
/// created under the path slug instead.
#[instrument(skip(state, _owner, multipart))]
pub async fn edit(
    State(state): State<AppState>,
    _owner: OwnerSession,
    Path(slug): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let mut form = MultipartForm::collect(multipart).await?;
    let back_to = edit_path(&slug);

    let requested = form
        .text("slug")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(&slug);
    let desired = secure_filename(requested);
    if desired.is_empty() {
        return Err(AppError::InvalidUpload { back_to });
    }

    // Reject bad files before anything is written.
    let resume = accept_optional(form.take_file("resume"), DOCUMENT_EXTENSIONS, &back_to)?;
    let logo = accept_optional(form.take_file("logo"), IMAGE_EXTENSIONS, &back_to)?;

    let title = form.text("title").map(str::to_string);
    let content = form.text_or_empty("content");

    let target = match posts::rename_slug(&state.db, &slug, &desired).await? {
        RenameOutcome::Renamed(post) => post.slug,
        RenameOutcome::Conflict => slug.clone(),
        RenameOutcome::NotFound => new_post_slug(&state, &slug, desired, &back_to).await?,
    };
    let post = posts::create_or_replace(&state.db, &target, title.as_deref(), &content).await?;

    if let Some((ext, data)) = resume {
        state
            .assets
            .replace_resume(Page::Blog, &post.slug, &ext, &data)
            .await?;
    }

    match logo {
        Some((ext, data)) => {
            let asset = state.assets.store_logo(&post.slug, &ext, &data).await?;
            posts::set_logo(&state.db, post.id, &asset.path).await?;
        }
        None => {
            let listing = state.assets.snapshot(Page::Blog, LOGOS_DIR).await?;
            posts::attach_default_logo(&state.db, &post, &listing).await?;
        }
    }

    Ok(Redirect::to(&post_path(&post.slug)).into_response())
}

#[instrument(skip(_owner))]
pub async fn upload_form(_owner: OwnerSession) -> Json<PageView<UploadFormView>> {
    Json(PageView::new(
        NAV,
        OwnerState::Owner,
        UploadFormView {
            accepted_extensions: MARKDOWN_EXTENSIONS,
        },
    ))
}

/// Import a markdown file as a post.
///
/// The slug is the sanitized `name` field when given, else the file stem.
/// The title comes from a leading `#` heading, else the slug.
#[instrument(skip(state, _owner, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    _owner: OwnerSession,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let mut form = MultipartForm::collect(multipart).await?;
    let invalid = || AppError::InvalidUpload {
        back_to: UPLOAD_PATH.into(),
    };

    let file = form.take_file("file").ok_or_else(invalid)?;
    file.accepted_extension(MARKDOWN_EXTENSIONS)
        .ok_or_else(invalid)?;
    let filename = file.secure_name().ok_or_else(invalid)?;

    let slug = match form.text("name").map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => {
            let name = secure_filename(name);
            if has_allowed_extension(&name, MARKDOWN_EXTENSIONS) {
                file_stem(&name).to_string()
            } else {
                name
            }
        }
        None => file_stem(&filename).to_string(),
    };
    if slug.is_empty() {
        return Err(invalid());
    }

    let content = String::from_utf8_lossy(&file.data).into_owned();
    let title = derive_title(None, &content, None, &slug);
    let post = posts::create_or_replace(&state.db, &slug, Some(&title), &content).await?;

    let listing = state.assets.snapshot(Page::Blog, LOGOS_DIR).await?;
    posts::attach_default_logo(&state.db, &post, &listing).await?;

    info!(slug = %post.slug, size = file.data.len(), "Imported markdown post");
    Ok(Redirect::to(&post_path(&post.slug)).into_response())
}

/// Delete a post and its metadata. Unknown slugs also land on the list.
#[instrument(skip(state, _owner))]
pub async fn delete(
    State(state): State<AppState>,
    _owner: OwnerSession,
    Path(slug): Path<String>,
) -> Result<Redirect, AppError> {
    posts::delete(&state.db, &slug).await?;
    Ok(Redirect::to(LIST_PATH))
}

/// A post's resume as a download.
#[instrument(skip(state))]
pub async fn download_resume(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let resume = state
        .assets
        .find_resume(Page::Blog, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".into()))?;
    asset_response(state.assets.store(), &resume, Disposition::Attachment).await
}
