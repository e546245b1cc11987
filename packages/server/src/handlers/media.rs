use axum::extract::{Path, State};
use axum::response::Response;
use folio_common::filename::validate_flat_filename;
use folio_common::page::FIG_DIR;
use folio_common::{AssetRef, Page};
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::response::{Disposition, asset_response};

fn page_or_404(segment: &str) -> Result<Page, AppError> {
    Page::from_segment(segment).ok_or_else(|| AppError::NotFound("Page not found".into()))
}

/// Any file under a page directory, e.g. `/assets/blog/logos/intro.png`.
#[instrument(skip(state))]
pub async fn serve_asset(
    State(state): State<AppState>,
    Path((page, path)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let page = page_or_404(&page)?;
    let asset = AssetRef::new(page, path);
    asset_response(state.assets.store(), &asset, Disposition::Inline).await
}

/// A gallery image from a page's `fig` directory.
#[instrument(skip(state))]
pub async fn serve_media(
    State(state): State<AppState>,
    Path((page, filename)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let page = page_or_404(&page)?;
    let filename = validate_flat_filename(&filename).map_err(|e| {
        debug!(reason = e.message(), "Rejected media filename");
        AppError::NotFound("Asset not found".into())
    })?;
    let asset = AssetRef::new(page, format!("{FIG_DIR}/{filename}"));
    asset_response(state.assets.store(), &asset, Disposition::Inline).await
}
