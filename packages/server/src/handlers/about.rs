use axum::Json;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Redirect, Response};
use folio_common::Page;
use folio_common::page::DOCUMENT_EXTENSIONS;
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::auth::{OwnerSession, Viewer};
use crate::guard::OwnerState;
use crate::models::profile::{ProfileEditView, ProfileView};
use crate::models::shared::{MultipartForm, PageView};
use crate::repository::profile::{self as profiles, ProfileFields};
use crate::resolver;
use crate::state::AppState;
use crate::utils::response::{Disposition, asset_response};

const ABOUT_PATH: &str = "/about";
const EDIT_PATH: &str = "/about/edit";

#[instrument(skip(state, viewer))]
pub async fn show(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> Result<Json<PageView<ProfileView>>, AppError> {
    let view = resolver::profile_view(&state.db, &state.assets, &state.config.site).await?;
    Ok(Json(PageView::new("about", viewer, view)))
}

#[instrument(skip(state, _owner))]
pub async fn edit_form(
    State(state): State<AppState>,
    _owner: OwnerSession,
) -> Result<Json<PageView<ProfileEditView>>, AppError> {
    let view = resolver::profile_edit_view(&state.db, &state.assets).await?;
    Ok(Json(PageView::new("about", OwnerState::Owner, view)))
}

/// Save the profile and an optional resume, then show the profile.
#[instrument(skip(state, _owner, multipart))]
pub async fn edit(
    State(state): State<AppState>,
    _owner: OwnerSession,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let mut form = MultipartForm::collect(multipart).await?;

    // Validate the upload before touching the profile row.
    let resume = match form.take_file("resume") {
        Some(file) => {
            let ext = file
                .accepted_extension(DOCUMENT_EXTENSIONS)
                .ok_or_else(|| AppError::InvalidUpload {
                    back_to: EDIT_PATH.into(),
                })?;
            Some((ext, file.data))
        }
        None => None,
    };

    profiles::upsert(
        &state.db,
        ProfileFields {
            name: form.text("name").map(|s| s.trim().to_string()),
            direction: form.text("direction").map(|s| s.trim().to_string()),
            message: form.text("message").map(|s| s.trim().to_string()),
            experience: form.text("experience").map(|s| s.trim().to_string()),
            awards: form.text("awards").map(|s| s.trim().to_string()),
        },
    )
    .await?;

    if let Some((ext, data)) = resume {
        state.assets.save_profile_resume(&ext, &data).await?;
    }

    Ok(Redirect::to(ABOUT_PATH).into_response())
}

/// The profile resume as a download.
#[instrument(skip(state))]
pub async fn download_resume(State(state): State<AppState>) -> Result<Response, AppError> {
    let resume = state
        .assets
        .latest_document(Page::About)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".into()))?;
    asset_response(state.assets.store(), &resume, Disposition::Attachment).await
}
