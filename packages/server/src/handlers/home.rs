use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::auth::Viewer;
use crate::models::home::HomeView;
use crate::models::shared::PageView;
use crate::resolver;
use crate::state::AppState;

/// Home page: newest posts, fixed images and intro text.
#[instrument(skip(state, viewer))]
pub async fn index(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> Result<Json<PageView<HomeView>>, AppError> {
    let view = resolver::home_view(&state.db, &state.assets).await?;
    Ok(Json(PageView::new("home", viewer, view)))
}
