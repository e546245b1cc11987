use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use crate::config::SiteConfig;
use crate::handlers;
use crate::state::AppState;

pub fn site_routes(site: &SiteConfig) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home::index))
        .merge(auth_routes())
        .nest("/about", about_routes(site))
        .nest("/blog", blog_routes(site))
        .merge(asset_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(handlers::auth::login_form).post(handlers::auth::login),
        )
        .route("/logout", get(handlers::auth::logout))
}

fn about_routes(site: &SiteConfig) -> Router<AppState> {
    let uploads = Router::new()
        .route(
            "/edit",
            get(handlers::about::edit_form).post(handlers::about::edit),
        )
        .layer(upload_body_limit(site));

    Router::new()
        .route("/", get(handlers::about::show))
        .route("/resume/download", get(handlers::about::download_resume))
        .merge(uploads)
}

fn blog_routes(site: &SiteConfig) -> Router<AppState> {
    let uploads = Router::new()
        .route(
            "/edit/{slug}",
            get(handlers::blog::edit_form).post(handlers::blog::edit),
        )
        .route(
            "/upload",
            get(handlers::blog::upload_form).post(handlers::blog::upload),
        )
        .layer(upload_body_limit(site));

    Router::new()
        .route("/", get(handlers::blog::list))
        .route("/search", get(handlers::blog::search))
        .route("/delete/{slug}", post(handlers::blog::delete))
        .route(
            "/resume/{slug}/download",
            get(handlers::blog::download_resume),
        )
        .route("/{slug}", get(handlers::blog::show))
        .merge(uploads)
}

fn asset_routes() -> Router<AppState> {
    Router::new()
        .route("/assets/{page}/{*path}", get(handlers::media::serve_asset))
        .route("/media/{page}/{filename}", get(handlers::media::serve_media))
}

/// Body limit layer for multipart form routes.
fn upload_body_limit(site: &SiteConfig) -> DefaultBodyLimit {
    DefaultBodyLimit::max(site.max_upload_size)
}
