use std::convert::Infallible;

use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::guard::OwnerState;
use crate::state::AppState;
use crate::utils::jwt::SESSION_COOKIE;

/// Session state of the current request, anonymous or owner.
///
/// Never rejects; use it on public pages that render differently for the owner.
pub struct Viewer(pub OwnerState);

/// Proof that the request carries a valid owner session.
///
/// Add this as a handler parameter to gate the handler. Anonymous requests are
/// redirected to the login page with the requested path preserved.
pub struct OwnerSession;

fn session_state(parts: &Parts, state: &AppState) -> OwnerState {
    let jar = CookieJar::from_headers(&parts.headers);
    OwnerState::from_token(
        jar.get(SESSION_COOKIE).map(|c| c.value()),
        &state.config.auth.session_secret,
    )
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Viewer(session_state(parts, state)))
    }
}

impl FromRequestParts<AppState> for OwnerSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if session_state(parts, state).is_owner() {
            return Ok(OwnerSession);
        }
        // Nested routers strip their prefix from `parts.uri`.
        let next = match parts.extensions.get::<OriginalUri>() {
            Some(OriginalUri(uri)) => uri.path().to_string(),
            None => parts.uri.path().to_string(),
        };
        Err(AppError::LoginRequired { next })
    }
}
