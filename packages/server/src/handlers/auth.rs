use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use tracing::{info, instrument, warn};

use crate::error::AppError;
use crate::extractors::form::AppForm;
use crate::guard::{self, DEFAULT_LANDING, LoginOutcome};
use crate::models::auth::{LoginForm, LoginView, NextQuery};
use crate::state::AppState;
use crate::utils::jwt::{self, SESSION_COOKIE};

/// Login form state; `next` is echoed back for the form action.
#[instrument(skip(query))]
pub async fn login_form(Query(query): Query<NextQuery>) -> Json<LoginView> {
    Json(LoginView {
        error: None,
        next: query.next,
    })
}

/// Check the owner secret. Success sets the session cookie and follows `next`.
#[instrument(skip(state, jar, query, form))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<NextQuery>,
    AppForm(form): AppForm<LoginForm>,
) -> Result<Response, AppError> {
    match guard::attempt_login(&state.owner_secret, &form.password, query.next.as_deref()) {
        LoginOutcome::Granted { redirect_to } => {
            let token = jwt::sign(
                &state.config.auth.session_secret,
                state.config.auth.session_ttl_hours,
            )
            .map_err(|e| AppError::Internal(format!("Session sign error: {e}")))?;

            let cookie = Cookie::build((SESSION_COOKIE, token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax);

            info!(redirect_to = %redirect_to, "Owner logged in");
            Ok((jar.add(cookie), Redirect::to(&redirect_to)).into_response())
        }
        LoginOutcome::Denied { error } => {
            warn!("Rejected owner login attempt");
            let view = LoginView {
                error: Some(error.to_string()),
                next: query.next,
            };
            Ok((StatusCode::UNAUTHORIZED, Json(view)).into_response())
        }
    }
}

/// Drop the session cookie, whatever state it was in.
#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to(DEFAULT_LANDING))
}
