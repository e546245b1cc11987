//! Access Guard: a two-state (anonymous / owner) session flag gated by one
//! shared secret.

use serde::Serialize;

use crate::utils::{hash, jwt, url};

/// Error string shown on a failed login.
pub const LOGIN_ERROR: &str = "Incorrect password";

/// Where a successful login lands when no `next` was preserved.
pub const DEFAULT_LANDING: &str = "/";

pub const LOGIN_PATH: &str = "/login";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerState {
    Anonymous,
    Owner,
}

impl OwnerState {
    /// State carried by an optional session token.
    pub fn from_token(token: Option<&str>, session_secret: &str) -> Self {
        match token {
            Some(token) if jwt::verify(token, session_secret).is_ok() => OwnerState::Owner,
            _ => OwnerState::Anonymous,
        }
    }

    pub fn is_owner(self) -> bool {
        self == OwnerState::Owner
    }
}

/// The configured owner secret, held only as an argon2 hash.
pub struct OwnerSecret {
    hash: String,
}

impl OwnerSecret {
    pub fn from_plain(secret: &str) -> Result<Self, argon2::password_hash::Error> {
        Ok(Self {
            hash: hash::hash_password(secret)?,
        })
    }

    /// Wrap an existing PHC hash string.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Whether `submitted` equals the configured secret.
    pub fn matches(&self, submitted: &str) -> bool {
        match hash::verify_password(submitted, &self.hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!("Owner secret verification failed: {}", e);
                false
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Transition to owner; send the client to `redirect_to`.
    Granted { redirect_to: String },
    /// Stay anonymous; show `error`.
    Denied { error: &'static str },
}

/// Compare a submitted secret and decide the transition.
pub fn attempt_login(secret: &OwnerSecret, submitted: &str, next: Option<&str>) -> LoginOutcome {
    if secret.matches(submitted) {
        LoginOutcome::Granted {
            redirect_to: safe_next(next),
        }
    } else {
        LoginOutcome::Denied { error: LOGIN_ERROR }
    }
}

/// Post-login destination. Only same-site absolute paths are honoured.
pub fn safe_next(next: Option<&str>) -> String {
    match next.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(|c| c.is_ascii_control()) =>
        {
            path.to_string()
        }
        _ => DEFAULT_LANDING.to_string(),
    }
}

/// Login URL preserving the originally requested path.
pub fn login_redirect(next: &str) -> String {
    format!("{LOGIN_PATH}?next={}", url::encode(next))
}
