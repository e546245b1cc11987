use serde::{Deserialize, Serialize};

/// Login form body.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

/// `?next=` carried through the login flow.
#[derive(Deserialize, Default)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Serialize)]
pub struct LoginView {
    /// Set after a failed attempt.
    pub error: Option<String>,
    pub next: Option<String>,
}
