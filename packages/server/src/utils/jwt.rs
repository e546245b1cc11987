use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "folio_session";

/// Subject recorded in owner session tokens.
const OWNER_SUBJECT: &str = "owner";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("session lifetime out of range: {0} hours")]
    Lifetime(i64),

    #[error("session token does not grant owner access")]
    NotOwner,
}

/// JWT Claims structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub owner: bool,
    pub exp: usize, // Expiration timestamp
}

/// Sign an owner session token valid for `ttl_hours`.
pub fn sign(secret: &str, ttl_hours: i64) -> Result<String, SessionError> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(ttl_hours))
        .ok_or(SessionError::Lifetime(ttl_hours))?
        .timestamp();

    let claims = Claims {
        sub: OWNER_SUBJECT.to_owned(),
        owner: true,
        exp: usize::try_from(expiration).map_err(|_| SessionError::Lifetime(ttl_hours))?,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify and decode a session token. Only owner tokens are accepted.
pub fn verify(token: &str, secret: &str) -> Result<Claims, SessionError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    if !token_data.claims.owner || token_data.claims.sub != OWNER_SUBJECT {
        return Err(SessionError::NotOwner);
    }
    Ok(token_data.claims)
}
