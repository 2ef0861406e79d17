use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by every bearer token: the account id plus the
/// issued-at and expiry timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i32, expiry_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            id: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry_secs)).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Sign claims into a bearer token.
pub fn issue_token(secret: &str, claims: &Claims) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verify a bearer token's signature and expiry, returning its claims.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
