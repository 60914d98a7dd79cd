use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use color_eyre::eyre::{eyre, Context, ContextCompat, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::{ApiError, UserId};

use super::constants::{JWT_COOKIE_NAME, JWT_SECRET};

// This value determines how long the session token is valid for
pub const TOKEN_TTL_SECONDS: i64 = 600; // 10 minutes

// Create cookie with a new session token for the given user. Sessions are
// normally minted by the identity service with the shared secret; this is
// used by tests and local tooling.
#[tracing::instrument(name = "Generating session cookie", skip_all)]
pub fn generate_session_cookie(user_id: &UserId) -> Result<Cookie<'static>> {
    let token = generate_session_token(user_id)?;
    Ok(create_session_cookie(token))
}

// Create cookie and set the value to the passed-in token string
fn create_session_cookie(token: Secret<String>) -> Cookie<'static> {
    Cookie::build((JWT_COOKIE_NAME, token.expose_secret().to_owned()))
        .path("/") // apply cookie to all URLs on the server
        .http_only(true) // prevent JavaScript from accessing the cookie
        .same_site(SameSite::Lax)
        .build()
}

#[tracing::instrument(name = "Generating session token", skip_all)]
fn generate_session_token(user_id: &UserId) -> Result<Secret<String>> {
    let delta = chrono::Duration::try_seconds(TOKEN_TTL_SECONDS)
        .wrap_err("Failed to create 10 minute time delta")?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(eyre!("failed to add to current time"))?
        .timestamp();

    let exp: usize = exp.try_into().wrap_err(format!(
        "failed to cast exp time to usize. exp time: {}",
        exp
    ))?;

    let claims = Claims {
        sub: user_id.as_ref().to_string(),
        exp,
    };

    create_token(&claims)
}

// Check if the session token is valid by decoding it using the shared secret
#[tracing::instrument(name = "Validating session token", skip_all)]
pub fn validate_token(token: &Secret<String>) -> Result<Claims> {
    decode::<Claims>(
        token.expose_secret(),
        &DecodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .wrap_err("failed to decode token")
}

fn create_token(claims: &Claims) -> Result<Secret<String>> {
    let token_string = encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
    )
    .wrap_err("failed to create token")?;

    Ok(Secret::new(token_string))
}

/// Resolves the acting user from the session cookie. This is the only
/// place identity enters the system; handlers receive an explicit
/// [`UserId`] from here and carry no ambient session state.
pub fn get_session_user(jar: &CookieJar) -> Result<UserId, ApiError> {
    let cookie = jar.get(JWT_COOKIE_NAME).ok_or(ApiError::MissingToken)?;
    let token = Secret::new(cookie.value().to_owned());
    let claims = validate_token(&token).map_err(|_| ApiError::InvalidToken)?;
    UserId::parse(&claims.sub).map_err(|_| ApiError::InvalidToken)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}
