//! Session cookie and request extractors.
//!
//! The authenticated identity is carried per request in a signed HS256
//! cookie instead of any process-global state. `SessionUser` rejects when
//! the session is absent; `MaybeUser` never fails, so pages can render
//! both the signed-in and guest states.
use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::{web, Error, FromRequest, HttpRequest};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

use crate::config::Config;
use crate::error::{AppError, Result};

pub const SESSION_COOKIE: &str = "picx_session";

/// Session claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User-pool username
    pub sub: String,
    /// Provider access token, forwarded on authenticated API calls
    pub token: String,
    pub iat: usize,
    pub exp: usize,
}

/// The signed-in user extracted from the session cookie.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub username: String,
    pub access_token: String,
}

/// Optional variant of [`SessionUser`] for pages that render both states.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<SessionUser>);

/// Build the session cookie for a freshly signed-in user. `secure` must be
/// set in production so the provider token never travels over plain HTTP.
pub fn issue_session(
    username: &str,
    access_token: &str,
    secret: &str,
    ttl_secs: u64,
    secure: bool,
) -> Result<Cookie<'static>> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: username.to_string(),
        token: access_token.to_string(),
        iat: now,
        exp: now + ttl_secs as usize,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign session: {e}")))?;

    Ok(Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl_secs as i64))
        .finish())
}

/// Cookie that clears the session on sign-out. Attributes must match the
/// issued cookie or browsers keep the original.
pub fn clear_session(secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .finish()
}

fn decode_session(raw: &str, secret: &str) -> Result<SessionUser> {
    let data = decode::<Claims>(
        raw,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| AppError::Unauthorized(format!("Invalid or expired session: {e}")))?;

    Ok(SessionUser {
        username: data.claims.sub,
        access_token: data.claims.token,
    })
}

fn user_from_request(req: &HttpRequest) -> Option<SessionUser> {
    let config = req.app_data::<web::Data<Config>>()?;
    let cookie = req.cookie(SESSION_COOKIE)?;
    decode_session(cookie.value(), &config.auth.session_secret).ok()
}

impl FromRequest for SessionUser {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            user_from_request(req)
                .ok_or_else(|| AppError::Unauthorized("Sign in to continue".into()).into()),
        )
    }
}

impl FromRequest for MaybeUser {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(MaybeUser(user_from_request(req))))
    }
}
