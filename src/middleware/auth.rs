// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access token guard.
//!
//! The OAuth handshake happens elsewhere; by the time a request reaches this
//! crate the Moves access token is either in the session cookie, in an
//! `Authorization: Bearer` header, or missing.

use crate::error::{AppError, Result};
use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use std::fmt;
use std::future::Future;

/// Name of the cookie holding the Moves access token.
pub const TOKEN_COOKIE: &str = "moves_token";

/// An opaque Moves access token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self(access_token.into())
    }

    pub fn access_token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Check that a caller has an access token.
pub fn require_credential(access_token: Option<&str>) -> Result<Credential> {
    match access_token.map(str::trim) {
        Some(token) if !token.is_empty() => Ok(Credential::new(token)),
        _ => Err(AppError::Unauthorized),
    }
}

/// Run `f` with the caller's credential, or fail with `Unauthorized`
/// without calling it.
///
/// ```ignore
/// let profile = with_credential(session_token, |cred| async move {
///     service.get_profile(cred.access_token()).await
/// })
/// .await?;
/// ```
pub async fn with_credential<T, F, Fut>(access_token: Option<&str>, f: F) -> Result<T>
where
    F: FnOnce(Credential) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let credential = require_credential(access_token)?;
    f(credential).await
}

/// Extract the token from the session cookie, falling back to the
/// Authorization header.
fn token_from_parts(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        return Some(cookie.value().to_string());
    }

    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

impl<S> FromRequestParts<S> for Credential
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        require_credential(token_from_parts(parts).as_deref())
    }
}
