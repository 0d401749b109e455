// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

//! Session gate over the external auth provider's session table. A missing
//! session is not an error: it is a redirect to the login page, raised as an
//! extractor rejection and propagated unmodified by every handler.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::error;

use crate::db::Database;
use crate::error::StoreError;
use crate::models::Session;
use crate::schema::sessions;

/// Fetch the session referenced by the request headers, or None. Expired
/// sessions are treated as absent.
pub async fn optional_session(
    headers: &HeaderMap,
    db: &Database,
) -> Result<Option<Session>, StoreError> {
    let token = match session_token_from_headers(headers) {
        Some(token) => token,
        None => return Ok(None),
    };

    let mut conn = db.get_connection().await?;
    let session = sessions::table
        .filter(sessions::token.eq(token))
        .filter(sessions::expires_at.gt(Utc::now().naive_utc()))
        .first::<Session>(&mut conn)
        .await;

    match session {
        Ok(session) => Ok(Some(session)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Fetch the session or raise the login redirect.
pub async fn require_session(headers: &HeaderMap, db: &Database) -> Result<Session, AuthRedirect> {
    match optional_session(headers, db).await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err(AuthRedirect),
        Err(e) => {
            error!("Failed to look up session: {}", e);
            Err(AuthRedirect)
        }
    }
}

/// The session token travels either in the `session_token` cookie or as a
/// bearer token.
fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(cookie_header) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
        for pair in cookie_header.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                if name == "session_token" && !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
}

/// Control transfer to the login page, not an error.
#[derive(Debug)]
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

/// Extractor form of `require_session` for route handlers.
pub struct RequireSession(pub Session);

#[async_trait]
impl FromRequestParts<Arc<Database>> for RequireSession {
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<Database>,
    ) -> Result<Self, Self::Rejection> {
        require_session(&parts.headers, state)
            .await
            .map(RequireSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn token_from_session_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session_token=abc123; other=1"),
        );
        assert_eq!(
            session_token_from_headers(&headers),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn token_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer tok-42"),
        );
        assert_eq!(
            session_token_from_headers(&headers),
            Some("tok-42".to_string())
        );
    }

    #[test]
    fn no_token_when_headers_are_empty() {
        assert_eq!(session_token_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn empty_cookie_value_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("session_token="),
        );
        assert_eq!(session_token_from_headers(&headers), None);
    }
}
