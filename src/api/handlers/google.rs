// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use url::Url;

use crate::auth::RequireSession;
use crate::config::Config;
use crate::db::Database;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Scopes requested when a user upgrades from plain sign-in to calendar and
/// contacts access.
const UPGRADED_SCOPES: &[&str] = &[
    "openid",
    "email",
    "profile",
    "https://www.googleapis.com/auth/calendar.events",
    "https://www.googleapis.com/auth/contacts.readonly",
];

#[derive(Debug, Deserialize)]
pub struct ScopeUpgradeQuery {
    #[serde(rename = "callbackURL")]
    pub callback_url: String,
}

/// Redirect (302) to Google's consent screen requesting the upgraded scope
/// set, carrying the post-consent callback URL base64-encoded in `state`.
pub async fn google_scope_upgrade(
    State(_db): State<Arc<Database>>,
    RequireSession(_session): RequireSession,
    Query(query): Query<ScopeUpgradeQuery>,
) -> Response {
    let config = Config::get();
    let google = match &config.google {
        Some(google) => google,
        None => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Google OAuth is not configured"
                })),
            )
                .into_response()
        }
    };

    let consent_url =
        match build_consent_url(&google.client_id, &config.auth.base_url, &query.callback_url) {
            Ok(url) => url,
            Err(e) => {
                error!("Failed to build Google consent URL: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Failed to build consent URL"
                    })),
                )
                    .into_response();
            }
        };

    (
        StatusCode::FOUND,
        [(header::LOCATION, consent_url.to_string())],
    )
        .into_response()
}

fn build_consent_url(
    client_id: &str,
    base_url: &Url,
    callback_url: &str,
) -> Result<Url, url::ParseError> {
    let redirect_uri = base_url.join("api/auth/callback/google")?;
    let mut url = Url::parse(GOOGLE_AUTH_URL)?;
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri.as_str())
        .append_pair("response_type", "code")
        .append_pair("scope", &UPGRADED_SCOPES.join(" "))
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent")
        .append_pair("include_granted_scopes", "true")
        .append_pair("state", &BASE64.encode(callback_url));
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consent_url_carries_base64_state() {
        let base = Url::parse("https://friendfocus.example").unwrap();
        let url = build_consent_url("client-1", &base, "/settings?tab=google").unwrap();

        let state = url
            .query_pairs()
            .find(|(k, _)| k == "state")
            .map(|(_, v)| v.to_string())
            .unwrap();
        let decoded = BASE64.decode(state.as_bytes()).unwrap();
        assert_eq!(decoded, b"/settings?tab=google");
    }

    #[test]
    fn consent_url_requests_upgraded_scopes() {
        let base = Url::parse("https://friendfocus.example").unwrap();
        let url = build_consent_url("client-1", &base, "/").unwrap();

        let scope = url
            .query_pairs()
            .find(|(k, _)| k == "scope")
            .map(|(_, v)| v.to_string())
            .unwrap();
        assert!(scope.contains("calendar.events"));
        assert!(scope.contains("contacts.readonly"));

        let redirect = url
            .query_pairs()
            .find(|(k, _)| k == "redirect_uri")
            .map(|(_, v)| v.to_string())
            .unwrap();
        assert_eq!(redirect, "https://friendfocus.example/api/auth/callback/google");
    }
}
