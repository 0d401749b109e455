// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use axum::{extract::Query, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::config::Config;
use crate::places::PlacesClient;

#[derive(Debug, Deserialize)]
pub struct PlacesQuery {
    pub input: Option<String>,
    #[serde(rename = "placeId")]
    pub place_id: Option<String>,
}

/// Places proxy: `?input=` for autocomplete, `?placeId=` for details.
/// Disabled unless an API key is configured.
pub async fn places_proxy(Query(query): Query<PlacesQuery>) -> impl IntoResponse {
    let config = Config::get();
    let places = match &config.places {
        Some(places) => places,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Places integration is disabled"
                })),
            )
        }
    };

    let client = PlacesClient::new(places.api_key.clone());

    if let Some(input) = query.input.as_deref() {
        return match client.autocomplete(input).await {
            Ok(suggestions) => (
                StatusCode::OK,
                Json(json!({ "suggestions": suggestions })),
            ),
            Err(e) => {
                error!("Places autocomplete failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Places lookup failed"
                    })),
                )
            }
        };
    }

    if let Some(place_id) = query.place_id.as_deref() {
        return match client.details(place_id).await {
            Ok(Some(details)) => (StatusCode::OK, Json(json!({ "place": details }))),
            Ok(None) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Place not found"
                })),
            ),
            Err(e) => {
                error!("Place details failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Places lookup failed"
                    })),
                )
            }
        };
    }

    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Provide either input or placeId"
        })),
    )
}
