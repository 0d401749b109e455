// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::auth::RequireSession;
use crate::config::Config;
use crate::db::Database;
use crate::photos::{content_type_for, is_safe_filename, PhotoStore};

/// Serve a stored photo. Session required; traversal in the filename is
/// rejected before touching the filesystem.
pub async fn get_photo(
    State(_db): State<Arc<Database>>,
    RequireSession(_session): RequireSession,
    Path(filename): Path<String>,
) -> Response {
    if !is_safe_filename(&filename) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Invalid filename"
            })),
        )
            .into_response();
    }

    let store = PhotoStore::new(&Config::get().photos_dir);
    match store.read_file(&filename).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, content_type_for(&filename)),
                (header::CACHE_CONTROL, "public, max-age=86400"),
            ],
            bytes,
        )
            .into_response(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "Photo not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to read photo {}: {}", filename, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to read photo"
                })),
            )
                .into_response()
        }
    }
}
