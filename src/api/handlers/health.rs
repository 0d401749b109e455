// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;

use crate::db::Database;

/// Health check endpoint
pub async fn health_check(State(db): State<Arc<Database>>) -> impl IntoResponse {
    match db.get_connection().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": Utc::now().to_rfc3339()
            })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "error",
                "message": format!("Database connection failed: {}", e)
            })),
        ),
    }
}
