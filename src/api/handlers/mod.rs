pub mod activities;
pub mod closeness_tiers;
pub mod events;
pub mod friends;
pub mod google;
pub mod health;
pub mod notes;
pub mod photos;
pub mod places;
pub mod ratings;

use axum::{http::StatusCode, Json};
use serde_json::Value;
use tracing::error;

use crate::error::StoreError;

pub(crate) type JsonReply = (StatusCode, Json<Value>);

/// 500 reply for a pool checkout failure.
pub(crate) fn db_unavailable(e: impl std::fmt::Display) -> JsonReply {
    error!("Database connection error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": format!("Database error: {}", e)
        })),
    )
}

/// Map a store failure onto the API error shape: NotFound becomes 404,
/// anything else a generic 500.
pub(crate) fn store_failure(entity: &str, e: StoreError) -> JsonReply {
    if e.is_not_found() {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": format!("{} not found", entity)
            })),
        )
    } else {
        error!("Store error for {}: {}", entity, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": format!("Failed to access {}", entity)
            })),
        )
    }
}

/// 200 with the value serialized, mirroring how list/get endpoints reply.
pub(crate) fn ok_json<T: serde::Serialize>(data: T) -> JsonReply {
    (
        StatusCode::OK,
        Json(serde_json::to_value(data).unwrap_or_default()),
    )
}
