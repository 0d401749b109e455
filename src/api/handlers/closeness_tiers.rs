// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::{db_unavailable, ok_json, store_failure, JsonReply};
use crate::auth::RequireSession;
use crate::db::Database;
use crate::models::UpdateClosenessTier;
use crate::store::closeness_tier;

#[derive(Debug, Deserialize)]
pub struct CreateTierRequest {
    pub label: String,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTierRequest {
    pub label: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<i32>,
}

pub async fn list_tiers(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match closeness_tier::list_closeness_tiers(&mut conn, &session.user_id).await {
        Ok(tiers) => ok_json(tiers),
        Err(e) => store_failure("closeness tiers", e),
    }
}

pub async fn create_tier(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Json(req): Json<CreateTierRequest>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match closeness_tier::create_closeness_tier(&mut conn, &session.user_id, req.label, req.color)
        .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(serde_json::to_value(created).unwrap_or_default()),
        ),
        Err(e) => store_failure("closeness tier", e),
    }
}

pub async fn update_tier(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
    Json(req): Json<UpdateTierRequest>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    let changes = UpdateClosenessTier {
        label: req.label,
        color: req.color,
    };
    match closeness_tier::update_closeness_tier(&mut conn, &session.user_id, id, changes).await {
        Ok(updated) => ok_json(updated),
        Err(e) => store_failure("closeness tier", e),
    }
}

pub async fn delete_tier(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match closeness_tier::delete_closeness_tier(&mut conn, &session.user_id, id).await {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "closeness tier not found"
            })),
        ),
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "deleted" }))),
        Err(e) => store_failure("closeness tier", e),
    }
}

pub async fn reorder_tiers(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Json(req): Json<ReorderRequest>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match closeness_tier::reorder_closeness_tiers(&mut conn, &session.user_id, &req.ids).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => store_failure("closeness tiers", e),
    }
}
