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
use crate::models::UpdateActivity;
use crate::store::activity;

#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    pub name: String,
    pub icon: Option<String>,
    #[serde(default, rename = "isDefault")]
    pub is_default: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateActivityRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<i32>,
}

pub async fn list_activities(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match activity::list_activities(&mut conn, &session.user_id).await {
        Ok(activities) => ok_json(activities),
        Err(e) => store_failure("activities", e),
    }
}

pub async fn create_activity(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Json(req): Json<CreateActivityRequest>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match activity::create_activity(&mut conn, &session.user_id, req.name, req.icon, req.is_default)
        .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(serde_json::to_value(created).unwrap_or_default()),
        ),
        Err(e) => store_failure("activity", e),
    }
}

pub async fn update_activity(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
    Json(req): Json<UpdateActivityRequest>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    let changes = UpdateActivity {
        name: req.name,
        icon: req.icon,
    };
    match activity::update_activity(&mut conn, &session.user_id, id, changes).await {
        Ok(updated) => ok_json(updated),
        Err(e) => store_failure("activity", e),
    }
}

pub async fn delete_activity(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match activity::delete_activity(&mut conn, &session.user_id, id).await {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "activity not found"
            })),
        ),
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "deleted" }))),
        Err(e) => store_failure("activity", e),
    }
}

/// Rewrite sort_order for the caller's full activity list. The caller
/// asserts `ids` is the complete set; omitted ids keep their old position.
pub async fn reorder_activities(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Json(req): Json<ReorderRequest>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match activity::reorder_activities(&mut conn, &session.user_id, &req.ids).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => store_failure("activities", e),
    }
}
