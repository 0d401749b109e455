// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::{db_unavailable, ok_json, store_failure, JsonReply};
use crate::auth::RequireSession;
use crate::db::Database;
use crate::models::UpdateNote;
use crate::store::note::{self, NoteFilter};

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub content: String,
    #[serde(rename = "type")]
    pub note_type: String,
    #[serde(rename = "friendId")]
    pub friend_id: Option<i32>,
    #[serde(rename = "eventId")]
    pub event_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub note_type: Option<String>,
}

/// List notes filtered by any combination of type, friend, event, and a
/// content substring, newest-first.
pub async fn list_notes(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Query(filter): Query<NoteFilter>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match note::list_notes(&mut conn, &session.user_id, filter).await {
        Ok(notes) => ok_json(notes),
        Err(e) => store_failure("notes", e),
    }
}

pub async fn create_note(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Json(req): Json<CreateNoteRequest>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match note::create_note(
        &mut conn,
        &session.user_id,
        req.content,
        req.note_type,
        req.friend_id,
        req.event_id,
    )
    .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(serde_json::to_value(created).unwrap_or_default()),
        ),
        Err(e) => store_failure("note", e),
    }
}

pub async fn update_note(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
    Json(req): Json<UpdateNoteRequest>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    let changes = UpdateNote {
        content: req.content,
        note_type: req.note_type,
        friend_id: None,
        event_id: None,
        updated_at: None,
    };
    match note::update_note(&mut conn, &session.user_id, id, changes).await {
        Ok(updated) => ok_json(updated),
        Err(e) => store_failure("note", e),
    }
}

pub async fn delete_note(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match note::delete_note(&mut conn, &session.user_id, id).await {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "note not found"
            })),
        ),
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "deleted" }))),
        Err(e) => store_failure("note", e),
    }
}
