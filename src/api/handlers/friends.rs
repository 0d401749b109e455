// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::{db_unavailable, ok_json, store_failure, JsonReply};
use crate::auth::RequireSession;
use crate::config::Config;
use crate::db::Database;
use crate::models::UpdateFriend;
use crate::photos::PhotoStore;
use crate::store::friend::{self, CreateFriend};

#[derive(Debug, Deserialize)]
pub struct CreateFriendRequest {
    pub name: String,
    #[serde(rename = "closenessTierId")]
    pub closeness_tier_id: Option<i32>,
    pub birthday: Option<NaiveDate>,
    pub location: Option<String>,
    pub email: Option<String>,
}

/// Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateFriendRequest {
    pub name: Option<String>,
    #[serde(rename = "closenessTierId")]
    pub closeness_tier_id: Option<i32>,
    pub birthday: Option<NaiveDate>,
    pub location: Option<String>,
    pub email: Option<String>,
}

pub async fn list_friends(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match friend::list_friends(&mut conn, &session.user_id).await {
        Ok(friends) => ok_json(friends),
        Err(e) => store_failure("friends", e),
    }
}

pub async fn get_friend(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match friend::get_friend(&mut conn, &session.user_id, id).await {
        Ok(found) => ok_json(found),
        Err(e) => store_failure("friend", e),
    }
}

pub async fn create_friend(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Json(req): Json<CreateFriendRequest>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    let data = CreateFriend {
        name: req.name,
        closeness_tier_id: req.closeness_tier_id,
        birthday: req.birthday,
        location: req.location,
        email: req.email,
    };
    match friend::create_friend(&mut conn, &session.user_id, data).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(serde_json::to_value(created).unwrap_or_default()),
        ),
        Err(e) => store_failure("friend", e),
    }
}

pub async fn update_friend(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
    Json(req): Json<UpdateFriendRequest>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    let changes = UpdateFriend {
        name: req.name,
        closeness_tier_id: req.closeness_tier_id.map(Some),
        birthday: req.birthday.map(Some),
        location: req.location.map(Some),
        email: req.email.map(Some),
        has_photo: None,
        updated_at: None,
    };
    match friend::update_friend(&mut conn, &session.user_id, id, changes).await {
        Ok(updated) => ok_json(updated),
        Err(e) => store_failure("friend", e),
    }
}

/// Delete a friend and best-effort clean up their photo file.
pub async fn delete_friend(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match friend::delete_friend(&mut conn, &session.user_id, id).await {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "friend not found"
            })),
        ),
        Ok(_) => {
            PhotoStore::new(&Config::get().photos_dir).delete(id).await;
            (StatusCode::OK, Json(json!({ "status": "deleted" })))
        }
        Err(e) => store_failure("friend", e),
    }
}

/// Store a friend's photo and flag the row.
pub async fn upload_photo(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
    body: Bytes,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    // Only the owner's friends accept photos
    match friend::get_friend(&mut conn, &session.user_id, id).await {
        Ok(_) => {}
        Err(e) => return store_failure("friend", e),
    }

    let store = PhotoStore::new(&Config::get().photos_dir);
    if let Err(e) = store.save(id, &body).await {
        error!("Failed to write photo for friend {}: {}", id, e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Failed to store photo"
            })),
        );
    }

    match friend::set_friend_has_photo(&mut conn, &session.user_id, id, true).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => store_failure("friend", e),
    }
}

/// Remove a friend's photo. The file delete is best-effort.
pub async fn delete_photo(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match friend::get_friend(&mut conn, &session.user_id, id).await {
        Ok(_) => {}
        Err(e) => return store_failure("friend", e),
    }

    PhotoStore::new(&Config::get().photos_dir).delete(id).await;

    match friend::set_friend_has_photo(&mut conn, &session.user_id, id, false).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => store_failure("friend", e),
    }
}
