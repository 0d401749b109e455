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
use crate::store::friend_activity::{self, RatingEntry};

#[derive(Debug, Deserialize)]
pub struct SetRatingsRequest {
    pub ratings: Vec<RatingEntry>,
}

pub async fn get_ratings(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(friend_id): Path<i32>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match friend_activity::get_friend_ratings(&mut conn, &session.user_id, friend_id).await {
        Ok(ratings) => ok_json(ratings),
        Err(e) => store_failure("ratings", e),
    }
}

/// Replace the friend's whole rating set with the submitted list. Ratings
/// must be 1-5; anything else is rejected before touching the store.
pub async fn set_ratings(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(friend_id): Path<i32>,
    Json(req): Json<SetRatingsRequest>,
) -> JsonReply {
    if let Some(bad) = req.ratings.iter().find(|r| !(1..=5).contains(&r.rating)) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("Rating {} for activity {} is out of range", bad.rating, bad.activity_id)
            })),
        );
    }

    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match friend_activity::set_friend_ratings(&mut conn, &session.user_id, friend_id, &req.ratings)
        .await
    {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => store_failure("ratings", e),
    }
}
