// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::{db_unavailable, ok_json, store_failure, JsonReply};
use crate::auth::RequireSession;
use crate::calendar::{self, CalendarError, Invitation};
use crate::config::Config;
use crate::db::Database;
use crate::mailer::Mailer;
use crate::models::UpdateEvent;
use crate::store::{activity, event, friend};

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    #[serde(rename = "activityId")]
    pub activity_id: Option<i32>,
    pub date: Option<NaiveDate>,
    /// "HH:MM"
    pub time: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    #[serde(rename = "activityId")]
    pub activity_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    #[serde(rename = "friendId")]
    pub friend_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct InvitationStatusRequest {
    pub status: String,
}

pub async fn list_events(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match event::list_events(&mut conn, &session.user_id).await {
        Ok(events) => ok_json(events),
        Err(e) => store_failure("events", e),
    }
}

/// Event details with its invitation list.
pub async fn get_event(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    let found = match event::get_event(&mut conn, &session.user_id, id).await {
        Ok(found) => found,
        Err(e) => return store_failure("event", e),
    };
    let invitations = match event::list_invitations(&mut conn, &session.user_id, id).await {
        Ok(invitations) => invitations,
        Err(e) => return store_failure("invitations", e),
    };

    (
        StatusCode::OK,
        Json(json!({
            "event": found,
            "invitations": invitations
        })),
    )
}

pub async fn create_event(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Json(req): Json<CreateEventRequest>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match event::create_event(
        &mut conn,
        &session.user_id,
        req.name,
        req.activity_id,
        req.date,
        req.time,
        req.location,
    )
    .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(serde_json::to_value(created).unwrap_or_default()),
        ),
        Err(e) => store_failure("event", e),
    }
}

pub async fn update_event(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
    Json(req): Json<UpdateEventRequest>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    let changes = UpdateEvent {
        name: req.name,
        activity_id: req.activity_id.map(Some),
        event_date: req.date.map(Some),
        event_time: req.time.map(Some),
        location: req.location.map(Some),
    };
    match event::update_event(&mut conn, &session.user_id, id, changes).await {
        Ok(updated) => ok_json(updated),
        Err(e) => store_failure("event", e),
    }
}

pub async fn delete_event(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match event::delete_event(&mut conn, &session.user_id, id).await {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "event not found"
            })),
        ),
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "deleted" }))),
        Err(e) => store_failure("event", e),
    }
}

/// Build the Google-Calendar-compatible payload for an event. Events without
/// a date cannot be exported and yield a 400.
pub async fn get_calendar_payload(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    let found = match event::get_event(&mut conn, &session.user_id, id).await {
        Ok(found) => found,
        Err(e) => return store_failure("event", e),
    };

    let activity_name = match found.activity_id {
        Some(activity_id) => {
            match activity::get_activity(&mut conn, &session.user_id, activity_id).await {
                Ok(found_activity) => Some(found_activity.name),
                // A deleted activity just drops out of the description
                Err(e) if e.is_not_found() => None,
                Err(e) => return store_failure("activity", e),
            }
        }
        None => None,
    };

    let guests = match event::list_invitation_guests(&mut conn, &session.user_id, id).await {
        Ok(guests) => guests,
        Err(e) => return store_failure("invitations", e),
    };
    let invitations: Vec<Invitation> = guests
        .into_iter()
        .map(|(friend_name, status)| Invitation {
            friend_name,
            status,
        })
        .collect();

    let time = found.event_time.as_deref().and_then(calendar::parse_event_time);
    match calendar::build_calendar_payload(
        &found.name,
        activity_name.as_deref(),
        found.event_date,
        time,
        found.location.as_deref(),
        &invitations,
    ) {
        Ok(payload) => ok_json(payload),
        Err(CalendarError::MissingDate) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Event has no date"
            })),
        ),
    }
}

/// Invite a friend to an event. If the friend has an email address and the
/// mailer is configured, an invitation email goes out best-effort.
pub async fn invite_friend(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path(id): Path<i32>,
    Json(req): Json<InviteRequest>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    let invitation = match event::invite_friend(&mut conn, &session.user_id, id, req.friend_id).await
    {
        Ok(Some(invitation)) => invitation,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "event not found"
                })),
            )
        }
        Err(e) => return store_failure("invitation", e),
    };

    if let Some(mailer_config) = &Config::get().mailer {
        let invited = friend::get_friend(&mut conn, &session.user_id, req.friend_id).await;
        let found = event::get_event(&mut conn, &session.user_id, id).await;
        if let (Ok(invited), Ok(found)) = (invited, found) {
            if let Some(email) = invited.email.as_deref() {
                let mailer = Mailer::new(
                    mailer_config.api_key.clone(),
                    mailer_config.from_address.clone(),
                );
                let date = found.event_date.map(|d| d.to_string());
                if let Err(e) = mailer
                    .send_event_invitation(email, &invited.name, &found.name, date.as_deref())
                    .await
                {
                    warn!("Failed to send invitation email to friend {}: {}", req.friend_id, e);
                }
            }
        }
    }

    (
        StatusCode::CREATED,
        Json(serde_json::to_value(invitation).unwrap_or_default()),
    )
}

pub async fn set_invitation_status(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path((id, friend_id)): Path<(i32, i32)>,
    Json(req): Json<InvitationStatusRequest>,
) -> JsonReply {
    if !matches!(req.status.as_str(), "invited" | "attending" | "declined") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("Unknown invitation status: {}", req.status)
            })),
        );
    }

    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match event::set_invitation_status(&mut conn, &session.user_id, id, friend_id, req.status).await
    {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "invitation not found"
            })),
        ),
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => store_failure("invitation", e),
    }
}

pub async fn remove_invitation(
    State(db): State<Arc<Database>>,
    RequireSession(session): RequireSession,
    Path((id, friend_id)): Path<(i32, i32)>,
) -> JsonReply {
    let mut conn = match db.get_connection().await {
        Ok(conn) => conn,
        Err(e) => return db_unavailable(e),
    };

    match event::remove_invitation(&mut conn, &session.user_id, id, friend_id).await {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "invitation not found"
            })),
        ),
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "deleted" }))),
        Err(e) => store_failure("invitation", e),
    }
}
