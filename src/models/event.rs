// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use crate::schema::{event_invitations, events};
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = events)]
pub struct Event {
    pub id: i32,
    pub user_id: String,
    pub name: String,
    pub activity_id: Option<i32>,
    pub event_date: Option<NaiveDate>,
    /// "HH:MM", as submitted by the time form input
    pub event_time: Option<String>,
    pub location: Option<String>,
    pub created_at: NaiveDateTime,
}

/// DTO for creating a new event
#[derive(Debug, Insertable, Serialize, Deserialize)]
#[diesel(table_name = events)]
pub struct NewEvent {
    pub user_id: String,
    pub name: String,
    pub activity_id: Option<i32>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<String>,
    pub location: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Default, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = events)]
pub struct UpdateEvent {
    pub name: Option<String>,
    pub activity_id: Option<Option<i32>>,
    pub event_date: Option<Option<NaiveDate>>,
    pub event_time: Option<Option<String>>,
    pub location: Option<Option<String>>,
}

/// An invitation of a friend to an event. Status is one of
/// invited/attending/declined.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = event_invitations)]
pub struct EventInvitation {
    pub id: i32,
    pub event_id: i32,
    pub friend_id: i32,
    pub status: String,
}

#[derive(Debug, Insertable, Serialize, Deserialize)]
#[diesel(table_name = event_invitations)]
pub struct NewEventInvitation {
    pub event_id: i32,
    pub friend_id: i32,
    pub status: String,
}
