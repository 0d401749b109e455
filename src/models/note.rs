// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use crate::schema::notes;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = notes)]
pub struct Note {
    pub id: i32,
    pub user_id: String,
    pub content: String,
    pub note_type: String,
    pub friend_id: Option<i32>,
    pub event_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// DTO for creating a new note
#[derive(Debug, Insertable, Serialize, Deserialize)]
#[diesel(table_name = notes)]
pub struct NewNote {
    pub user_id: String,
    pub content: String,
    pub note_type: String,
    pub friend_id: Option<i32>,
    pub event_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Default, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = notes)]
pub struct UpdateNote {
    pub content: Option<String>,
    pub note_type: Option<String>,
    pub friend_id: Option<Option<i32>>,
    pub event_id: Option<Option<i32>>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A note joined with the display names of its linked friend and event.
/// Either name is null when the link is absent.
#[derive(Debug, Serialize, Deserialize)]
pub struct NoteWithLinks {
    #[serde(flatten)]
    pub note: Note,
    pub friend_name: Option<String>,
    pub event_name: Option<String>,
}
