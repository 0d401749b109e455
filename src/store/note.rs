// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Deserialize;

use crate::db::DbConnection;
use crate::error::StoreError;
use crate::models::{NewNote, Note, NoteWithLinks, UpdateNote};
use crate::schema::{events, friends, notes};

/// Optional note filters, combined by logical AND. Each supplied field adds
/// one predicate; absent fields add nothing.
#[derive(Debug, Default, Deserialize)]
pub struct NoteFilter {
    #[serde(rename = "type")]
    pub note_type: Option<String>,
    #[serde(rename = "friendId")]
    pub friend_id: Option<i32>,
    #[serde(rename = "eventId")]
    pub event_id: Option<i32>,
    pub search: Option<String>,
}

/// List a user's notes newest-first, each enriched with the linked friend's
/// and event's display name (null when the link is absent). Search matches
/// content with LIKE '%term%', case-sensitive.
pub async fn list_notes(
    conn: &mut DbConnection,
    user_id: &str,
    filter: NoteFilter,
) -> Result<Vec<NoteWithLinks>, StoreError> {
    let mut query = notes::table
        .left_join(friends::table.on(notes::friend_id.eq(friends::id.nullable())))
        .left_join(events::table.on(notes::event_id.eq(events::id.nullable())))
        .filter(notes::user_id.eq(user_id.to_string()))
        .select((
            Note::as_select(),
            friends::name.nullable(),
            events::name.nullable(),
        ))
        .order(notes::created_at.desc())
        .into_boxed();

    if let Some(note_type) = filter.note_type {
        query = query.filter(notes::note_type.eq(note_type));
    }
    if let Some(friend_id) = filter.friend_id {
        query = query.filter(notes::friend_id.eq(friend_id));
    }
    if let Some(event_id) = filter.event_id {
        query = query.filter(notes::event_id.eq(event_id));
    }
    if let Some(pattern) = search_pattern(filter.search.as_deref()) {
        query = query.filter(notes::content.like(pattern));
    }

    let rows = query
        .load::<(Note, Option<String>, Option<String>)>(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(note, friend_name, event_name)| NoteWithLinks {
            note,
            friend_name,
            event_name,
        })
        .collect())
}

/// LIKE pattern for a content search. An empty term adds no predicate rather
/// than degenerating into `LIKE '%%'`, which matches every note.
fn search_pattern(search: Option<&str>) -> Option<String> {
    search
        .filter(|term| !term.is_empty())
        .map(|term| format!("%{}%", term))
}

pub async fn create_note(
    conn: &mut DbConnection,
    user_id: &str,
    content: String,
    note_type: String,
    friend_id: Option<i32>,
    event_id: Option<i32>,
) -> Result<Note, StoreError> {
    let now = Utc::now().naive_utc();
    let new_note = NewNote {
        user_id: user_id.to_string(),
        content,
        note_type,
        friend_id,
        event_id,
        created_at: now,
        updated_at: now,
    };

    let row = diesel::insert_into(notes::table)
        .values(&new_note)
        .get_result::<Note>(conn)
        .await?;
    Ok(row)
}

pub async fn update_note(
    conn: &mut DbConnection,
    user_id: &str,
    id: i32,
    mut changes: UpdateNote,
) -> Result<Note, StoreError> {
    changes.updated_at = Some(Utc::now().naive_utc());
    let row = diesel::update(
        notes::table
            .filter(notes::id.eq(id))
            .filter(notes::user_id.eq(user_id)),
    )
    .set(&changes)
    .get_result::<Note>(conn)
    .await?;
    Ok(row)
}

pub async fn delete_note(
    conn: &mut DbConnection,
    user_id: &str,
    id: i32,
) -> Result<usize, StoreError> {
    let deleted = diesel::delete(
        notes::table
            .filter(notes::id.eq(id))
            .filter(notes::user_id.eq(user_id)),
    )
    .execute(conn)
    .await?;
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_term_becomes_a_contains_pattern() {
        assert_eq!(search_pattern(Some("coffee")), Some("%coffee%".to_string()));
    }

    #[test]
    fn empty_search_term_adds_no_predicate() {
        assert_eq!(search_pattern(Some("")), None);
        assert_eq!(search_pattern(None), None);
    }
}
