// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::friend::friend_is_owned;
use crate::db::DbConnection;
use crate::error::StoreError;
use crate::models::{Event, EventInvitation, NewEvent, NewEventInvitation, UpdateEvent};
use crate::schema::{event_invitations, events, friends};

pub async fn list_events(
    conn: &mut DbConnection,
    user_id: &str,
) -> Result<Vec<Event>, StoreError> {
    let rows = events::table
        .filter(events::user_id.eq(user_id))
        .order((events::event_date.desc(), events::created_at.desc()))
        .load::<Event>(conn)
        .await?;
    Ok(rows)
}

pub async fn get_event(
    conn: &mut DbConnection,
    user_id: &str,
    id: i32,
) -> Result<Event, StoreError> {
    let row = events::table
        .filter(events::id.eq(id))
        .filter(events::user_id.eq(user_id))
        .first::<Event>(conn)
        .await?;
    Ok(row)
}

pub async fn create_event(
    conn: &mut DbConnection,
    user_id: &str,
    name: String,
    activity_id: Option<i32>,
    event_date: Option<NaiveDate>,
    event_time: Option<String>,
    location: Option<String>,
) -> Result<Event, StoreError> {
    let new_event = NewEvent {
        user_id: user_id.to_string(),
        name,
        activity_id,
        event_date,
        event_time,
        location,
        created_at: Utc::now().naive_utc(),
    };

    let row = diesel::insert_into(events::table)
        .values(&new_event)
        .get_result::<Event>(conn)
        .await?;
    Ok(row)
}

pub async fn update_event(
    conn: &mut DbConnection,
    user_id: &str,
    id: i32,
    changes: UpdateEvent,
) -> Result<Event, StoreError> {
    let row = diesel::update(
        events::table
            .filter(events::id.eq(id))
            .filter(events::user_id.eq(user_id)),
    )
    .set(&changes)
    .get_result::<Event>(conn)
    .await?;
    Ok(row)
}

pub async fn delete_event(
    conn: &mut DbConnection,
    user_id: &str,
    id: i32,
) -> Result<usize, StoreError> {
    let deleted = diesel::delete(
        events::table
            .filter(events::id.eq(id))
            .filter(events::user_id.eq(user_id)),
    )
    .execute(conn)
    .await?;
    Ok(deleted)
}

/// List invitations for one of the user's events. A foreign event id yields
/// an empty list.
pub async fn list_invitations(
    conn: &mut DbConnection,
    user_id: &str,
    event_id: i32,
) -> Result<Vec<EventInvitation>, StoreError> {
    if !event_is_owned(conn, user_id, event_id).await? {
        return Ok(Vec::new());
    }

    let rows = event_invitations::table
        .filter(event_invitations::event_id.eq(event_id))
        .load::<EventInvitation>(conn)
        .await?;
    Ok(rows)
}

/// Invitations joined with friend names, for the calendar guest list and
/// invitation emails.
pub async fn list_invitation_guests(
    conn: &mut DbConnection,
    user_id: &str,
    event_id: i32,
) -> Result<Vec<(String, String)>, StoreError> {
    if !event_is_owned(conn, user_id, event_id).await? {
        return Ok(Vec::new());
    }

    let rows = event_invitations::table
        .inner_join(friends::table.on(friends::id.eq(event_invitations::friend_id)))
        .filter(event_invitations::event_id.eq(event_id))
        .select((friends::name, event_invitations::status))
        .load::<(String, String)>(conn)
        .await?;
    Ok(rows)
}

/// What an invitation request should write, given ownership of both ends and
/// any existing row for the pair.
#[derive(Debug, PartialEq, Eq)]
enum InvitationAction {
    /// Event or friend belongs to someone else; nothing is written.
    Reject,
    /// The pair already has an invitation; it is returned unchanged.
    KeepExisting,
    Insert,
}

/// An invitation only goes through when the caller owns both the event and
/// the invited friend, and at most one row exists per (event, friend) pair.
fn plan_invitation(
    event_owned: bool,
    friend_owned: bool,
    already_invited: bool,
) -> InvitationAction {
    if !event_owned || !friend_owned {
        InvitationAction::Reject
    } else if already_invited {
        InvitationAction::KeepExisting
    } else {
        InvitationAction::Insert
    }
}

/// Invite a friend to an event, one invitation per (event, friend) pair via
/// check-then-write. Both the event and the friend must belong to the user;
/// a foreign id on either side writes nothing.
pub async fn invite_friend(
    conn: &mut DbConnection,
    user_id: &str,
    event_id: i32,
    friend_id: i32,
) -> Result<Option<EventInvitation>, StoreError> {
    let event_owned = event_is_owned(conn, user_id, event_id).await?;
    let friend_owned = event_owned && friend_is_owned(conn, user_id, friend_id).await?;

    let existing = if event_owned && friend_owned {
        match event_invitations::table
            .filter(event_invitations::event_id.eq(event_id))
            .filter(event_invitations::friend_id.eq(friend_id))
            .first::<EventInvitation>(conn)
            .await
        {
            Ok(invitation) => Some(invitation),
            Err(diesel::result::Error::NotFound) => None,
            Err(e) => return Err(e.into()),
        }
    } else {
        None
    };

    match plan_invitation(event_owned, friend_owned, existing.is_some()) {
        InvitationAction::Reject => {
            debug!(
                "Skipping invitation of friend {} to event {}: not owned by the caller",
                friend_id, event_id
            );
            Ok(None)
        }
        InvitationAction::KeepExisting => Ok(existing),
        InvitationAction::Insert => {
            let new_invitation = NewEventInvitation {
                event_id,
                friend_id,
                status: "invited".to_string(),
            };
            let row = diesel::insert_into(event_invitations::table)
                .values(&new_invitation)
                .get_result::<EventInvitation>(conn)
                .await?;
            Ok(Some(row))
        }
    }
}

/// Update an invitation's RSVP status (invited/attending/declined).
pub async fn set_invitation_status(
    conn: &mut DbConnection,
    user_id: &str,
    event_id: i32,
    friend_id: i32,
    status: String,
) -> Result<usize, StoreError> {
    if !event_is_owned(conn, user_id, event_id).await? {
        return Ok(0);
    }

    let updated = diesel::update(
        event_invitations::table
            .filter(event_invitations::event_id.eq(event_id))
            .filter(event_invitations::friend_id.eq(friend_id)),
    )
    .set(event_invitations::status.eq(status))
    .execute(conn)
    .await?;
    Ok(updated)
}

pub async fn remove_invitation(
    conn: &mut DbConnection,
    user_id: &str,
    event_id: i32,
    friend_id: i32,
) -> Result<usize, StoreError> {
    if !event_is_owned(conn, user_id, event_id).await? {
        return Ok(0);
    }

    let deleted = diesel::delete(
        event_invitations::table
            .filter(event_invitations::event_id.eq(event_id))
            .filter(event_invitations::friend_id.eq(friend_id)),
    )
    .execute(conn)
    .await?;
    Ok(deleted)
}

async fn event_is_owned(
    conn: &mut DbConnection,
    user_id: &str,
    event_id: i32,
) -> Result<bool, StoreError> {
    let count = events::table
        .filter(events::id.eq(event_id))
        .filter(events::user_id.eq(user_id))
        .count()
        .get_result::<i64>(conn)
        .await?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invitation_to_someone_elses_friend_is_rejected() {
        // The caller's own event does not grant access to a foreign friend id
        assert_eq!(
            plan_invitation(true, false, false),
            InvitationAction::Reject
        );
    }

    #[test]
    fn invitation_on_someone_elses_event_is_rejected() {
        assert_eq!(
            plan_invitation(false, true, false),
            InvitationAction::Reject
        );
    }

    #[test]
    fn repeated_invitation_keeps_the_existing_row() {
        assert_eq!(
            plan_invitation(true, true, true),
            InvitationAction::KeepExisting
        );
    }

    #[test]
    fn owned_pair_without_a_row_inserts() {
        assert_eq!(
            plan_invitation(true, true, false),
            InvitationAction::Insert
        );
    }
}
