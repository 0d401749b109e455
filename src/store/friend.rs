// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::DbConnection;
use crate::error::StoreError;
use crate::models::{Friend, NewFriend, UpdateFriend};
use crate::schema::friends;

pub async fn list_friends(
    conn: &mut DbConnection,
    user_id: &str,
) -> Result<Vec<Friend>, StoreError> {
    let rows = friends::table
        .filter(friends::user_id.eq(user_id))
        .order(friends::name.asc())
        .load::<Friend>(conn)
        .await?;
    Ok(rows)
}

pub async fn get_friend(
    conn: &mut DbConnection,
    user_id: &str,
    id: i32,
) -> Result<Friend, StoreError> {
    let row = friends::table
        .filter(friends::id.eq(id))
        .filter(friends::user_id.eq(user_id))
        .first::<Friend>(conn)
        .await?;
    Ok(row)
}

/// Caller-supplied fields for a new friend.
#[derive(Debug, Default)]
pub struct CreateFriend {
    pub name: String,
    pub closeness_tier_id: Option<i32>,
    pub birthday: Option<NaiveDate>,
    pub location: Option<String>,
    pub email: Option<String>,
}

pub async fn create_friend(
    conn: &mut DbConnection,
    user_id: &str,
    data: CreateFriend,
) -> Result<Friend, StoreError> {
    let now = Utc::now().naive_utc();
    let new_friend = NewFriend {
        user_id: user_id.to_string(),
        name: data.name,
        closeness_tier_id: data.closeness_tier_id,
        birthday: data.birthday,
        location: data.location,
        email: data.email,
        has_photo: false,
        created_at: now,
        updated_at: now,
    };

    let row = diesel::insert_into(friends::table)
        .values(&new_friend)
        .get_result::<Friend>(conn)
        .await?;
    Ok(row)
}

pub async fn update_friend(
    conn: &mut DbConnection,
    user_id: &str,
    id: i32,
    mut changes: UpdateFriend,
) -> Result<Friend, StoreError> {
    changes.updated_at = Some(Utc::now().naive_utc());
    let row = diesel::update(
        friends::table
            .filter(friends::id.eq(id))
            .filter(friends::user_id.eq(user_id)),
    )
    .set(&changes)
    .get_result::<Friend>(conn)
    .await?;
    Ok(row)
}

pub async fn delete_friend(
    conn: &mut DbConnection,
    user_id: &str,
    id: i32,
) -> Result<usize, StoreError> {
    let deleted = diesel::delete(
        friends::table
            .filter(friends::id.eq(id))
            .filter(friends::user_id.eq(user_id)),
    )
    .execute(conn)
    .await?;
    Ok(deleted)
}

/// Whether the friend row belongs to the user. Operations on other users'
/// friends are gated on this and fall through as no-ops.
pub(crate) async fn friend_is_owned(
    conn: &mut DbConnection,
    user_id: &str,
    friend_id: i32,
) -> Result<bool, StoreError> {
    let count = friends::table
        .filter(friends::id.eq(friend_id))
        .filter(friends::user_id.eq(user_id))
        .count()
        .get_result::<i64>(conn)
        .await?;
    Ok(count > 0)
}

/// Flip the has_photo flag after a photo write or delete.
pub async fn set_friend_has_photo(
    conn: &mut DbConnection,
    user_id: &str,
    id: i32,
    has_photo: bool,
) -> Result<usize, StoreError> {
    let updated = diesel::update(
        friends::table
            .filter(friends::id.eq(id))
            .filter(friends::user_id.eq(user_id)),
    )
    .set((
        friends::has_photo.eq(has_photo),
        friends::updated_at.eq(Utc::now().naive_utc()),
    ))
    .execute(conn)
    .await?;
    Ok(updated)
}
