// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use diesel::dsl::max;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::position_assignments;
use crate::db::DbConnection;
use crate::error::StoreError;
use crate::models::{Activity, NewActivity, UpdateActivity};
use crate::schema::activities;

/// List a user's activities in sort order.
pub async fn list_activities(
    conn: &mut DbConnection,
    user_id: &str,
) -> Result<Vec<Activity>, StoreError> {
    let rows = activities::table
        .filter(activities::user_id.eq(user_id))
        .order(activities::sort_order.asc())
        .load::<Activity>(conn)
        .await?;
    Ok(rows)
}

pub async fn get_activity(
    conn: &mut DbConnection,
    user_id: &str,
    id: i32,
) -> Result<Activity, StoreError> {
    let row = activities::table
        .filter(activities::id.eq(id))
        .filter(activities::user_id.eq(user_id))
        .first::<Activity>(conn)
        .await?;
    Ok(row)
}

/// Create an activity at the end of the user's list. sort_order is assigned
/// as current max + 1, starting at 0 for the first activity.
pub async fn create_activity(
    conn: &mut DbConnection,
    user_id: &str,
    name: String,
    icon: Option<String>,
    is_default: bool,
) -> Result<Activity, StoreError> {
    let current_max = activities::table
        .filter(activities::user_id.eq(user_id))
        .select(max(activities::sort_order))
        .first::<Option<i32>>(conn)
        .await?;
    let sort_order = current_max.map_or(0, |m| m + 1);

    let new_activity = NewActivity {
        user_id: user_id.to_string(),
        name,
        icon,
        is_default,
        sort_order,
    };

    let row = diesel::insert_into(activities::table)
        .values(&new_activity)
        .get_result::<Activity>(conn)
        .await?;
    Ok(row)
}

pub async fn update_activity(
    conn: &mut DbConnection,
    user_id: &str,
    id: i32,
    changes: UpdateActivity,
) -> Result<Activity, StoreError> {
    let row = diesel::update(
        activities::table
            .filter(activities::id.eq(id))
            .filter(activities::user_id.eq(user_id)),
    )
    .set(&changes)
    .get_result::<Activity>(conn)
    .await?;
    Ok(row)
}

pub async fn delete_activity(
    conn: &mut DbConnection,
    user_id: &str,
    id: i32,
) -> Result<usize, StoreError> {
    let deleted = diesel::delete(
        activities::table
            .filter(activities::id.eq(id))
            .filter(activities::user_id.eq(user_id)),
    )
    .execute(conn)
    .await?;
    Ok(deleted)
}

/// Rewrite each activity's sort_order to its zero-based index in `ids`.
///
/// One UPDATE per id, no wrapping transaction. Ids not owned by the user
/// match zero rows and are skipped silently; ids omitted from the list keep
/// their previous sort_order. Re-running with the same input is idempotent.
pub async fn reorder_activities(
    conn: &mut DbConnection,
    user_id: &str,
    ids: &[i32],
) -> Result<(), StoreError> {
    for (id, sort_order) in position_assignments(ids, 0) {
        let updated = diesel::update(
            activities::table
                .filter(activities::id.eq(id))
                .filter(activities::user_id.eq(user_id)),
        )
        .set(activities::sort_order.eq(sort_order))
        .execute(conn)
        .await?;
        if updated == 0 {
            debug!("Reorder skipped unowned or missing activity {}", id);
        }
    }
    Ok(())
}
