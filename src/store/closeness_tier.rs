// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use diesel::dsl::max;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::position_assignments;
use crate::db::DbConnection;
use crate::error::StoreError;
use crate::models::{ClosenessTier, NewClosenessTier, UpdateClosenessTier};
use crate::schema::closeness_tiers;

/// List a user's closeness tiers in sort order.
pub async fn list_closeness_tiers(
    conn: &mut DbConnection,
    user_id: &str,
) -> Result<Vec<ClosenessTier>, StoreError> {
    let rows = closeness_tiers::table
        .filter(closeness_tiers::user_id.eq(user_id))
        .order(closeness_tiers::sort_order.asc())
        .load::<ClosenessTier>(conn)
        .await?;
    Ok(rows)
}

/// Create a tier at the end of the user's list. Tier sort_order is 1-based:
/// the first tier gets 1, later ones current max + 1.
pub async fn create_closeness_tier(
    conn: &mut DbConnection,
    user_id: &str,
    label: String,
    color: Option<String>,
) -> Result<ClosenessTier, StoreError> {
    let current_max = closeness_tiers::table
        .filter(closeness_tiers::user_id.eq(user_id))
        .select(max(closeness_tiers::sort_order))
        .first::<Option<i32>>(conn)
        .await?;
    let sort_order = current_max.map_or(1, |m| m + 1);

    let new_tier = NewClosenessTier {
        user_id: user_id.to_string(),
        label,
        sort_order,
        color,
    };

    let row = diesel::insert_into(closeness_tiers::table)
        .values(&new_tier)
        .get_result::<ClosenessTier>(conn)
        .await?;
    Ok(row)
}

pub async fn update_closeness_tier(
    conn: &mut DbConnection,
    user_id: &str,
    id: i32,
    changes: UpdateClosenessTier,
) -> Result<ClosenessTier, StoreError> {
    let row = diesel::update(
        closeness_tiers::table
            .filter(closeness_tiers::id.eq(id))
            .filter(closeness_tiers::user_id.eq(user_id)),
    )
    .set(&changes)
    .get_result::<ClosenessTier>(conn)
    .await?;
    Ok(row)
}

pub async fn delete_closeness_tier(
    conn: &mut DbConnection,
    user_id: &str,
    id: i32,
) -> Result<usize, StoreError> {
    let deleted = diesel::delete(
        closeness_tiers::table
            .filter(closeness_tiers::id.eq(id))
            .filter(closeness_tiers::user_id.eq(user_id)),
    )
    .execute(conn)
    .await?;
    Ok(deleted)
}

/// Rewrite each tier's sort_order to its one-based index in `ids`. Same
/// contract as activity reordering, offset by one.
pub async fn reorder_closeness_tiers(
    conn: &mut DbConnection,
    user_id: &str,
    ids: &[i32],
) -> Result<(), StoreError> {
    for (id, sort_order) in position_assignments(ids, 1) {
        let updated = diesel::update(
            closeness_tiers::table
                .filter(closeness_tiers::id.eq(id))
                .filter(closeness_tiers::user_id.eq(user_id)),
        )
        .set(closeness_tiers::sort_order.eq(sort_order))
        .execute(conn)
        .await?;
        if updated == 0 {
            debug!("Reorder skipped unowned or missing tier {}", id);
        }
    }
    Ok(())
}
