// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

//! Set-reconciling bulk upsert for friend ratings.
//!
//! A FriendActivity row exists iff a rating was explicitly set for that
//! (friend, activity) pair. Bulk replacement makes the stored set match a
//! caller-supplied desired list exactly: stale rows are deleted first, then
//! each desired pair is updated in place or inserted. The steps are not
//! wrapped in a transaction; a failure mid-way leaves a partial result, and
//! the recovery path is to re-run the whole reconciliation with the same
//! input, which is idempotent.

use std::collections::{BTreeMap, HashSet};

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::friend::friend_is_owned;
use crate::db::DbConnection;
use crate::error::StoreError;
use crate::models::{FriendActivity, NewFriendActivity};
use crate::schema::friend_activities;

/// One desired (activity, rating) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingEntry {
    pub activity_id: i32,
    pub rating: i32,
}

/// The writes needed to make the stored set match the desired list.
#[derive(Debug, Default, PartialEq)]
struct ReconcilePlan {
    /// Row ids whose activity is absent from the desired set
    delete_row_ids: Vec<i32>,
    /// (row id, new rating) for pairs that already have a row
    updates: Vec<(i32, i32)>,
    /// (activity_id, rating) for pairs with no row yet
    inserts: Vec<(i32, i32)>,
}

/// Compute the reconciliation plan from the existing rows and the desired
/// list. Duplicate activity ids in the desired list collapse to the last
/// occurrence, matching what sequential upserts would leave behind.
fn plan_reconcile(existing: &[FriendActivity], desired: &[RatingEntry]) -> ReconcilePlan {
    let desired_ids: HashSet<i32> = desired.iter().map(|e| e.activity_id).collect();

    let delete_row_ids = existing
        .iter()
        .filter(|row| !desired_ids.contains(&row.activity_id))
        .map(|row| row.id)
        .collect();

    let mut updates: BTreeMap<i32, i32> = BTreeMap::new();
    let mut inserts: BTreeMap<i32, i32> = BTreeMap::new();
    for entry in desired {
        match existing.iter().find(|r| r.activity_id == entry.activity_id) {
            Some(row) => {
                updates.insert(row.id, entry.rating);
            }
            None => {
                inserts.insert(entry.activity_id, entry.rating);
            }
        }
    }

    ReconcilePlan {
        delete_row_ids,
        updates: updates.into_iter().collect(),
        inserts: inserts.into_iter().collect(),
    }
}

/// List the rating rows for one of the user's friends.
pub async fn get_friend_ratings(
    conn: &mut DbConnection,
    user_id: &str,
    friend_id: i32,
) -> Result<Vec<FriendActivity>, StoreError> {
    // Scope through the friend: a foreign friend id yields an empty set
    let owned = friend_is_owned(conn, user_id, friend_id).await?;
    if !owned {
        return Ok(Vec::new());
    }

    let rows = friend_activities::table
        .filter(friend_activities::friend_id.eq(friend_id))
        .order(friend_activities::activity_id.asc())
        .load::<FriendActivity>(conn)
        .await?;
    Ok(rows)
}

/// Replace the stored rating set for a friend with `desired`.
///
/// Afterward exactly one row exists per desired (friend, activity) pair and
/// no stale rows remain. A friend id not owned by the user is a silent no-op.
pub async fn set_friend_ratings(
    conn: &mut DbConnection,
    user_id: &str,
    friend_id: i32,
    desired: &[RatingEntry],
) -> Result<(), StoreError> {
    let owned = friend_is_owned(conn, user_id, friend_id).await?;
    if !owned {
        debug!("Skipping rating replacement for unowned friend {}", friend_id);
        return Ok(());
    }

    let existing = friend_activities::table
        .filter(friend_activities::friend_id.eq(friend_id))
        .load::<FriendActivity>(conn)
        .await?;

    let plan = plan_reconcile(&existing, desired);
    debug!(
        "Reconciling ratings for friend {}: {} deletes, {} updates, {} inserts",
        friend_id,
        plan.delete_row_ids.len(),
        plan.updates.len(),
        plan.inserts.len()
    );

    for row_id in &plan.delete_row_ids {
        diesel::delete(friend_activities::table.filter(friend_activities::id.eq(row_id)))
            .execute(conn)
            .await?;
    }

    for (row_id, rating) in &plan.updates {
        diesel::update(friend_activities::table.filter(friend_activities::id.eq(row_id)))
            .set(friend_activities::rating.eq(rating))
            .execute(conn)
            .await?;
    }

    for (activity_id, rating) in &plan.inserts {
        let new_row = NewFriendActivity {
            friend_id,
            activity_id: *activity_id,
            rating: *rating,
        };
        diesel::insert_into(friend_activities::table)
            .values(&new_row)
            .execute(conn)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i32, activity_id: i32, rating: i32) -> FriendActivity {
        FriendActivity {
            id,
            friend_id: 1,
            activity_id,
            rating,
        }
    }

    fn entry(activity_id: i32, rating: i32) -> RatingEntry {
        RatingEntry {
            activity_id,
            rating,
        }
    }

    /// Apply a plan to an in-memory row set, mimicking what the store writes.
    fn apply(existing: &[FriendActivity], plan: &ReconcilePlan) -> Vec<FriendActivity> {
        let mut next_id = existing.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let mut rows: Vec<FriendActivity> = existing
            .iter()
            .filter(|r| !plan.delete_row_ids.contains(&r.id))
            .cloned()
            .collect();
        for (row_id, rating) in &plan.updates {
            if let Some(r) = rows.iter_mut().find(|r| r.id == *row_id) {
                r.rating = *rating;
            }
        }
        for (activity_id, rating) in &plan.inserts {
            rows.push(row(next_id, *activity_id, *rating));
            next_id += 1;
        }
        rows
    }

    #[test]
    fn deletes_rows_absent_from_desired_set() {
        let existing = vec![row(10, 1, 3), row(11, 2, 5)];
        let plan = plan_reconcile(&existing, &[entry(2, 4)]);
        assert_eq!(plan.delete_row_ids, vec![10]);
        assert_eq!(plan.updates, vec![(11, 4)]);
        assert!(plan.inserts.is_empty());
    }

    #[test]
    fn inserts_pairs_with_no_existing_row() {
        let plan = plan_reconcile(&[], &[entry(7, 2), entry(8, 5)]);
        assert!(plan.delete_row_ids.is_empty());
        assert!(plan.updates.is_empty());
        assert_eq!(plan.inserts, vec![(7, 2), (8, 5)]);
    }

    #[test]
    fn empty_desired_list_clears_the_set() {
        let existing = vec![row(1, 1, 1), row(2, 2, 2)];
        let plan = plan_reconcile(&existing, &[]);
        assert_eq!(plan.delete_row_ids, vec![1, 2]);
        assert!(apply(&existing, &plan).is_empty());
    }

    #[test]
    fn duplicate_desired_pairs_collapse_to_last_occurrence() {
        let plan = plan_reconcile(&[], &[entry(3, 1), entry(3, 5)]);
        assert_eq!(plan.inserts, vec![(3, 5)]);

        let existing = vec![row(9, 3, 2)];
        let plan = plan_reconcile(&existing, &[entry(3, 1), entry(3, 4)]);
        assert_eq!(plan.updates, vec![(9, 4)]);
        assert!(plan.inserts.is_empty());
    }

    #[test]
    fn reconciliation_is_idempotent() {
        let desired = vec![entry(1, 5), entry(3, 2), entry(4, 1)];
        let existing = vec![row(1, 1, 1), row(2, 2, 4)];

        let first = plan_reconcile(&existing, &desired);
        let after_first = apply(&existing, &first);

        let second = plan_reconcile(&after_first, &desired);
        let after_second = apply(&after_first, &second);

        // Second pass has nothing left to delete or insert
        assert!(second.delete_row_ids.is_empty());
        assert!(second.inserts.is_empty());

        let set =
            |rows: &[FriendActivity]| -> std::collections::BTreeMap<i32, i32> {
                rows.iter().map(|r| (r.activity_id, r.rating)).collect()
            };
        assert_eq!(set(&after_first), set(&after_second));
        assert_eq!(
            set(&after_first),
            desired.iter().map(|e| (e.activity_id, e.rating)).collect()
        );
    }
}
