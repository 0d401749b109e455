// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use crate::schema::friend_activities;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A rating of one friend against one activity. At most one row exists per
/// (friend_id, activity_id) pair, maintained by the write path rather than a
/// storage-level unique constraint.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = friend_activities)]
pub struct FriendActivity {
    pub id: i32,
    pub friend_id: i32,
    pub activity_id: i32,
    /// 1-5
    pub rating: i32,
}

/// DTO for inserting a rating row
#[derive(Debug, Insertable, Serialize, Deserialize)]
#[diesel(table_name = friend_activities)]
pub struct NewFriendActivity {
    pub friend_id: i32,
    pub activity_id: i32,
    pub rating: i32,
}
