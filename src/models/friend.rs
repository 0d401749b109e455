// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use crate::schema::friends;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = friends)]
pub struct Friend {
    pub id: i32,
    pub user_id: String,
    pub name: String,
    pub closeness_tier_id: Option<i32>,
    pub birthday: Option<NaiveDate>,
    pub location: Option<String>,
    pub email: Option<String>,
    /// Whether a photo file exists under the photo store for this friend
    pub has_photo: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// DTO for creating a new friend
#[derive(Debug, Insertable, Serialize, Deserialize)]
#[diesel(table_name = friends)]
pub struct NewFriend {
    pub user_id: String,
    pub name: String,
    pub closeness_tier_id: Option<i32>,
    pub birthday: Option<NaiveDate>,
    pub location: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub has_photo: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Default, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = friends)]
pub struct UpdateFriend {
    pub name: Option<String>,
    pub closeness_tier_id: Option<Option<i32>>,
    pub birthday: Option<Option<NaiveDate>>,
    pub location: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub has_photo: Option<bool>,
    pub updated_at: Option<NaiveDateTime>,
}
