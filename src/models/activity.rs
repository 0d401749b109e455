// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use crate::schema::activities;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A user-defined activity tag that friends can be rated against (1-5)
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = activities)]
pub struct Activity {
    pub id: i32,
    pub user_id: String,
    pub name: String,
    pub icon: Option<String>,
    pub is_default: bool,
    pub sort_order: i32,
}

/// DTO for creating a new activity
#[derive(Debug, Insertable, Serialize, Deserialize)]
#[diesel(table_name = activities)]
pub struct NewActivity {
    pub user_id: String,
    pub name: String,
    pub icon: Option<String>,
    pub is_default: bool,
    pub sort_order: i32,
}

#[derive(Debug, Default, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = activities)]
pub struct UpdateActivity {
    pub name: Option<String>,
    pub icon: Option<String>,
}
