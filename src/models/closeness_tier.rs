// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

use crate::schema::closeness_tiers;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A ranking bucket for organizing friends ("best friend", "acquaintance", ...)
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = closeness_tiers)]
pub struct ClosenessTier {
    pub id: i32,
    pub user_id: String,
    pub label: String,
    /// 1-based position within the user's tier list
    pub sort_order: i32,
    pub color: Option<String>,
}

/// DTO for creating a new closeness tier
#[derive(Debug, Insertable, Serialize, Deserialize)]
#[diesel(table_name = closeness_tiers)]
pub struct NewClosenessTier {
    pub user_id: String,
    pub label: String,
    pub sort_order: i32,
    pub color: Option<String>,
}

#[derive(Debug, Default, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = closeness_tiers)]
pub struct UpdateClosenessTier {
    pub label: Option<String>,
    pub color: Option<String>,
}
