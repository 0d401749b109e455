// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

// Import diesel table macros
use diesel::allow_tables_to_appear_in_same_query;
use diesel::table;

// Session table owned by the external auth provider; this service only reads it
table! {
    sessions (token) {
        token -> Varchar,
        user_id -> Varchar,
        expires_at -> Timestamp,
    }
}

table! {
    closeness_tiers (id) {
        id -> Integer,
        user_id -> Varchar,
        label -> Varchar,
        sort_order -> Integer,
        color -> Nullable<Varchar>,
    }
}

table! {
    friends (id) {
        id -> Integer,
        user_id -> Varchar,
        name -> Varchar,
        closeness_tier_id -> Nullable<Integer>,
        birthday -> Nullable<Date>,
        location -> Nullable<Varchar>,
        email -> Nullable<Varchar>,
        has_photo -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    activities (id) {
        id -> Integer,
        user_id -> Varchar,
        name -> Varchar,
        icon -> Nullable<Varchar>,
        is_default -> Bool,
        sort_order -> Integer,
    }
}

table! {
    friend_activities (id) {
        id -> Integer,
        friend_id -> Integer,
        activity_id -> Integer,
        rating -> Integer,
    }
}

table! {
    events (id) {
        id -> Integer,
        user_id -> Varchar,
        name -> Varchar,
        activity_id -> Nullable<Integer>,
        event_date -> Nullable<Date>,
        event_time -> Nullable<Varchar>,
        location -> Nullable<Varchar>,
        created_at -> Timestamp,
    }
}

table! {
    event_invitations (id) {
        id -> Integer,
        event_id -> Integer,
        friend_id -> Integer,
        status -> Varchar,
    }
}

table! {
    notes (id) {
        id -> Integer,
        user_id -> Varchar,
        content -> Text,
        note_type -> Varchar,
        friend_id -> Nullable<Integer>,
        event_id -> Nullable<Integer>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

// Allow joining the tables if needed
allow_tables_to_appear_in_same_query!(
    sessions,
    closeness_tiers,
    friends,
    activities,
    friend_activities,
    events,
    event_invitations,
    notes,
);
