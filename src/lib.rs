pub mod api;
pub mod auth;
pub mod calendar;
pub mod config;
pub mod db;
pub mod error;
pub mod mailer;
pub mod models;
pub mod photos;
pub mod places;
pub mod schema;
pub mod store;

#[macro_use]
extern crate diesel;
