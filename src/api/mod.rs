mod handlers;

use crate::config::Config;
use crate::db::Database;
use anyhow::Result;
use axum::{
    routing::{get, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Start the API server
pub async fn start_api_server(db: Arc<Database>) -> Result<()> {
    let config = Config::get();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Create router with all routes
    let app = Router::new()
        // General routes
        .route("/api/health", get(handlers::health::health_check))
        // Photo serving
        .route("/api/photos/:filename", get(handlers::photos::get_photo))
        // Google integrations
        .route("/api/places", get(handlers::places::places_proxy))
        .route(
            "/api/google-scope-upgrade",
            get(handlers::google::google_scope_upgrade),
        )
        // Friends
        .route(
            "/api/friends",
            get(handlers::friends::list_friends).post(handlers::friends::create_friend),
        )
        .route(
            "/api/friends/:id",
            get(handlers::friends::get_friend)
                .put(handlers::friends::update_friend)
                .delete(handlers::friends::delete_friend),
        )
        .route(
            "/api/friends/:id/photo",
            put(handlers::friends::upload_photo).delete(handlers::friends::delete_photo),
        )
        .route(
            "/api/friends/:id/ratings",
            get(handlers::ratings::get_ratings).put(handlers::ratings::set_ratings),
        )
        // Activities
        .route(
            "/api/activities",
            get(handlers::activities::list_activities)
                .post(handlers::activities::create_activity),
        )
        .route(
            "/api/activities/reorder",
            put(handlers::activities::reorder_activities),
        )
        .route(
            "/api/activities/:id",
            put(handlers::activities::update_activity)
                .delete(handlers::activities::delete_activity),
        )
        // Closeness tiers
        .route(
            "/api/closeness-tiers",
            get(handlers::closeness_tiers::list_tiers).post(handlers::closeness_tiers::create_tier),
        )
        .route(
            "/api/closeness-tiers/reorder",
            put(handlers::closeness_tiers::reorder_tiers),
        )
        .route(
            "/api/closeness-tiers/:id",
            put(handlers::closeness_tiers::update_tier)
                .delete(handlers::closeness_tiers::delete_tier),
        )
        // Notes
        .route(
            "/api/notes",
            get(handlers::notes::list_notes).post(handlers::notes::create_note),
        )
        .route(
            "/api/notes/:id",
            put(handlers::notes::update_note).delete(handlers::notes::delete_note),
        )
        // Events
        .route(
            "/api/events",
            get(handlers::events::list_events).post(handlers::events::create_event),
        )
        .route(
            "/api/events/:id",
            get(handlers::events::get_event)
                .put(handlers::events::update_event)
                .delete(handlers::events::delete_event),
        )
        .route(
            "/api/events/:id/calendar",
            get(handlers::events::get_calendar_payload),
        )
        .route(
            "/api/events/:id/invitations",
            axum::routing::post(handlers::events::invite_friend),
        )
        .route(
            "/api/events/:id/invitations/:friend_id",
            put(handlers::events::set_invitation_status)
                .delete(handlers::events::remove_invitation),
        )
        // Add state and middleware
        .with_state(db.clone())
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Get bind address
    let addr = format!("{}:{}", config.server.host, config.server.port).parse::<SocketAddr>()?;

    // Start server
    info!("Starting API server on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
