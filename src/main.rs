//! TaskTide Backend
//!
//! REST backend for the TaskTide student portal, serving in-memory demo data.

mod api;
mod config;
mod db;
mod errors;
mod models;
mod session;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use db::Repository;
use session::Session;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub session: Arc<Session>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting TaskTide Backend");
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Default role: {}", config.default_role.as_str());

    // Seed the in-memory store
    let repo = Arc::new(Repository::new(db::seed_tables()));
    let datastore = repo.get_datastore().await;
    tracing::info!(
        semesters = datastore.semesters.len(),
        units = datastore.units.len(),
        documents = datastore.documents.len(),
        groups = datastore.groups.len(),
        notifications = datastore.notifications.len(),
        "Seed data loaded"
    );

    let session = Arc::new(Session::new(repo.clone(), config.default_role).await);

    // Create application state
    let state = AppState {
        repo,
        session,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Datastore
        .route("/datastore", get(api::get_datastore))
        .route("/datastore/revision", get(api::get_revision))
        .route("/dashboard", get(api::get_dashboard))
        // Session
        .route("/session", get(api::get_session))
        .route("/session/role", put(api::set_role))
        // Semesters & units
        .route(
            "/semesters",
            get(api::list_semesters).post(api::create_semester),
        )
        .route("/semesters/{id}", get(api::get_semester))
        .route("/semesters/{id}/units", get(api::list_units))
        .route(
            "/semesters/{id}/units/{unit_id}/documents",
            get(api::list_unit_documents),
        )
        .route(
            "/semesters/{id}/units/{unit_id}/groups",
            get(api::unit_room_groups),
        )
        .route("/units/{id}", get(api::get_unit))
        // Documents
        .route("/documents/{id}", get(api::get_document))
        // Groups
        .route("/groups", get(api::list_groups).post(api::create_group))
        .route("/groups/overview", get(api::group_overview))
        .route("/groups/{id}", get(api::get_group))
        .route("/groups/{id}/join", post(api::join_group))
        // Notifications
        .route(
            "/notifications",
            get(api::list_notifications).post(api::create_notification),
        )
        .route("/notifications/unread-count", get(api::unread_count))
        .route("/notifications/read-all", put(api::mark_all_read))
        .route("/notifications/{id}/read", put(api::mark_read));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
