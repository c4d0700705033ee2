pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::{Ladder, ReviewScheduler};

use crate::config::Config;
use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub scheduler: Arc<dyn ReviewScheduler>,
}

impl AppState {
    /// State using the default review ladder
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            scheduler: Arc::new(Ladder::default()),
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url, config.max_connections).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState::new(Arc::new(db));
    tracing::info!("Using review scheduler '{}'", state.scheduler.name());

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router with all learner and admin routes.
pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        // Collection routes
        .route("/collections", get(routes::collections::list))
        .route("/collections/import", post(routes::collections::import))
        .route(
            "/collections/:id",
            axum::routing::delete(routes::collections::delete),
        )
        .route(
            "/collections/:id/visibility",
            post(routes::collections::toggle_visibility),
        )
        .route(
            "/collections/:id/topics",
            get(routes::collections::topics).post(routes::collections::add_topic),
        )
        .route(
            "/collections/:id/topics/order",
            put(routes::collections::reorder_topics),
        )
        // Topic routes
        .route(
            "/topics/:id",
            get(routes::topics::get)
                .put(routes::topics::update)
                .delete(routes::topics::delete),
        )
        .route(
            "/topics/:id/words",
            get(routes::topics::words).post(routes::topics::add_word),
        )
        .route("/topics/:id/words/order", put(routes::topics::reorder_words))
        // Word routes
        .route(
            "/words/:id",
            get(routes::words::get)
                .put(routes::words::update)
                .delete(routes::words::delete),
        );

    Router::new()
        .route("/health", get(health_check))
        .route("/api/data", get(routes::learn::data))
        .route("/api/update_srs", post(routes::learn::update_srs))
        .nest("/api/admin", admin_routes)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
