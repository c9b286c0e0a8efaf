//! User API server
//!
//! HTTP CRUD service for the user resource, backed by embedded SQLite
//! through one of two interchangeable storage adapters.

mod config;
mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::StorageBackend;
use services::UserService;
use storage::{OrmUserStore, SqlUserStore};
use userapi_core::UserStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting user API server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let config = config::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, db={}, backend={:?}",
        config.bind_address, config.database_path, config.storage_backend
    );

    // Open the selected store; the rest of the app only sees the port
    let store: Arc<dyn UserStore> = match config.storage_backend {
        StorageBackend::Sql => Arc::new(
            SqlUserStore::connect(&config.database_path)
                .await
                .context("Failed to initialize SQL store")?,
        ),
        StorageBackend::Orm => Arc::new(
            OrmUserStore::connect(&config.database_path)
                .await
                .context("Failed to initialize ORM store")?,
        ),
    };
    info!("Storage initialized");

    // Initialize services
    let users = Arc::new(UserService::new(store));
    info!("Services initialized");

    let state = AppState { users };

    // Build router
    info!("Building HTTP router...");
    let app = app(state);

    // Start server
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server ready to accept connections");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // REST API routes
        .merge(api_routes())
        // Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            post(handlers::users::create)
                .get(handlers::users::list)
                .put(handlers::users::update),
        )
        .route(
            "/users/:id",
            get(handlers::users::get).delete(handlers::users::delete),
        )
}
