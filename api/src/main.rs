//! Scheduling API Server
//!
//! Patient registry for the scheduling backend.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Json, Router};
use sea_orm::{ConnectOptions, Database};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{ensure_schema, PostgresPatientRepository};
use app::PatientService;
use config::Config;
use domain::ports::PatientRepository;
use handlers::PatientMapper;

/// Application state shared across all handlers
///
/// Generic over the repository so the router can run against any adapter.
pub struct AppState<PR>
where
    PR: PatientRepository,
{
    pub patient_service: Arc<PatientService<PR>>,
    pub patient_mapper: PatientMapper,
}

impl<PR> AppState<PR>
where
    PR: PatientRepository,
{
    pub fn new(patient_service: Arc<PatientService<PR>>, patient_mapper: PatientMapper) -> Self {
        Self {
            patient_service,
            patient_mapper,
        }
    }
}

impl<PR> Clone for AppState<PR>
where
    PR: PatientRepository,
{
    fn clone(&self) -> Self {
        Self {
            patient_service: self.patient_service.clone(),
            patient_mapper: self.patient_mapper,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router
///
/// Patient routes are mounted under `base_path` (empty for the root);
/// the health check always lives at `/health`.
pub fn build_router<PR>(state: AppState<PR>, base_path: &str) -> Router
where
    PR: PatientRepository + 'static,
{
    let patient_routes = Router::new()
        .route(
            "/patient",
            get(handlers::list_patients::<PR>).post(handlers::create_patient::<PR>),
        )
        .route(
            "/patient/:id",
            get(handlers::get_patient_by_id::<PR>)
                .put(handlers::update_patient::<PR>)
                .delete(handlers::delete_patient::<PR>),
        );

    let api = if base_path.is_empty() {
        patient_routes
    } else {
        Router::new().nest(base_path, patient_routes)
    };

    Router::new()
        // Health check
        .route("/health", get(health))
        .merge(api)
        // Middleware
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,scheduling_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting scheduling API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.database_max_connections)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;
    ensure_schema(&db)
        .await
        .context("Failed to prepare database schema")?;
    tracing::info!("Database connected");

    // Create adapters
    let patient_repo = Arc::new(PostgresPatientRepository::new(db));

    // Create application services
    let patient_service = Arc::new(PatientService::new(patient_repo));

    // Create app state
    let state = AppState::new(patient_service, PatientMapper::new());

    let app = build_router(state, &config.api_base_path);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
