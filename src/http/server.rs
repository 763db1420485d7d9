//! Axum server exposing the health endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::aggregate;
use crate::check::Category;
use crate::config::HealthConfig;
use crate::error::{DiscoveryError, ShutdownError};
use crate::lifecycle::Lifecycle;
use crate::registry::HealthRegistry;

/// Errors terminating [`HealthServer::run`].
#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Shutdown(#[from] ShutdownError),
}

/// Application state injected into handlers.
#[derive(Clone)]
struct AppState {
    registry: Arc<HealthRegistry>,
}

/// HTTP server for the health endpoints.
pub struct HealthServer {
    router: Router,
    registry: Arc<HealthRegistry>,
    lifecycle: Lifecycle,
}

impl HealthServer {
    /// Create a new server over the given registry.
    pub fn new(config: HealthConfig, registry: Arc<HealthRegistry>) -> Self {
        let state = AppState {
            registry: registry.clone(),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            registry,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &HealthConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.endpoint.health_path, get(general_handler))
            .route(&config.endpoint.live_path, get(liveness_handler))
            .route(&config.endpoint.ready_path, get(readiness_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// The routes, for embedding into a host application's router.
    ///
    /// In this mode the registry populates lazily on the first request;
    /// the host drives shutdown through its own [`Lifecycle`].
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on the given listener.
    ///
    /// Populates the registry up front (fail-fast startup), serves until
    /// Ctrl+C, then releases owned probe resources. Release runs on every
    /// exit path, including serve failures and startup failures that
    /// tracked resources before aborting; when both serve and release
    /// fail, the serve error propagates and the release failure is logged.
    pub async fn run(self, listener: TcpListener) -> Result<(), ServeError> {
        let addr = listener.local_addr()?;
        if let Err(error) = self.lifecycle.start(&self.registry) {
            // A failed populate may have tracked resources before aborting.
            self.release_resources();
            return Err(error.into());
        }
        tracing::info!(address = %addr, "health server starting");

        let served = axum::serve(listener, self.router.clone())
            .with_graceful_shutdown(shutdown_signal())
            .await;

        match served {
            Ok(()) => {
                let released = self.lifecycle.stop(&self.registry);
                tracing::info!("health server stopped");
                released.map_err(Into::into)
            }
            Err(error) => {
                self.release_resources();
                Err(error.into())
            }
        }
    }

    /// Best-effort release on abnormal exit paths; the triggering error is
    /// what propagates, so release failures are only logged here.
    fn release_resources(&self) {
        if let Err(error) = self.lifecycle.stop(&self.registry) {
            tracing::error!(error = %error, "resource release failed during abnormal shutdown");
        }
    }
}

async fn general_handler(State(state): State<AppState>) -> Response {
    respond(&state, Category::General)
}

async fn liveness_handler(State(state): State<AppState>) -> Response {
    respond(&state, Category::Liveness)
}

async fn readiness_handler(State(state): State<AppState>) -> Response {
    respond(&state, Category::Readiness)
}

fn respond(state: &AppState, category: Category) -> Response {
    match aggregate::invoke(&state.registry, category) {
        Ok(result) => (result.http_status(), Json(result)).into_response(),
        Err(error) => {
            tracing::error!(category = %category, error = %error, "health registry unavailable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "health registry unavailable",
            )
                .into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
