//! Shared utilities for endpoint integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use health_registry::{HealthConfig, HealthRegistry, HealthServer, StaticProbeSource};

/// Install a test subscriber once so failures come with log context.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "health_registry=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Start a server over the given source in explicit-lifecycle mode
/// (population happens at startup) and return its address.
pub async fn serve(source: StaticProbeSource) -> SocketAddr {
    init_tracing();
    let registry = Arc::new(HealthRegistry::new(source));
    let server = HealthServer::new(HealthConfig::default(), registry);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    // Let startup population finish before the first request.
    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}

/// Start a server in lazy mode: routes only, population deferred to the
/// first request.
#[allow(dead_code)]
pub async fn serve_lazy(registry: Arc<HealthRegistry>) -> SocketAddr {
    init_tracing();
    let server = HealthServer::new(HealthConfig::default(), registry);
    let router = server.router();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}

/// GET a path and return (status, parsed JSON body if any).
pub async fn get_json(addr: SocketAddr, path: &str) -> (u16, Option<serde_json::Value>) {
    let response = reqwest::get(format!("http://{addr}{path}")).await.unwrap();
    let status = response.status().as_u16();
    let body = response.text().await.unwrap();
    (status, serde_json::from_str(&body).ok())
}
