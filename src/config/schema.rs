//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration for the health endpoint adapter.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HealthConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Endpoint route paths.
    pub endpoint: EndpointConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Route paths for the three categories.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub health_path: String,
    pub live_path: String,
    pub ready_path: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            health_path: "/health".to_string(),
            live_path: "/health/live".to_string(),
            ready_path: "/health/ready".to_string(),
        }
    }
}
