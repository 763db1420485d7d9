//! Configuration for the endpoint adapter.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, semantic checks)
//!     → HealthConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Every field has a default so an empty document is a valid config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{EndpointConfig, HealthConfig, ListenerConfig};
