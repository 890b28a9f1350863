//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from route files.

use serde::{Deserialize, Serialize};

/// Root configuration: the route table plus logging settings.
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [[routes]]
/// name = "home"
/// pattern = "/"
///
/// [[routes]]
/// name = "section"
/// pattern = "/sections/:section_id"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Route definitions, in precedence order.
    pub routes: Vec<RouteConfig>,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// One route of the table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for output and logs.
    pub name: String,

    /// Path pattern, e.g. `/sections/:section_id`.
    pub pattern: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter when `RUST_LOG` is unset.
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
