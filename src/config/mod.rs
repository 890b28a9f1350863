//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → routes handed to the router builder in file order
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields except the route list have defaults
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::LoggingConfig;
pub use schema::RouteConfig;
pub use schema::RouterConfig;
