//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing, events, config
//!     → tracing macros (structured fields: route, pattern, url)
//!     → logging.rs subscriber (stderr, human-readable or JSON)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; the binary installs the subscriber
//! - Resolution failures are debug-level, table builds info-level
//! - Stdout stays free for command output

pub mod logging;
