//! Hashbang router
//!
//! Matches the fragment of a URL (`page#/sections/5`) against registered
//! path patterns and invokes the handler bound to the first matching one,
//! passing its parameters positionally.
//!
//! # Architecture Overview
//!
//! ```text
//!   navigation event           ┌──────────────────────────────────────────────┐
//!   ───────────────────────────┼─▶ events ──▶ routing::router ──▶ handler    │
//!   (Navigator → EventSource)  │                  │                           │
//!                              │                  ▼                           │
//!                              │            routing::table                    │
//!                              │     (combined match, per-route re-match)     │
//!                              │                  ▲                           │
//!                              │            routing::pattern                  │
//!                              │       (pattern → anchored expression)        │
//!                              │                                              │
//!                              │   config (TOML route files)  observability   │
//!                              └──────────────────────────────────────────────┘
//! ```
//!
//! Patterns are `/`-delimited; segments starting with `:` are parameters
//! matching `[0-9a-z_]+` case-insensitively, optionally typed as `:id:int`.
//! `/` matches only `/`; every other pattern accepts a trailing slash.
//! Overlapping patterns resolve to the one declared first.

// Core subsystems
pub mod events;
pub mod routing;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use events::{Dispatcher, HashChangeEvent, Navigator};
pub use routing::{ResolveError, Router, RouterBuilder, RouterError};
