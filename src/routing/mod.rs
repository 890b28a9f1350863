//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     (pattern, handler) pairs, in declaration order
//!     → pattern.rs (anchored expression + segment list per pattern)
//!     → table.rs (per-route matchers + combined alternation matcher)
//!     → router.rs (arity check, freeze as immutable Router)
//!
//! URL Resolution:
//!     URL
//!     → router.rs (split at '#', keep hash path)
//!     → table.rs (combined match → route index → per-route re-match)
//!     → router.rs (convert parameters by declared kind)
//!     → handler.rs (positional invocation)
//!     → Return: handler result or explicit failure
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - First declared match wins
//! - Deterministic: same input always matches same route with same params

pub mod error;
pub mod handler;
pub mod params;
pub mod pattern;
pub mod router;
pub mod table;

pub use error::{ResolveError, RouterError};
pub use handler::{BoxedHandler, FromParam, Handler};
pub use params::{Param, ParamValue, Params};
pub use pattern::{compile, CompiledPattern, ParamKind, PatternError, Segment};
pub use router::{split_fragment, Router, RouterBuilder};
pub use table::{RouteMatch, RouteTable};
