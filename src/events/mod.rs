//! Navigation event subsystem.
//!
//! # Data Flow
//! ```text
//! Host navigation (browser, CLI input, test)
//!     → source.rs Navigator (emit HashChangeEvent when the URL changes)
//!     → unbounded channel
//!     → source.rs EventSource (receive in order)
//!     → dispatch.rs Dispatcher (resolve each event to completion)
//! ```
//!
//! # Design Decisions
//! - One subscription per router, never unsubscribed
//! - Events are handled one at a time, in arrival order
//! - No queueing policy of our own: the channel preserves order

pub mod dispatch;
pub mod source;

pub use dispatch::{Dispatch, Dispatcher};
pub use source::{channel, EventError, EventSource, HashChangeEvent, Navigator};
