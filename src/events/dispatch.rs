//! Event-driven dispatch loop.

use std::ops::Deref;

use crate::events::source::{EventSource, HashChangeEvent};
use crate::routing::{ResolveError, Router};

/// Outcome of dispatching one navigation event.
#[derive(Debug)]
pub struct Dispatch<R> {
    pub event: HashChangeEvent,
    pub outcome: Result<R, ResolveError>,
}

/// A router subscribed to an [`EventSource`].
///
/// Dereferences to the [`Router`], so direct resolution keeps working
/// after `init`.
#[derive(Debug)]
pub struct Dispatcher<R> {
    router: Router<R>,
    source: EventSource,
}

impl<R> Router<R> {
    /// Subscribe the router to `source`.
    pub fn init(self, source: EventSource) -> Dispatcher<R> {
        tracing::info!(routes = self.table().len(), "Listening for navigation events");
        Dispatcher {
            router: self,
            source,
        }
    }
}

impl<R> Dispatcher<R> {
    pub fn router(&self) -> &Router<R> {
        &self.router
    }

    /// Wait for the next event and resolve it to completion.
    ///
    /// Returns `None` once the source is closed.
    pub async fn dispatch_next(&mut self) -> Option<Dispatch<R>> {
        let event = self.source.recv().await?;
        let outcome = self.router.resolve(&event.new_url);

        if let Err(e) = &outcome {
            tracing::debug!(url = %event.new_url, error = %e, "Navigation not resolved");
        }

        Some(Dispatch { event, outcome })
    }

    /// Dispatch events until the source closes. Handler results are dropped.
    ///
    /// Returns the number of events that resolved to a handler.
    pub async fn run(mut self) -> usize {
        let mut handled = 0;
        while let Some(dispatch) = self.dispatch_next().await {
            if dispatch.outcome.is_ok() {
                handled += 1;
            }
        }
        tracing::info!(handled, "Navigation event source closed");
        handled
    }
}

impl<R> Deref for Dispatcher<R> {
    type Target = Router<R>;

    fn deref(&self) -> &Self::Target {
        &self.router
    }
}
