//! Fragment-change event source.

use thiserror::Error;
use tokio::sync::mpsc;

/// A change of the current URL's fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashChangeEvent {
    /// URL before the change, if one was set.
    pub old_url: Option<String>,
    /// Full URL including the new fragment.
    pub new_url: String,
}

/// Errors raised when emitting navigation events.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    /// The receiving side was dropped.
    #[error("navigation event source is closed")]
    Closed,
}

/// Create a connected navigator and event source.
pub fn channel() -> (Navigator, EventSource) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        Navigator { tx, current: None },
        EventSource { rx },
    )
}

/// Emits a [`HashChangeEvent`] whenever the fragment of the current URL changes.
#[derive(Debug)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<HashChangeEvent>,
    current: Option<String>,
}

impl Navigator {
    /// The URL most recently navigated to.
    pub fn current_url(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Navigate to `url`.
    ///
    /// Returns `Ok(false)` without emitting when the URL is unchanged.
    pub fn navigate(&mut self, url: impl Into<String>) -> Result<bool, EventError> {
        let new_url = url.into();
        if self.current.as_deref() == Some(new_url.as_str()) {
            return Ok(false);
        }

        let old_url = self.current.replace(new_url.clone());
        self.tx
            .send(HashChangeEvent { old_url, new_url })
            .map_err(|_| EventError::Closed)?;
        Ok(true)
    }

    /// Replace only the fragment of the current URL.
    pub fn set_hash(&mut self, hash: &str) -> Result<bool, EventError> {
        let prefix = self.current.as_deref().map(base).unwrap_or_default();
        let hash = hash.strip_prefix('#').unwrap_or(hash);
        let url = format!("{}#{}", prefix, hash);
        self.navigate(url)
    }
}

fn base(url: &str) -> &str {
    url.split_once('#').map_or(url, |(base, _)| base)
}

/// Receiving side of the navigation channel.
#[derive(Debug)]
pub struct EventSource {
    rx: mpsc::UnboundedReceiver<HashChangeEvent>,
}

impl EventSource {
    /// Wait for the next event. `None` once every navigator is gone.
    pub async fn recv(&mut self) -> Option<HashChangeEvent> {
        self.rx.recv().await
    }

    /// Take an already-queued event without waiting.
    pub fn try_recv(&mut self) -> Option<HashChangeEvent> {
        self.rx.try_recv().ok()
    }
}
