//! Startup-complete signal types.

use std::fmt;
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use crate::listener::ReadinessListener;

/// Identity token of an application context.
///
/// A startup event carries the token of the context that finished
/// initializing; a listener only acts on events matching its own token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(Uuid);

impl ContextId {
    /// Creates a fresh random context identity.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Signal that an application context completed initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupEvent {
    context: ContextId,
}

impl StartupEvent {
    /// Creates a startup event for the given context.
    #[must_use]
    pub const fn new(context: ContextId) -> Self {
        Self { context }
    }

    /// The originating context of this event.
    #[must_use]
    pub const fn context(&self) -> ContextId {
        self.context
    }
}

/// Subscribes a listener to a broadcast stream of startup events.
///
/// The spawned task delivers every received event to the listener, which
/// ignores events for unrelated contexts. The task exits when the channel
/// closes.
pub fn listen(
    listener: Arc<ReadinessListener>,
    mut events: broadcast::Receiver<StartupEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => listener.on_startup_complete(&event).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!("startup event receiver lagged, skipped {} events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
