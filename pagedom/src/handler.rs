//! Event handlers and the registry that maps element events to them.
//!
//! Components register handlers while building their element tree. The
//! registry is cleared at the start of every render so handlers from a
//! previous frame never outlive the elements they were bound to.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

use futures::future::BoxFuture;

use crate::event::{Event, EventKind};
use crate::page::Page;

/// Error raised by an event handler.
///
/// The page does not swallow these: they propagate out of
/// [`Page::dispatch`] to the application layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    /// The handler ran and failed.
    #[error("handler failed: {0}")]
    Failed(String),

    /// The component the handler was bound to no longer exists.
    #[error("handler target detached: {0}")]
    Detached(String),
}

impl HandlerError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Future returned by a handler.
pub type HandlerFuture = BoxFuture<'static, Result<(), HandlerError>>;

/// A handler closure that receives the event and a handle to the page.
///
/// The closure captures whatever component state it needs at registration
/// time, so no lookup through the element tree is required on dispatch.
pub type Handler = Arc<dyn Fn(Event, Page) -> HandlerFuture + Send + Sync>;

/// Wrap an async closure as a [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Event, Page) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    Arc::new(move |event, page| Box::pin(f(event, page)))
}

/// Registry for element event handlers.
///
/// Maps (element_id, event kind) to handler closures.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: Arc<RwLock<HashMap<(String, EventKind), Handler>>>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an element event, replacing any previous one.
    pub fn register(&self, element_id: &str, kind: EventKind, handler: Handler) {
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        handlers.insert((element_id.to_string(), kind), handler);
    }

    /// Get a handler for an element event.
    pub fn get(&self, element_id: &str, kind: EventKind) -> Option<Handler> {
        self.handlers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&(element_id.to_string(), kind))
            .cloned()
    }

    /// Check whether a handler is registered for an element event.
    pub fn contains(&self, element_id: &str, kind: EventKind) -> bool {
        self.get(element_id, kind).is_some()
    }

    /// Clear all handlers.
    pub fn clear(&self) {
        self.handlers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    /// Replace this registry's handlers with the contents of `other`.
    pub(crate) fn replace_with(&self, other: &HandlerRegistry) {
        let fresh = other
            .handlers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        *self
            .handlers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = fresh;
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers
            .read()
            .map(|h| h.len())
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("HandlerRegistry")
            .field("handler_count", &count)
            .finish()
    }
}
