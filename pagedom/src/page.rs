//! Page: the root of a session's display tree.
//!
//! A page owns one root [`Component`]. Calling [`Page::update`] re-renders
//! that component into a fresh [`Element`] tree, swaps in the handlers it
//! registered, and publishes the result as a [`Frame`] on a watch channel.
//! Whatever sits on the other end of the channel (a websocket, a test) sees
//! every flush in order; intermediate frames may be skipped by slow readers,
//! the latest frame is never lost.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, trace, warn};
use tokio::sync::watch;

use crate::element::{find_element, Element};
use crate::event::{Event, EventKind};
use crate::handler::{HandlerError, HandlerRegistry};

/// Something that renders into the display tree.
pub trait Component: Send + Sync {
    /// Build this component's element tree, registering event handlers.
    ///
    /// Element ids must be stable across renders so that events produced
    /// against one frame can be dispatched after the next.
    fn render(&self, registry: &HandlerRegistry) -> Element;
}

impl<C: Component + ?Sized> Component for Arc<C> {
    fn render(&self, registry: &HandlerRegistry) -> Element {
        (**self).render(registry)
    }
}

/// A rendered snapshot of the page.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Monotonic frame number, starting at 1 for the initial render.
    pub number: u64,
    pub root: Arc<Element>,
}

impl Frame {
    /// Look up an element in this frame.
    pub fn find(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }
}

/// Errors that can occur while dispatching an event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// No handler registered for the target and event kind.
    #[error("no '{kind}' handler registered for element '{target}'")]
    NoHandler { target: String, kind: EventKind },

    /// The target element is disabled.
    #[error("element '{0}' is disabled")]
    Disabled(String),

    /// The handler itself failed.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

struct PageInner {
    session_id: String,
    root: Box<dyn Component>,
    registry: HandlerRegistry,
    frames: AtomicU64,
    frame_tx: watch::Sender<Frame>,
}

/// Handle to a page. Cheap to clone; all clones share the same session.
#[derive(Clone)]
pub struct Page {
    inner: Arc<PageInner>,
}

impl Page {
    /// Create a page for a new session and render it once.
    pub fn new(root: impl Component + 'static) -> Self {
        Self::with_session(root, uuid::Uuid::new_v4().to_string())
    }

    /// Create a page for the given session id and render it once.
    pub fn with_session(root: impl Component + 'static, session_id: impl Into<String>) -> Self {
        let (frame_tx, _) = watch::channel(Frame {
            number: 0,
            root: Arc::new(Element::div()),
        });
        let page = Self {
            inner: Arc::new(PageInner {
                session_id: session_id.into(),
                root: Box::new(root),
                registry: HandlerRegistry::new(),
                frames: AtomicU64::new(0),
                frame_tx,
            }),
        };
        debug!("Page opened for session {}", page.inner.session_id);
        page.update();
        page
    }

    pub fn session_id(&self) -> &str {
        &self.inner.session_id
    }

    /// Re-render the root component and flush the frame to subscribers.
    pub fn update(&self) -> Frame {
        let registry = HandlerRegistry::new();
        let root = self.inner.root.render(&registry);
        self.inner.registry.replace_with(&registry);

        let number = self.inner.frames.fetch_add(1, Ordering::SeqCst) + 1;
        let frame = Frame {
            number,
            root: Arc::new(root),
        };
        trace!(
            "Page {} flushed frame {} ({} handlers)",
            self.inner.session_id,
            number,
            registry.len()
        );
        self.inner.frame_tx.send_replace(frame.clone());
        frame
    }

    /// The most recently flushed frame.
    pub fn frame(&self) -> Frame {
        self.inner.frame_tx.borrow().clone()
    }

    /// Subscribe to flushed frames.
    pub fn subscribe(&self) -> watch::Receiver<Frame> {
        self.inner.frame_tx.subscribe()
    }

    /// Handlers registered by the latest render.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.inner.registry
    }

    /// Deliver an event to its registered handler.
    ///
    /// The event is stamped with this page's session id. After the handler
    /// returns the page is updated, whether the handler succeeded or not, and
    /// the handler's error (if any) is returned to the caller unchanged.
    pub async fn dispatch(&self, event: Event) -> Result<(), DispatchError> {
        let event = event.with_session(self.inner.session_id.clone());

        if self
            .frame()
            .find(&event.target)
            .is_some_and(|el| el.disabled)
        {
            debug!("Dropping {} on disabled element {}", event.kind, event.target);
            return Err(DispatchError::Disabled(event.target));
        }

        let Some(handler) = self.inner.registry.get(&event.target, event.kind) else {
            warn!("No {} handler for element {}", event.kind, event.target);
            return Err(DispatchError::NoHandler {
                target: event.target,
                kind: event.kind,
            });
        };

        debug!("Dispatching {} to {}", event.kind, event.target);
        let result = handler(event, self.clone()).await;
        self.update();
        result.map_err(DispatchError::from)
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("session_id", &self.inner.session_id)
            .field("frames", &self.inner.frames.load(Ordering::SeqCst))
            .finish()
    }
}
