pub mod element;
pub mod escape;
pub mod event;
pub mod handler;
pub mod page;

pub use element::{find_all, find_element, find_element_mut, generate_id, Content, Element};
pub use escape::escape_markup;
pub use event::{Event, EventKind};
pub use handler::{handler, Handler, HandlerError, HandlerFuture, HandlerRegistry};
pub use page::{Component, DispatchError, Frame, Page};
