//! Reusable widgets.
//!
//! Stateful widgets keep their state in [`State`](crate::State) handles, so
//! a clone captured by an event handler mutates the same widget the page
//! renders. Each exposes `build(registry, ..)` returning its element.

mod alert;
mod button;
mod collapsible;
mod debug_log;
mod dialog;
mod hide_show;
mod progress;
mod spinner;
mod switch;

pub use alert::{Alert, AlertKind};
pub use button::Button;
pub use collapsible::Collapsible;
pub use debug_log::DebugLog;
pub use dialog::{AlertDialog, PasswordDialog};
pub use hide_show::HideShow;
pub use progress::ProgressBar;
pub use spinner::Spinner;
pub use switch::Switch;
