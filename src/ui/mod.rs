//! Terminal user interface for the dev hub.
//!
//! Contains the application state, the sidebar selectors, markdown
//! rendering, event handling and terminal lifecycle management.
mod app;
mod event;
mod guard;
mod home;
pub mod logging;
pub mod markdown;
mod sidebar;

pub use app::{App, AppMode};
pub use event::{Event, EventHandler};
pub use guard::{TerminalGuard, Tui, init_panic_hook, init_tui};
pub use sidebar::Selector;
