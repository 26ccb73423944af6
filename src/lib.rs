//! Dev Hub Library
//!
//! A terminal viewer for a fixed tree of markdown cheat sheets, grouped
//! into categories and books picked from a sidebar.
//!
//! # Modules
//!
//! - `catalog`: the known categories and books and their tabs
//! - `navigation`: the mutually exclusive selector state
//! - `resolver`: reads documents from the content root
//! - `assets`: optional profile image and résumé
//! - `ui`: terminal user interface components and event handling
pub mod assets;
pub mod catalog;
pub mod navigation;
pub mod resolver;
pub mod ui;

pub use catalog::{Book, Category, Tab};
pub use navigation::{NavigationState, View};
pub use resolver::ContentResolver;
pub use ui::logging;
pub use ui::{App, AppMode, Event, EventHandler, Selector};
pub use ui::{TerminalGuard, Tui, init_panic_hook, init_tui};
