//! TUI application module
//!
//! Contains the navigation shell, the terminal user interface components,
//! screen management and the application controller.

pub mod app;
pub mod screens;
pub mod shell;
pub mod state;
pub mod tui;
pub mod widgets;

pub use app::{App, Session};
pub use screens::{ConfigScreen, EntryScreen, ExportScreen};
pub use shell::NavigationShell;
pub use state::{NavigationAction, Screen, StateManager};
pub use tui::Tui;
