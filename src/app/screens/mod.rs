//! TUI screen components
//!
//! One component per shell screen. Screens own only view state (focus,
//! pending input) and translate key actions into commands for the app.

pub mod config;
pub mod entry;
pub mod export;

pub use config::{ConfigCommand, ConfigRow, ConfigScreen, ADD_ROOM_OPTION};
pub use entry::{EntryCommand, EntryRow, EntryScreen};
pub use export::{DateInput, ExportCommand, ExportScreen};
