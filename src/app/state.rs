//! Application state management
//!
//! Handles screen transitions, navigation logic, and keyboard event processing
//! for the TUI application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Entry form for the current room and tester
    #[default]
    Entry,
    /// Room, tester and parameter title editor
    Configuration,
    /// Date filter and export
    Export,
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move focus up (arrow up)
    Up,
    /// Move focus down (arrow down)
    Down,
    /// Previous option of a picker (arrow left)
    Left,
    /// Next option of a picker (arrow right)
    Right,
    /// Next field (Tab)
    Next,
    /// Previous field (Shift+Tab)
    Previous,
    /// Confirm (Enter)
    Select,
    /// Go back/cancel (Esc)
    Back,
    /// Delete the last typed character (Backspace)
    Erase,
    /// Typed character
    Input(char),
    /// Save entry or configuration (Ctrl+S)
    Save,
    /// Add a blank row (Ctrl+N)
    Add,
    /// Delete the selected room (Ctrl+D)
    Delete,
    /// Export the filtered records (Ctrl+E)
    Export,
    /// Open the configuration screen (F2)
    OpenConfiguration,
    /// Open the export screen (F3)
    OpenExport,
    /// Previous tester (PageUp)
    PreviousTester,
    /// Next tester (PageDown)
    NextTester,
    /// Quit application (Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Screen state manager
#[derive(Debug)]
pub struct StateManager {
    current_screen: Screen,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager starting at the entry screen
    pub fn new() -> Self {
        Self {
            current_screen: Screen::Entry,
            should_quit: false,
        }
    }

    /// Get the visible screen
    pub fn current_screen(&self) -> Screen {
        self.current_screen
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Toggle the configuration screen; only reachable from the entry screen
    pub fn toggle_configuration(&mut self) {
        self.current_screen = match self.current_screen {
            Screen::Entry => Screen::Configuration,
            Screen::Configuration => Screen::Entry,
            Screen::Export => Screen::Export,
        };
    }

    /// Toggle the export screen; only reachable from the entry screen
    pub fn toggle_export(&mut self) {
        self.current_screen = match self.current_screen {
            Screen::Entry => Screen::Export,
            Screen::Export => Screen::Entry,
            Screen::Configuration => Screen::Configuration,
        };
    }

    /// Return to the entry screen, or quit when already there
    pub fn go_back(&mut self) {
        match self.current_screen {
            Screen::Entry => self.should_quit = true,
            Screen::Configuration | Screen::Export => self.current_screen = Screen::Entry,
        }
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => NavigationAction::Quit,
                KeyCode::Char('s') => NavigationAction::Save,
                KeyCode::Char('n') => NavigationAction::Add,
                KeyCode::Char('d') => NavigationAction::Delete,
                KeyCode::Char('e') => NavigationAction::Export,
                _ => NavigationAction::None,
            };
        }

        match key.code {
            KeyCode::Up => NavigationAction::Up,
            KeyCode::Down => NavigationAction::Down,
            KeyCode::Left => NavigationAction::Left,
            KeyCode::Right => NavigationAction::Right,
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    NavigationAction::Previous
                } else {
                    NavigationAction::Next
                }
            }
            KeyCode::BackTab => NavigationAction::Previous,
            KeyCode::Enter => NavigationAction::Select,
            KeyCode::Esc => NavigationAction::Back,
            KeyCode::Backspace => NavigationAction::Erase,
            KeyCode::F(2) => NavigationAction::OpenConfiguration,
            KeyCode::F(3) => NavigationAction::OpenExport,
            KeyCode::PageUp => NavigationAction::PreviousTester,
            KeyCode::PageDown => NavigationAction::NextTester,
            KeyCode::Char(c) => NavigationAction::Input(c),
            _ => NavigationAction::None,
        }
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}
