//! Main application controller
//!
//! [`Session`] holds everything the screens act on and applies key
//! actions to it; [`App`] adds the terminal and the render loop.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    app::{
        screens::{ConfigCommand, ConfigScreen, EntryCommand, EntryScreen, ExportCommand, ExportScreen},
        shell::NavigationShell,
        state::{NavigationAction, Screen, StateManager},
        tui::Tui,
        widgets::render_notice,
    },
    config::Settings,
    entry::EntryRecorder,
    error::{self, Notice},
    export::{self, CommandShare, RevealShare, ShareSink},
    util::{Clock, SystemClock},
    RelcheckError, Result,
};

/// Session state driven by key actions, independent of the terminal
pub struct Session {
    shell: NavigationShell,
    recorder: EntryRecorder,
    entry_screen: EntryScreen,
    config_screen: ConfigScreen,
    export_screen: ExportScreen,
    notice: Option<Notice>,
    sink: Box<dyn ShareSink>,
    export_dir: PathBuf,
}

impl Session {
    /// Session seeded from settings
    pub fn new(
        settings: &Settings,
        clock: Box<dyn Clock>,
        sink: Box<dyn ShareSink>,
        export_dir: PathBuf,
    ) -> Self {
        let shell = NavigationShell::with_rooms(settings.initial_rooms());
        let recorder = EntryRecorder::new(clock, shell.selection());
        Self {
            shell,
            recorder,
            entry_screen: EntryScreen::new(),
            config_screen: ConfigScreen::new(),
            export_screen: ExportScreen::new(),
            notice: None,
            sink,
            export_dir,
        }
    }

    /// Session with the system clock and the configured share sink
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let sink: Box<dyn ShareSink> = match settings
            .share_command
            .as_deref()
            .and_then(CommandShare::from_command_line)
        {
            Some(command) => Box::new(command),
            None => Box::new(RevealShare),
        };
        let clock = Box::new(SystemClock::new(settings.time_format.clone()));
        Ok(Self::new(settings, clock, sink, settings.resolved_export_dir()?))
    }

    pub fn shell(&self) -> &NavigationShell {
        &self.shell
    }

    pub fn recorder(&self) -> &EntryRecorder {
        &self.recorder
    }

    pub fn export_screen(&self) -> &ExportScreen {
        &self.export_screen
    }

    pub fn config_screen(&self) -> &ConfigScreen {
        &self.config_screen
    }

    pub fn entry_screen(&self) -> &EntryScreen {
        &self.entry_screen
    }

    /// Notice currently blocking input
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn should_quit(&self) -> bool {
        self.shell.should_quit()
    }

    fn show(&mut self, notice: Notice) {
        warn!(title = %notice.title, message = %notice.message, "notice shown");
        self.notice = Some(notice);
    }

    fn show_error(&mut self, err: &RelcheckError) {
        self.show(error::notice_for(err));
    }

    /// Apply one key action.
    ///
    /// While a notice is open, any key only dismisses it. The recorder
    /// observes the shell selection after every action.
    pub async fn handle_action(&mut self, action: NavigationAction) {
        if self.notice.take().is_some() {
            debug!("notice dismissed");
            return;
        }
        if action == NavigationAction::Quit {
            self.shell.quit();
            return;
        }

        match self.shell.screen() {
            Screen::Entry => self.handle_entry(action),
            Screen::Configuration => self.handle_configuration(action),
            Screen::Export => self.handle_export(action).await,
        }
        self.recorder.sync(&self.shell.selection());
    }

    fn handle_entry(&mut self, action: NavigationAction) {
        match self.entry_screen.handle(action, self.recorder.working()) {
            EntryCommand::CycleRoom { forward } => self.shell.cycle_room(forward),
            EntryCommand::PreviousTester => self.shell.previous_tester(),
            EntryCommand::NextTester => self.shell.next_tester(),
            EntryCommand::SetField(field, value) => {
                if !self.recorder.set_field(field, value) {
                    debug!(?field, "field is read-only for the last tester");
                }
            }
            EntryCommand::CycleTitle { forward } => {
                self.recorder.cycle_other_title(forward);
            }
            EntryCommand::Save => {
                let record = self.recorder.save();
                let summary = record.summary();
                info!(record = %summary, "entry saved");
                self.shell.record(record);
                self.entry_screen.set_status(format!("Saved {}", summary));
            }
            EntryCommand::OpenConfiguration => {
                self.shell.open_configuration();
                self.config_screen.reset();
            }
            EntryCommand::OpenExport => {
                self.shell.open_export();
                self.export_screen.reset();
            }
            EntryCommand::Back => self.shell.back(),
            EntryCommand::Quit => self.shell.quit(),
            EntryCommand::None => {}
        }
    }

    fn handle_configuration(&mut self, action: NavigationAction) {
        match self.config_screen.handle(action, self.shell.store()) {
            ConfigCommand::SelectRoom(room) => self.shell.store_mut().select_room(&room),
            ConfigCommand::AddRoom(name) => match self.shell.store_mut().add_room(&name) {
                Ok(()) => self.config_screen.room_added(),
                Err(err) => self.show_error(&err),
            },
            ConfigCommand::DeleteRoom(room) => {
                if let Err(err) = self.shell.store_mut().delete_room(&room) {
                    self.show_error(&err);
                }
            }
            ConfigCommand::Append(field, room) => {
                self.shell.store_mut().stage_append(field, &room);
            }
            ConfigCommand::Edit {
                field,
                room,
                index,
                value,
            } => self.shell.store_mut().stage_edit(field, &room, index, &value),
            ConfigCommand::Save => self.shell.save_configuration(),
            ConfigCommand::Back => self.shell.back(),
            ConfigCommand::None => {}
        }
    }

    async fn handle_export(&mut self, action: NavigationAction) {
        match self.export_screen.handle(action) {
            ExportCommand::Filter { start, end } => {
                match export::filter(self.shell.records(), Some(start.as_str()), Some(end.as_str())) {
                    Ok(outcome) => {
                        let empty_match = outcome.is_empty_match();
                        self.export_screen
                            .set_status(format!("{} entries selected", outcome.records.len()));
                        self.export_screen.set_filtered(outcome.records);
                        if empty_match {
                            self.show(error::no_entries_in_range());
                        }
                    }
                    Err(err) => self.show_error(&err),
                }
            }
            ExportCommand::Export => {
                let result = export::export_records(
                    self.export_screen.filtered(),
                    &self.export_dir,
                    self.sink.as_ref(),
                )
                .await;
                match result {
                    Ok(path) => {
                        info!(path = %path.display(), "checklist exported");
                        self.export_screen
                            .set_status(format!("Exported to {}", path.display()));
                    }
                    Err(err) => self.show_error(&err),
                }
            }
            ExportCommand::Back => self.shell.back(),
            ExportCommand::None => {}
        }
    }

    /// Draw the visible screen and any open notice
    pub fn render(&mut self, f: &mut ratatui::Frame) {
        match self.shell.screen() {
            Screen::Entry => self.entry_screen.render(f, &self.shell, &self.recorder),
            Screen::Configuration => self.config_screen.render(f, self.shell.store()),
            Screen::Export => self.export_screen.render(f, self.shell.records().len()),
        }
        if let Some(notice) = &self.notice {
            render_notice(f, notice);
        }
    }
}

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    session: Session,
}

impl App {
    /// Create a new application instance
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            tui: Tui::new(settings.tick_rate)?,
            session: Session::from_settings(settings)?,
        })
    }

    /// Initialize the terminal
    pub fn init(&mut self) -> Result<()> {
        self.tui.init()
    }

    /// Restore the terminal
    pub fn restore(&mut self) -> Result<()> {
        self.tui.restore()
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        info!(export_dir = %self.session.export_dir().display(), "session started");
        while !self.session.should_quit() {
            self.draw()?;
            if let Some(key) = self.tui.next_key()? {
                let action = StateManager::key_to_navigation(key);
                self.session.handle_action(action).await;
            }
        }
        info!(records = self.session.shell().records().len(), "session ended");
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let session = &mut self.session;
        self.tui.draw(|f| session.render(f))
    }
}
