use std::path::PathBuf;

use chrono::NaiveDate;

use crate::{
    cli::{
        commands,
        core::{CliMode, CommandError, LoopControl},
        output,
        registry::{CommandEntry, CommandRegistry},
    },
    config::{Config, ConfigManager},
    core::{Clock, ReadState, SystemClock},
    errors::CliError,
    store::Snapshot,
};

/// Mutable state shared by every command handler.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub clock: Box<dyn Clock>,
    pub today_override: Option<NaiveDate>,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub snapshot: Option<Snapshot>,
    pub snapshot_path: Option<PathBuf>,
    pub read_state: ReadState,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let read_state = config_manager.load_read_state()?;
        output::set_color_enabled(config.ui_color_enabled);

        let mut registry = CommandRegistry::new();
        for entry in commands::all_definitions() {
            registry.register(entry);
        }

        let mut context = Self {
            mode,
            registry,
            clock: Box::new(SystemClock),
            today_override: None,
            config_manager,
            config,
            snapshot: None,
            snapshot_path: None,
            read_state,
            last_command: None,
            running: true,
        };
        context.restore_last_snapshot();
        Ok(context)
    }

    fn restore_last_snapshot(&mut self) {
        let Some(path) = self.config.last_snapshot.clone() else {
            return;
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "last snapshot no longer exists");
            return;
        }
        match Snapshot::load(&path) {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.snapshot_path = Some(path);
            }
            Err(err) => tracing::warn!(path = %path.display(), %err, "could not restore last snapshot"),
        }
    }

    /// The reporting day: the pinned date when one is set, otherwise the clock's.
    pub fn today(&self) -> NaiveDate {
        self.today_override.unwrap_or_else(|| self.clock.today())
    }

    pub fn snapshot(&self) -> Result<&Snapshot, CommandError> {
        self.snapshot.as_ref().ok_or(CommandError::SnapshotNotLoaded)
    }

    pub fn snapshot_mut(&mut self) -> Result<&mut Snapshot, CommandError> {
        self.snapshot.as_mut().ok_or(CommandError::SnapshotNotLoaded)
    }

    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    pub fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub fn persist_read_state(&self) -> Result<(), CommandError> {
        self.config_manager.save_read_state(&self.read_state)?;
        Ok(())
    }

    pub fn prompt(&self) -> String {
        match self.snapshot.as_ref() {
            Some(snapshot) => format!("subcycle({})> ", snapshot.subscriptions.len()),
            None => "subcycle> ".to_string(),
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        tracing::debug!(command, args = args.len(), "dispatching command");
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::info(format!("Suggestion: `{best}`?"));
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::Io(_) if self.mode == CliMode::Script => Err(err.into()),
            other => {
                output::error(&other);
                Ok(())
            }
        }
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }
}
