//! Core CLI dispatch, error reporting, and shell context helpers.

use std::{collections::HashMap, io, sync::Arc};

use spendlog_config::{Config, ConfigError, ConfigManager};
use spendlog_core::Clock;
use strsim::levenshtein;
use uuid::Uuid;

use crate::form::FormError;
use crate::format::ConfigFormatters;
use crate::session::Tracker;

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
use super::system_clock::SystemClock;
pub use crate::cli::shell_context::{CliMode, ShellContext};
pub use crate::errors::CliError;

const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::from_default_location()?;
        let config = config_manager.load()?;
        Ok(Self::with_config(
            mode,
            config_manager,
            config,
            Arc::new(SystemClock),
        ))
    }

    /// Builds a context around an explicit configuration and clock.
    pub fn with_config(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        apply_output_preferences(mode, &config);

        ShellContext {
            mode,
            registry,
            tracker: Tracker::from_config(clock, &config),
            formatters: ConfigFormatters::new(&config),
            config_manager,
            config,
            last_command: None,
            running: true,
        }
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Prompt text; shows the remaining undo window while one is open.
    pub(crate) fn prompt(&self) -> String {
        match self.tracker.pending_undo() {
            Some(notice) => {
                let millis = notice.remaining(self.tracker.clock().now()).num_milliseconds();
                format!("spendlog [undo {}s]> ", millis.saturating_add(999) / 1000)
            }
            None => "spendlog> ".to_string(),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Tokenizes and runs one input line.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        self.tracker.expire_notices();

        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        self.last_command = Some(line.trim().to_string());
        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        let control = self.dispatch(&command, &tokens[0], &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(
            "Exit spendlog? Recorded expenses are not kept after exit.",
            false,
        )?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::NotFound(reference) => {
                cli_io::print_error(format!("No expense matches `{}`.", reference));
                cli_io::print_hint("Use `list` to see expense numbers and ids.");
            }
            other => cli_io::print_error(other),
        }
    }

    /// Resolves a 1-based position in the newest-first listing, or an id prefix.
    pub(crate) fn resolve_expense(&self, reference: &str) -> Result<Uuid, CommandError> {
        let listing = self.tracker.list("");
        if let Ok(position) = reference.parse::<usize>() {
            if (1..=listing.len()).contains(&position) {
                return Ok(listing[position - 1].id);
            }
        }

        let needle = reference.trim().to_ascii_lowercase().replace('-', "");
        if needle.is_empty() {
            return Err(CommandError::NotFound(reference.to_string()));
        }
        let matches: Vec<Uuid> = listing
            .iter()
            .filter(|expense| expense.id.simple().to_string().starts_with(&needle))
            .map(|expense| expense.id)
            .collect();
        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(CommandError::NotFound(reference.to_string())),
            _ => Err(CommandError::InvalidArguments(format!(
                "`{}` matches {} expenses; type more of the id",
                reference,
                matches.len()
            ))),
        }
    }

    /// Changes one setting, saves it and applies it to the running session.
    pub(crate) fn update_config(&mut self, key: &str, value: &str) -> CommandResult {
        self.config.set(key, value)?;
        self.config_manager.save(&self.config)?;
        self.tracker.apply_config(&self.config);
        self.formatters = ConfigFormatters::new(&self.config);
        apply_output_preferences(self.mode, &self.config);
        Ok(())
    }
}

fn apply_output_preferences(mode: CliMode, config: &Config) {
    output::set_preferences(OutputPreferences {
        color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
    });
}

pub(crate) fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(SHORT_ID_LEN);
    short
}

/// Positional arguments plus `--name value` options and `--flag` switches.
#[derive(Debug, Default)]
pub(crate) struct CommandArgs<'a> {
    pub positional: Vec<&'a str>,
    pub options: HashMap<&'static str, &'a str>,
    pub switches: Vec<&'static str>,
}

impl<'a> CommandArgs<'a> {
    pub fn option(&self, name: &str) -> Option<&'a str> {
        self.options.get(name).copied()
    }

    pub fn has_switch(&self, name: &str) -> bool {
        self.switches.iter().any(|switch| *switch == name)
    }
}

pub(crate) fn parse_args<'a>(
    args: &[&'a str],
    options: &[&'static str],
    switches: &[&'static str],
) -> Result<CommandArgs<'a>, CommandError> {
    let mut parsed = CommandArgs::default();
    let mut iter = args.iter();
    while let Some(&arg) = iter.next() {
        let Some(name) = arg.strip_prefix("--") else {
            parsed.positional.push(arg);
            continue;
        };
        if let Some(&switch) = switches.iter().find(|candidate| **candidate == name) {
            parsed.switches.push(switch);
        } else if let Some(&option) = options.iter().find(|candidate| **candidate == name) {
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments(format!("`--{}` needs a value", name))
            })?;
            parsed.options.insert(option, *value);
        } else {
            return Err(CommandError::InvalidArguments(format!(
                "unknown option `{}`",
                arg
            )));
        }
    }
    Ok(parsed)
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("no expense matches `{0}`")]
    NotFound(String),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    use super::*;

    /// Clock whose time only moves when a test advances it.
    pub struct ManualClock(Mutex<NaiveDateTime>);

    impl ManualClock {
        pub fn new(now: NaiveDateTime) -> Self {
            Self(Mutex::new(now))
        }

        pub fn advance(&self, by: Duration) {
            if let Ok(mut now) = self.0.lock() {
                *now += by;
            }
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> NaiveDateTime {
            *self.0.lock().expect("clock lock poisoned")
        }
    }

    pub fn friday_morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    /// Script-mode context writing its config into a fresh temp dir.
    pub fn script_context(clock: Arc<ManualClock>) -> (ShellContext, TempDir) {
        let dir = TempDir::new().expect("create temp dir");
        let manager =
            ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("config manager");
        let context = ShellContext::with_config(CliMode::Script, manager, Config::default(), clock);
        (context, dir)
    }

    pub fn run(context: &mut ShellContext, lines: &[&str]) {
        for line in lines {
            match context.process_line(line) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => panic!("`{line}` failed: {err}"),
            }
        }
    }
}
