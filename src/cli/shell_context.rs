//! Shared runtime state for CLI interactions and command execution.

use spendlog_config::{Config, ConfigManager};

use crate::format::ConfigFormatters;
use crate::session::Tracker;

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub tracker: Tracker,
    pub formatters: ConfigFormatters,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, expenses: {}, undo: {} }}",
            self.running,
            self.last_command,
            self.tracker.store().len(),
            self.tracker.store().can_undo()
        )
    }
}
