use spendlog_config::Config;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    Config::KEYS.join("|")
                )));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            context.update_config(key, value.trim())?;
            io::print_success(format!("Updated `{}`.", key.to_ascii_lowercase()));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}` (expected `show` or `set`)",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) {
    output_section("Configuration");
    for (key, value) in context.config.entries() {
        io::print_info(format!("  {:<18} {}", key, value));
    }
    io::print_info(format!(
        "  Stored at: {}",
        context.config_manager.config_path().display()
    ));
}
