use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "spendlog";

fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("SPENDLOG_CLI_SCRIPT", "1")
        .env("SPENDLOG_HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_help_command_prints_overview() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(contains("Available commands").and(contains("undo")));
}

#[test]
fn cli_version_command_prints_version_info() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("version\nexit\n")
        .assert()
        .success()
        .stdout(contains(format!("spendlog {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn cli_add_then_list_shows_expense() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("add 12.5 \"Team lunch\" --category Food\nlist lunch\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Expense added successfully!")
                .and(contains("Team lunch"))
                .and(contains("$12.50")),
        );
}

#[test]
fn cli_delete_and_undo_restore_expense() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("add 3 Coffee\ndelete 1\nundo\nlist\nundo\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Transaction deleted: \"Coffee\" has been removed")
                .and(contains("Type `undo` within 5s"))
                .and(contains("Restored \"Coffee\"."))
                .and(contains("Nothing to undo.")),
        );
}

#[test]
fn cli_summary_reports_top_category() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin(
            "summary\nadd 10 Bus --category Transport\nadd 25 Groceries --category Food\nsummary\nexit\n",
        )
        .assert()
        .success()
        .stdout(
            contains("Top category   : None")
                .and(contains("Top category   : Food"))
                .and(contains("Total expenses : $35.00")),
        );
}

#[test]
fn cli_week_charts_seven_days() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin(
            "add 10 Bus --date 2026-10-12\nadd 25 Groceries --date 2026-10-13\nweek 2026-10-14\nexit\n",
        )
        .assert()
        .success()
        .stdout(
            contains("Week of Oct 11 - Oct 17, 2026")
                .and(contains("Sun Oct 11"))
                .and(contains("Sat Oct 17"))
                .and(contains("Week total: $35.00")),
        );
}

#[test]
fn cli_unknown_command_suggests_closest() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("sumary\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `sumary`").and(contains("Suggestion: `summary`?")));
}

#[test]
fn cli_invalid_amount_is_reported_and_shell_continues() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("add abc Lunch\nsummary\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("amount `abc` is not a number").and(contains("Transactions   : 0")),
        );
}

#[test]
fn cli_config_set_is_saved_under_home() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("config set currency €\nadd 4 Tea\nlist\nexit\n")
        .assert()
        .success()
        .stdout(contains("€4.00"));

    let saved = std::fs::read_to_string(home.path().join("config.json")).unwrap();
    assert!(saved.contains("\"currency_symbol\": \"€\""));
}
