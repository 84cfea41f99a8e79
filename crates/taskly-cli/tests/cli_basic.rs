//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

struct Cli {
    dir: TempDir,
}

impl Cli {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_taskly"));
        cmd.args(args)
            .env("TASKLY_DATA_DIR", self.dir.path())
            .env_remove("TASKLY_LOG");
        cmd
    }

    /// Run a CLI command and return (stdout, stderr, code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = self
            .command(args)
            .output()
            .expect("Failed to execute CLI command");
        (
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            output.status.code().unwrap_or(-1),
        )
    }

    fn run_with_stdin(&self, args: &[&str], input: &str) -> (String, String, i32) {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn CLI command");
        child
            .stdin
            .take()
            .expect("stdin piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        let output = child.wait_with_output().expect("Failed to wait on CLI");
        (
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            output.status.code().unwrap_or(-1),
        )
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run(args);
        assert_eq!(code, 0, "CLI command {args:?} failed: {stderr}");
        stdout
    }

    fn json_lines(&self, args: &[&str]) -> Vec<serde_json::Value> {
        self.run_ok(args)
            .lines()
            .map(|l| serde_json::from_str(l).expect("Failed to parse JSON line"))
            .collect()
    }

    fn items(&self) -> Vec<serde_json::Value> {
        let out = self.run_ok(&["list", "show", "--json"]);
        serde_json::from_str::<Vec<serde_json::Value>>(&out).expect("Failed to parse list JSON")
    }
}

#[test]
fn test_list_starts_empty() {
    let cli = Cli::new();
    let out = cli.run_ok(&["list", "show"]);
    assert!(out.contains("Your shopping list is empty"));
}

#[test]
fn test_list_add_and_show() {
    let cli = Cli::new();
    let events = cli.json_lines(&["list", "add", "Coffee"]);
    assert_eq!(events[0]["type"], "ItemAdded");
    assert_eq!(events[0]["name"], "Coffee");

    let items = cli.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Coffee");
    assert!(items[0].get("completedAtTimestamp").is_none());
}

#[test]
fn test_list_add_blank_fails() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&["list", "add", "   "]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Please enter a valid item"));
    assert!(cli.items().is_empty());
}

#[test]
fn test_list_toggle_moves_item_down() {
    let cli = Cli::new();
    cli.run_ok(&["list", "add", "Milk"]);
    cli.run_ok(&["list", "add", "Bread"]);

    let items = cli.items();
    let bread = items[0]["id"].as_str().unwrap().to_string();
    let events = cli.json_lines(&["list", "toggle", &bread]);
    assert_eq!(events[0]["type"], "ItemCompleted");

    let items = cli.items();
    assert_eq!(items[0]["name"], "Milk");
    assert_eq!(items[1]["name"], "Bread");
    assert!(items[1]["completedAtTimestamp"].is_i64());
}

#[test]
fn test_list_delete_declined_keeps_item() {
    let cli = Cli::new();
    cli.run_ok(&["list", "add", "Eggs"]);
    let id = cli.items()[0]["id"].as_str().unwrap().to_string();

    let (stdout, stderr, code) = cli.run_with_stdin(&["list", "delete", &id], "n\n");
    assert_eq!(code, 0);
    assert!(stderr.contains("Are you sure you want to delete Eggs?"));
    assert!(stdout.contains("DeleteDeclined"));
    assert_eq!(cli.items().len(), 1);
}

#[test]
fn test_list_delete_confirmed() {
    let cli = Cli::new();
    cli.run_ok(&["list", "add", "Eggs"]);
    let id = cli.items()[0]["id"].as_str().unwrap().to_string();

    let (stdout, _, code) = cli.run_with_stdin(&["list", "delete", &id], "y\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("ItemDeleted"));
    assert!(cli.items().is_empty());
}

#[test]
fn test_list_delete_unknown_fails() {
    let cli = Cli::new();
    let (_, _, code) = cli.run(&["list", "delete", "missing", "--yes"]);
    assert_ne!(code, 0);
}

#[test]
fn test_countdown_status_cold_start() {
    let cli = Cli::new();
    let out = cli.json_lines(&["countdown", "status", "--json"]);
    assert_eq!(out[0]["type"], "CountdownSnapshot");
    assert_eq!(out[0]["is_overdue"], false);
    assert_eq!(out[0]["seconds"], 0);
}

#[test]
fn test_countdown_done_schedules_notification() {
    let cli = Cli::new();
    let events = cli.json_lines(&["countdown", "done"]);
    let types: Vec<&str> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(types, vec!["NotificationScheduled", "CountdownCompleted"]);

    let pending: Vec<serde_json::Value> =
        serde_json::from_str(&cli.run_ok(&["notify", "pending", "--json"])).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["title"], "The thing is due!");

    let history: Vec<i64> =
        serde_json::from_str(&cli.run_ok(&["countdown", "history", "--json"])).unwrap();
    assert_eq!(history.len(), 1);
}

#[test]
fn test_countdown_done_twice_replaces_notification() {
    let cli = Cli::new();
    cli.run_ok(&["countdown", "done"]);
    let events = cli.json_lines(&["countdown", "done"]);
    assert_eq!(events[0]["type"], "NotificationCancelled");

    let pending: Vec<serde_json::Value> =
        serde_json::from_str(&cli.run_ok(&["notify", "pending", "--json"])).unwrap();
    assert_eq!(pending.len(), 1);
}

#[test]
fn test_countdown_done_without_permission_warns() {
    let cli = Cli::new();
    cli.run_ok(&["config", "set", "notifications.enabled", "false"]);
    let (stdout, stderr, code) = cli.run(&["countdown", "done"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Unable to schedule notification"));
    assert!(stdout.contains("NotificationPermissionDenied"));
}

#[test]
fn test_countdown_done_on_simulator_is_quiet() {
    let cli = Cli::new();
    cli.run_ok(&["config", "set", "notifications.enabled", "false"]);
    cli.run_ok(&["config", "set", "notifications.device", "virtual"]);
    let (_, stderr, code) = cli.run(&["countdown", "done"]);
    assert_eq!(code, 0);
    assert!(!stderr.contains("Unable to schedule notification"));
}

#[test]
fn test_countdown_watch_stops_after_ticks() {
    let cli = Cli::new();
    cli.run_ok(&["config", "set", "countdown.tick_millis", "20"]);
    let out = cli.json_lines(&["countdown", "watch", "--ticks", "2", "--json"]);
    let snapshots = out
        .iter()
        .filter(|e| e["type"] == "CountdownSnapshot")
        .count();
    assert_eq!(snapshots, 2);
}

#[test]
fn test_config_get() {
    let cli = Cli::new();
    let out = cli.run_ok(&["config", "get", "countdown.interval_secs"]);
    assert_eq!(out.trim(), "10");
}

#[test]
fn test_config_set_and_reset() {
    let cli = Cli::new();
    cli.run_ok(&["config", "set", "countdown.interval_secs", "86400"]);
    assert_eq!(cli.run_ok(&["config", "get", "countdown.interval_secs"]).trim(), "86400");
    cli.run_ok(&["config", "reset"]);
    assert_eq!(cli.run_ok(&["config", "get", "countdown.interval_secs"]).trim(), "10");
}

#[test]
fn test_config_unknown_key_fails() {
    let cli = Cli::new();
    let (_, _, code) = cli.run(&["config", "get", "nope.nothing"]);
    assert_ne!(code, 0);
}

#[test]
fn test_completions() {
    let cli = Cli::new();
    let out = cli.run_ok(&["completions", "bash"]);
    assert!(out.contains("taskly"));
}
