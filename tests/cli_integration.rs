#![allow(deprecated)]

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Stdio};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// ─── helpers ───────────────────────────────────────────────────────

const TODAY: &str = "2025-10-25";

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("calmtask").expect("binary");
    cmd.env_remove("CALMTASK_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// Run a whole script through `calmtask shell --json` and parse every output line.
fn run_script(extra: &[&str], script: &str) -> Vec<Value> {
    let mut args = vec!["shell", "--json", "--today", TODAY];
    args.extend_from_slice(extra);
    let output = cmd().args(&args).write_stdin(script).output().expect("run");
    assert!(output.status.success(), "exit status: {:?}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .map(|l| {
            serde_json::from_str(l).unwrap_or_else(|e| panic!("parse JSON failed: {e}\nline: {l}"))
        })
        .collect()
}

/// A live session where each command's reply can feed the next command.
struct LiveShell {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl LiveShell {
    fn start() -> Self {
        let mut child = std::process::Command::new(assert_cmd::cargo::cargo_bin("calmtask"))
            .args(["shell", "--json", "--today", TODAY])
            .env_remove("CALMTASK_CONFIG")
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn shell");
        let stdin = child.stdin.take().expect("stdin");
        let stdout = BufReader::new(child.stdout.take().expect("stdout"));
        Self { child, stdin, stdout }
    }

    fn send(&mut self, line: &str) -> Value {
        writeln!(self.stdin, "{line}").expect("write line");
        self.stdin.flush().expect("flush");
        let mut reply = String::new();
        self.stdout.read_line(&mut reply).expect("read reply");
        serde_json::from_str(&reply)
            .unwrap_or_else(|e| panic!("parse JSON failed: {e}\nreply: {reply}"))
    }

    fn finish(mut self) {
        writeln!(self.stdin, "quit").expect("quit");
        drop(self.stdin);
        let status = self.child.wait().expect("wait");
        assert!(status.success());
    }
}

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let p = dir.path().join("calmtask.json");
    fs::write(&p, content).expect("write config");
    p
}

// ─── 1. shell basics ───────────────────────────────────────────────

#[test]
fn test_shell_add_and_list() {
    let lines = run_script(&[], "add 'Buy milk'\nlist\ndates\n");
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["success"], true);
    assert_eq!(lines[0]["data"]["task"]["due_label"], "Today");
    assert_eq!(lines[1]["data"]["tasks"][0]["title"], "Buy milk");
    assert_eq!(lines[2]["data"]["dates"][0]["date"], TODAY);
}

#[test]
fn test_shell_empty_title_rejected() {
    let lines = run_script(&[], "add ''\nstats\n");
    assert_eq!(lines[0]["success"], false);
    assert_eq!(lines[0]["error"]["code"], "VALIDATION_REJECTED");
    assert_eq!(lines[1]["data"]["progress"]["total"], 0);
}

#[test]
fn test_shell_errors_do_not_stop_session() {
    let lines = run_script(&[], "bogus\ntoggle missing\nadd Walk\n");
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["error"]["code"], "INVALID_COMMAND");
    assert_eq!(lines[1]["error"]["code"], "TASK_NOT_FOUND");
    assert_eq!(lines[2]["success"], true);
}

#[test]
fn test_shell_ignores_blank_and_comment_lines() {
    let lines = run_script(&[], "\n# setup\nadd Walk\n\n");
    assert_eq!(lines.len(), 1);
}

#[test]
fn test_shell_quit_stops_reading() {
    let lines = run_script(&[], "add One\nquit\nadd Two\n");
    assert_eq!(lines.len(), 1);
}

// ─── 2. toggling across commands ───────────────────────────────────

#[test]
fn test_toggle_moves_task_to_completed() {
    let mut shell = LiveShell::start();
    let added = shell.send("add 'Team meeting prep' --priority high --deadline tomorrow");
    let id = added["data"]["task"]["id"].as_str().unwrap().to_string();
    assert_eq!(added["data"]["task"]["color"], "red");

    let toggled = shell.send(&format!("toggle {id}"));
    assert_eq!(toggled["data"]["task"]["completed"], true);

    let active = shell.send("list");
    assert_eq!(active["data"]["tasks"].as_array().unwrap().len(), 0);
    let completed = shell.send("list --completed");
    assert_eq!(completed["data"]["tasks"][0]["id"], id.as_str());

    let back = shell.send(&format!("toggle {id}"));
    assert_eq!(back["data"]["task"]["completed"], false);
    shell.finish();
}

#[test]
fn test_edit_and_delete_are_inert() {
    let mut shell = LiveShell::start();
    let added = shell.send("add Stretch");
    let id = added["data"]["task"]["id"].as_str().unwrap().to_string();

    assert_eq!(shell.send(&format!("edit {id}"))["error"]["code"], "UNSUPPORTED");
    assert_eq!(shell.send(&format!("delete {id}"))["error"]["code"], "UNSUPPORTED");
    let all = shell.send("list --all");
    assert_eq!(all["data"]["tasks"][0]["title"], "Stretch");
    shell.finish();
}

// ─── 3. seed / demo ────────────────────────────────────────────────

#[test]
fn test_seed_flag_loads_sample_board() {
    let lines = run_script(&["--seed"], "home\ncalendar\n");
    let home = &lines[0]["data"];
    assert_eq!(home["summary"], "You have 2 tasks today");
    assert_eq!(home["completed"][0]["title"], "Grocery shopping");
    assert_eq!(lines[1]["data"]["month"]["marked_days"], serde_json::json!([25, 26, 27]));
}

#[test]
fn test_demo_text() {
    cmd()
        .args(["demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You have 2 tasks today"))
        .stdout(predicate::str::contains("October 2025"))
        .stdout(predicate::str::contains("Team meeting prep"))
        .stdout(predicate::str::contains("[25]*"));
}

#[test]
fn test_demo_json() {
    let output = cmd().args(["demo", "--json"]).output().expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<Value> = stdout.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["data"]["active"].as_array().unwrap().len(), 2);
    assert_eq!(lines[1]["data"]["month"]["today"], 25);
}

// ─── 4. config ─────────────────────────────────────────────────────

#[test]
fn test_config_default_priority_and_seed() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(&dir, r#"{"default_priority": "high", "seed_sample_tasks": true}"#);
    let path = path.to_string_lossy().to_string();

    let lines = run_script(&["--config", &path], "add Walk\nstats\n");
    assert_eq!(lines[0]["data"]["task"]["priority"], "high");
    assert_eq!(lines[1]["data"]["progress"]["total"], 4);
}

#[test]
fn test_config_from_env() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(&dir, r#"{"default_priority": "low"}"#);

    let output = cmd()
        .args(["shell", "--json", "--today", TODAY])
        .env("CALMTASK_CONFIG", &path)
        .write_stdin("add Walk\n")
        .output()
        .expect("run");
    let v: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(v["data"]["task"]["priority"], "low");
}

#[test]
fn test_bad_config_fails_startup() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(&dir, r#"{"colour": "blue"}"#);

    cmd()
        .args(["shell", "--config"])
        .arg(&path)
        .write_stdin("add Walk\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));

    cmd()
        .args(["shell", "--config", "/nonexistent/calmtask.json"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read config"));
}

#[test]
fn test_bad_today_fails_startup() {
    let output = cmd()
        .args(["shell", "--json", "--today", "25/10/2025"])
        .write_stdin("")
        .output()
        .expect("run");
    assert!(!output.status.success());
    let v: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(v["error"]["code"], "INVALID_ARGUMENT");
}

// ─── 5. text output ────────────────────────────────────────────────

#[test]
fn test_text_output() {
    cmd()
        .args(["shell", "--today", TODAY])
        .write_stdin("add 'Buy milk'\nadd ''\nstats\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task: Buy milk"))
        .stdout(predicate::str::contains("Error: Task title must not be empty"))
        .stdout(predicate::str::contains("Progress: 0.0% (0/1)"));
}
