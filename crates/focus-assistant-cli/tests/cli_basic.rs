//! End-to-end tests against the built binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn cli(config: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_focus-assistant"));
    cmd.arg("--config").arg(config).env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn focus-assistant");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for focus-assistant")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn simulate_prints_one_label_per_tick() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli(&dir.path().join("config.toml"))
        .args(["simulate", "present:1s,away:1s"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 10);
    assert!(lines[..5].iter().all(|l| l == "FOCUS"));
    assert!(lines[5..].iter().all(|l| l == "SHORT BREAK"));
}

#[test]
fn simulate_json_reports_beeps_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli(&dir.path().join("config.toml"))
        .args(["simulate", "present:5s,away:130s", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let trace: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let ticks = trace["ticks"].as_array().unwrap();
    let short_beeps = ticks.iter().filter(|t| t["buzzer"] == "short").count();
    assert_eq!(short_beeps, 1);
    assert_eq!(ticks.last().unwrap()["state"], "warning");
    assert_eq!(trace["stats"]["distracted_episodes"], 0);
}

#[test]
fn simulate_rejects_bad_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli(&dir.path().join("config.toml"))
        .args(["simulate", "present:5x"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error:"));
}

#[test]
fn run_reads_distances_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cli(&dir.path().join("config.toml"));
    cmd.args(["run", "--tick-delay-ms", "0"]);
    let output = run_with_stdin(cmd, "30\n30\n80\n");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "FOCUS\nFOCUS\nSHORT BREAK\n");
}

#[test]
fn stats_summarizes_a_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("focus.log");
    std::fs::write(
        &log,
        "2025-03-01 09:00:00,FOCUS\n2025-03-01 09:01:00,FOCUS\nnoise\nDISTRACTED\n",
    )
    .unwrap();

    let output = cli(&dir.path().join("config.toml"))
        .arg("stats")
        .arg(&log)
        .args(["--tick-secs", "60"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["focus_min"], 2.0);
    assert_eq!(summary["distracted_min"], 1.0);
    assert_eq!(summary["distracted_episodes"], 1);
    assert_eq!(summary["rows"], 3);
}

#[test]
fn stats_tick_length_defaults_to_the_configured_delay() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "tick_delay_ms = 30000\n").unwrap();
    let log = dir.path().join("focus.log");
    std::fs::write(&log, "FOCUS\nFOCUS\nFOCUS\nFOCUS\nDISTRACTED\nDISTRACTED\n").unwrap();

    let output = cli(&config).arg("stats").arg(&log).output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["focus_min"], 2.0);
    assert_eq!(summary["distracted_min"], 1.0);
    assert_eq!(summary["distracted_events"], 2);
    assert_eq!(summary["distracted_episodes"], 1);
}

#[test]
fn relay_timestamps_lines_and_rate_limits_alerts() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[relay]\nnotify_command = []\n").unwrap();
    let mut cmd = cli(&config);
    cmd.arg("relay");
    let output = run_with_stdin(cmd, "DISTRACTED\nDISTRACTED\nFOCUS\n");
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with(",DISTRACTED"));
    assert!(lines[2].ends_with(",FOCUS"));
    // "YYYY-mm-dd HH:MM:SS" prefix
    assert_eq!(lines[0].find(','), Some(19));

    assert_eq!(stderr(&output).matches("time to return").count(), 1);
}

#[cfg(unix)]
#[test]
fn relay_runs_the_notify_hook_once_per_gap() {
    let dir = tempfile::tempdir().unwrap();
    let notified = dir.path().join("notified.txt");
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        format!(
            "[relay]\nnotify_command = [\"sh\", \"-c\", 'echo \"$1\" >> \"$0\"', {:?}]\n",
            notified.display().to_string()
        ),
    )
    .unwrap();

    let mut cmd = cli(&config);
    cmd.arg("relay");
    let output = run_with_stdin(cmd, "WARNING\nDISTRACTED\nDISTRACTED\nDISTRACTED\n");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).lines().count(), 4);

    let notes = std::fs::read_to_string(&notified).unwrap();
    assert_eq!(notes.lines().count(), 1);
    assert!(notes.contains("time to return"));
}

#[test]
fn config_get_reads_defaults_when_file_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli(&dir.path().join("config.toml"))
        .args(["config", "get", "thresholds.warning_s"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "300");
}

#[test]
fn config_get_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli(&dir.path().join("config.toml"))
        .args(["config", "get", "thresholds.nope"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown key"));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let first = cli(&path).args(["config", "init"]).output().unwrap();
    assert!(first.status.success(), "{}", stderr(&first));
    assert!(path.exists());

    let second = cli(&path).args(["config", "init"]).output().unwrap();
    assert_eq!(second.status.code(), Some(1));

    let forced = cli(&path).args(["config", "init", "--force"]).output().unwrap();
    assert!(forced.status.success(), "{}", stderr(&forced));
}

#[test]
fn config_values_change_the_simulation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[thresholds]\nshort_break_s = 1\nwarning_s = 2\n").unwrap();

    let output = cli(&path)
        .args(["simulate", "present:200ms,away:3s", "--tick-ms", "500"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    let last = stdout(&output).lines().last().map(str::to_string);
    assert_eq!(last.as_deref(), Some("DISTRACTED"));
}
