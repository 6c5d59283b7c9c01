use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "draft-lottery-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_odds_writes_output() {
    let exe = env!("CARGO_BIN_EXE_draft-lottery");
    let output_path = temp_path("odds");
    let status = Command::new(exe)
        .args(["--list-odds", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Lottery odds for Sample League"));
    assert!(content.contains("Runners Up"));
}

#[test]
fn cli_draws_inline_league_as_json() {
    let exe = env!("CARGO_BIN_EXE_draft-lottery");
    let output_path = temp_path("draw");
    let status = Command::new(exe)
        .args([
            "--teams",
            "Aces=90,Bats=10",
            "--name",
            "Keepers",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(value["league"], "Keepers");
    let order: Vec<&str> = value["outcome"]["order"]
        .as_array()
        .expect("order array")
        .iter()
        .filter_map(serde_json::Value::as_str)
        .collect();
    assert_eq!(order.len(), 2);
    assert!(order.contains(&"Aces") && order.contains(&"Bats"));
}

#[test]
fn cli_reads_league_file_and_simulates() {
    let exe = env!("CARGO_BIN_EXE_draft-lottery");
    let league_path = temp_path("league.json");
    std::fs::write(
        &league_path,
        r#"{ "name": "File League", "teams": [
            { "name": "Aces", "percent": 50 },
            { "name": "Bats", "percent": 30 },
            { "name": "Cubs", "percent": 20 } ] }"#,
    )
    .expect("write league");
    let output = Command::new(exe)
        .arg("--league")
        .arg(&league_path)
        .args(["--trials", "200", "--report", "csv"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("team,tickets,expected_first_pick"));
    assert_eq!(stdout.lines().count(), 4);
}

#[test]
fn cli_console_report_prints_order() {
    let exe = env!("CARGO_BIN_EXE_draft-lottery");
    let output = Command::new(exe)
        .env("NO_COLOR", "1")
        .args(["--teams", "Solo=100"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Fantasy Draft Lottery"));
    assert!(stdout.contains("1. Solo"));
    assert!(stdout.contains("repeats discarded"));
}

#[test]
fn cli_rejects_non_positive_weight() {
    let exe = env!("CARGO_BIN_EXE_draft-lottery");
    let output = Command::new(exe)
        .args(["--teams", "Aces=100,Bats=0", "--report", "json"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("non-positive weight"));
}

#[test]
fn cli_failure_leaves_existing_output_untouched() {
    let exe = env!("CARGO_BIN_EXE_draft-lottery");
    let output_path = temp_path("kept");
    std::fs::write(&output_path, "previous report\n").expect("seed output");
    let status = Command::new(exe)
        .args(["--teams", "Aces=100,Bats=0", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(!status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert_eq!(content, "previous report\n");
}

#[test]
fn cli_list_odds_honours_json_report() {
    let exe = env!("CARGO_BIN_EXE_draft-lottery");
    let output = Command::new(exe)
        .args(["--list-odds", "--teams", "Aces=75,Bats=25", "--report", "json"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["total_tickets"], 1_000_000);
    assert_eq!(value["odds"][0]["team"], "Aces");
    assert_eq!(value["odds"][0]["tickets"], 750_000);
}
