// Binary-level behavior: --text, stdin/stdout, file outputs, skipping and run statistics

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::TestFixture;

use serde_json::Value;
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

fn zahlwort() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_zahlwort"));
    command.current_dir(env!("CARGO_MANIFEST_DIR"));
    command
}

#[test]
fn test_text_flag_prints_conversion() {
    let output = zahlwort()
        .args(["--text", "Ich habe 5 Äpfel."])
        .output()
        .expect("Failed to run zahlwort");
    assert!(
        output.status.success(),
        "zahlwort failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "Ich habe fünf Äpfel."
    );
}

#[test]
fn test_stdin_to_stdout() {
    let mut child = zahlwort()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn zahlwort");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all("Die Zahl ist 100.".as_bytes())
        .expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait for zahlwort");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Die Zahl ist eihundärd.");
}

#[test]
fn test_unknown_dialect_is_rejected() {
    let output = zahlwort()
        .args(["--dialect", "zürich", "--text", "5"])
        .output()
        .expect("Failed to run zahlwort");
    assert!(!output.status.success());
}

#[test]
fn test_directory_run_writes_outputs_and_stats() {
    let fixture = TestFixture::new();
    let first = fixture.create_text_file("brief.txt", "Ich habe 5 Äpfel.");
    let second = fixture.create_text_file("archiv/termin.txt", "Der 2. Termin ist am 15. Januar.");
    let stats_file = fixture.root_path.join("stats.json");

    let output = zahlwort()
        .arg(fixture.root_path.as_os_str())
        .arg("--no-progress")
        .arg("--stats-out")
        .arg(stats_file.as_os_str())
        .output()
        .expect("Failed to run zahlwort");
    assert!(
        output.status.success(),
        "zahlwort failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_eq!(fixture.read_spoken(&first).unwrap(), "Ich habe fünf Äpfel.");
    assert_eq!(
        fixture.read_spoken(&second).unwrap(),
        "Der zweit Termin ist am füfzähnt Januar."
    );

    let stats: Value =
        serde_json::from_str(&fs::read_to_string(&stats_file).expect("stats written"))
            .expect("stats are JSON");
    let obj = stats.as_object().expect("stats object");
    for key in [
        "run_start",
        "total_processing_time_ms",
        "files_processed",
        "files_skipped",
        "files_failed",
        "total_spans_replaced",
        "total_span_failures",
        "file_stats",
    ] {
        assert!(obj.contains_key(key), "Missing {key} field");
    }
    assert_eq!(obj["files_processed"].as_u64(), Some(2));
    assert_eq!(obj["total_spans_replaced"].as_u64(), Some(3));
    assert_eq!(obj["file_stats"].as_array().map(Vec::len), Some(2));

    // A second run skips both files, --overwrite-all processes them again
    let rerun = zahlwort()
        .arg(fixture.root_path.as_os_str())
        .args(["--no-progress", "--stats-out"])
        .arg(stats_file.as_os_str())
        .output()
        .expect("Failed to run zahlwort");
    assert!(rerun.status.success());
    let stats: Value = serde_json::from_str(&fs::read_to_string(&stats_file).unwrap()).unwrap();
    assert_eq!(stats["files_skipped"].as_u64(), Some(2));
    assert_eq!(stats["files_processed"].as_u64(), Some(0));

    let forced = zahlwort()
        .arg(fixture.root_path.as_os_str())
        .args(["--no-progress", "--overwrite-all", "--stats-out"])
        .arg(stats_file.as_os_str())
        .output()
        .expect("Failed to run zahlwort");
    assert!(forced.status.success());
    let stats: Value = serde_json::from_str(&fs::read_to_string(&stats_file).unwrap()).unwrap();
    assert_eq!(stats["files_processed"].as_u64(), Some(2));
    assert!(!fixture.spoken_exists(fixture.root_path.join("brief_spoken.txt")));
}

#[test]
fn test_config_file_selects_dialect() {
    let fixture = TestFixture::new();
    let config = fixture.create_text_file(
        "zahlwort.toml",
        &format!(
            "dialect = \"st-gallen\"\ngazetteer_path = {:?}\ndeclension_path = {:?}\n",
            test_utils::data_path("plz_ortschaften.csv"),
            test_utils::data_path("ordinal_declension.csv"),
        ),
    );
    let output = zahlwort()
        .arg("--config")
        .arg(config.as_os_str())
        .args(["--text", "Das ist der 3. Platz."])
        .output()
        .expect("Failed to run zahlwort");
    assert!(
        output.status.success(),
        "zahlwort failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "Das ist der dritti Platz."
    );
}
