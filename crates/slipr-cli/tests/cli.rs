use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const SLIP: &str = "ธ.กสิกรไทย
โอนเงินสำเร็จ
จาก นาย สมชาย ใจดี xxx-xxx1234-5
ไปยัง นาง สมหญิง รักดี
จำนวนเงิน: 2,500.00 บาท
วันที่ 3 ม.ค. 2568 เวลา 09:15";

/// Run `slipr` against a config in a scratch directory so the user's own
/// configuration is never read.
fn slipr(dir: &tempfile::TempDir) -> Command {
    let config = dir.path().join("config.json");
    if !config.exists() {
        fs::write(&config, r#"{ "parser": { "reference_year": 2025 } }"#).unwrap();
    }
    let mut cmd = Command::cargo_bin("slipr").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn parse_file_prints_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("slip.txt");
    fs::write(&input, SLIP).unwrap();

    slipr(&dir)
        .arg("parse")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("📄 **สรุปข้อมูลสลิป**"))
        .stdout(predicate::str::contains("💰 **จำนวนเงิน**: 2,500.00 บาท"))
        .stdout(predicate::str::contains("👥 **ผู้รับ**: นาง สมหญิง รักดี"))
        .stdout(predicate::str::contains("⏰ **เวลา**: 09:15"));
}

#[test]
fn parse_stdin_as_json() {
    let dir = tempfile::tempdir().unwrap();

    let output = slipr(&dir)
        .args(["parse", "-", "--format", "json"])
        .write_stdin(SLIP)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["amount"], "2500.00");
    assert_eq!(json["bank"], "กสิกรไทย");
    assert_eq!(json["date"], "3 มกราคม 2568");
    assert_eq!(json["sender"], "นาย สมชาย ใจดี");
    assert!(json.get("error").is_none());
}

#[test]
fn parse_plain_text_is_not_a_slip() {
    let dir = tempfile::tempdir().unwrap();

    slipr(&dir)
        .arg("parse")
        .write_stdin("สวัสดีครับ")
        .assert()
        .success()
        .stdout(predicate::str::contains("📄 **ข้อความที่อ่านได้:**"));
}

#[test]
fn parse_empty_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    slipr(&dir)
        .arg("parse")
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no text to parse"));
}

#[test]
fn parse_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    slipr(&dir)
        .args(["parse", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn parse_appends_to_csv_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("slips.csv");

    for _ in 0..2 {
        slipr(&dir)
            .args(["parse", "--format", "csv", "--log"])
            .arg(&log)
            .write_stdin(SLIP)
            .assert()
            .success()
            .stdout(predicate::str::contains(",2500.00,"));
    }

    let content = fs::read_to_string(&log).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.starts_with("logged_at,sender,recipient,amount"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), SLIP).unwrap();
    fs::write(inputs.join("b.txt"), "").unwrap();

    slipr(&dir)
        .arg("batch")
        .arg(format!("{}/*.txt", inputs.display()))
        .arg("--output-dir")
        .arg(&outputs)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stderr(predicate::str::contains("1 successful, 1 failed"));

    assert!(outputs.join("a.json").exists());
    assert!(!outputs.join("b.json").exists());

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt,success"));
    assert!(summary.contains("b.txt,error"));
}

#[test]
fn config_set_and_get_round_trip() {
    let dir = tempfile::tempdir().unwrap();

    slipr(&dir)
        .args(["config", "set", "ocr.min_confidence", "0.7"])
        .assert()
        .success();

    slipr(&dir)
        .args(["config", "get", "ocr.min_confidence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.7"));

    slipr(&dir)
        .args(["config", "set", "ocr.min_confidence", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_confidence"));
}
