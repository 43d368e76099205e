//! CLI integration tests using assert_cmd.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn misassess(home: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("misassess").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("MISASSESS_OUTPUT_DIR");
    cmd
}

fn bank_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../question-banks/mis-executive.toml")
}

const ALL_CORRECT: &str = r#"
[answers]
1 = "B"
2 = "B"
3 = "C"
4 = "B"
5 = "B"
6 = "B"
7 = "B"
8 = "B"
9 = "B"
10 = "C"
11 = "B"
12 = "B"
13 = "A"
14 = "B"
15 = "B"
16 = "B"
17 = "B"
18 = "B"
19 = "B"
20 = "B"
21 = "B"
22 = "B"
23 = "B"
24 = "B"
"#;

#[test]
fn validate_bank_file() {
    let dir = TempDir::new().unwrap();
    misassess(&dir)
        .arg("validate")
        .arg("--bank")
        .arg(bank_path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Question bank: MIS Executive Assessment (24 questions)",
        ))
        .stdout(predicate::str::contains("Question bank valid."));
}

#[test]
fn validate_builtin_bank() {
    let dir = TempDir::new().unwrap();
    misassess(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("24 questions"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    misassess(&dir)
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_reports_bad_answer_key() {
    let dir = TempDir::new().unwrap();
    let bank = dir.path().join("bad.toml");
    std::fs::write(
        &bank,
        r#"
[bank]
id = "bad"
title = "Bad Bank"

[[questions]]
id = 1
category = "AppSheet"
text = "Which one?"
correct_answer = "Z"
options = [{ label = "A", text = "this" }, { label = "B", text = "that" }]
"#,
    )
    .unwrap();

    misassess(&dir)
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .failure()
        .stdout(predicate::str::contains("[question 1]"))
        .stderr(predicate::str::contains("1 issue(s) found."));
}

#[test]
fn score_all_correct() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.toml");
    std::fs::write(&answers, ALL_CORRECT).unwrap();
    let out = dir.path().join("out");

    misassess(&dir)
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .args(["--name", "Jane Doe", "--email", "jane@example.com"])
        .arg("--format")
        .arg("all")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("MIS Executive Assessment — Summary"))
        .stdout(predicate::str::contains("Overall: 24/24 (100%)"))
        .stdout(predicate::str::contains(
            "Jane Doe: Strong fit for MIS Systems + Automation. Overall score 100%.",
        ))
        .stdout(predicate::str::contains("Recommendation: Hire (threshold 75%)."));

    let summary = std::fs::read_to_string(out.join("mis-assessment-summary.txt")).unwrap();
    assert!(summary.contains("Candidate: Jane Doe"));
    let artifacts: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert!(artifacts.iter().any(|n| n.ends_with(".json")));
    assert!(artifacts.iter().any(|n| n.ends_with(".html")));
}

#[test]
fn score_empty_answers() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.json");
    std::fs::write(&answers, r#"{"answers": {}}"#).unwrap();

    misassess(&dir)
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .args(["--name", "Sam", "--email", "sam@example.com"])
        .arg("--output")
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: 0/24 (0%)"))
        .stdout(predicate::str::contains("Sam: Not Ready fit"))
        .stdout(predicate::str::contains(
            "Recommendation: Train Further (threshold 75%).",
        ))
        .stderr(predicate::str::contains(
            "24 unanswered question(s) count as incorrect",
        ));
}

#[test]
fn score_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.toml");
    std::fs::write(&answers, ALL_CORRECT).unwrap();

    misassess(&dir)
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .args(["--name", "Jane", "--email", "jane@example.com"])
        .args(["--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn take_from_stdin() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let mut script = String::new();
    for line in ALL_CORRECT.lines().filter(|l| l.contains(" = ")) {
        let label = line.split('"').nth(1).unwrap_or_default();
        script.push_str(&format!("{label}\nn\n"));
    }
    script.push_str("s\nd\nq\n");

    misassess(&dir)
        .arg("take")
        .args(["--name", "Jane Doe", "--email", "jane@example.com"])
        .arg("--output")
        .arg(&out)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/24] Systems Thinking (FMS/IMS/PMS)"))
        .stdout(predicate::str::contains("Overall: 24/24 (100%)"))
        .stdout(predicate::str::contains("Saved"));

    assert!(out.join("mis-assessment-summary.txt").exists());
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    misassess(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created misassess.toml"))
        .stdout(predicate::str::contains("Created answers.example.toml"));

    assert!(dir.path().join("misassess.toml").exists());
    assert!(dir.path().join("answers.example.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    misassess(&dir).arg("init").assert().success();

    misassess(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    misassess(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "MCQ assessment with rule-based evaluation",
        ));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    misassess(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("misassess"));
}
