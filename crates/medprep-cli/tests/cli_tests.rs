//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BANK: &str = "../../data/questions_database.json";

fn medprep() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("medprep").unwrap();
    cmd.env_remove("MEDPREP_BANK");
    cmd
}

#[test]
fn validate_sample_bank() {
    medprep()
        .args(["validate", "--bank", BANK])
        .assert()
        .success()
        .stdout(predicate::str::contains("10 questions, 4 notes"))
        .stdout(predicate::str::contains("Question bank valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bank.json");
    std::fs::write(
        &path,
        r#"{"sba": [{"id": "x", "system": "Renal", "options": ["A1", "B1"], "correct_answer": "E"}]}"#,
    )
    .unwrap();

    medprep()
        .arg("validate")
        .arg("--bank")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] WARNING: correct_answer 'E'"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_malformed_bank() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bank.json");
    std::fs::write(&path, r#"{"sba": {"id": 1}}"#).unwrap();

    medprep()
        .arg("validate")
        .arg("--bank")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed question bank"));
}

#[test]
fn validate_nonexistent_file() {
    medprep()
        .args(["validate", "--bank", "nonexistent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn stats_text_and_json() {
    medprep()
        .args(["stats", "--bank", BANK])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total questions: 10"))
        .stdout(predicate::str::contains("2 (5 cases)"))
        .stdout(predicate::str::contains("Medical systems covered: 6"));

    medprep()
        .args(["stats", "--bank", BANK, "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_questions\": 10"));
}

#[test]
fn questions_all() {
    medprep()
        .args(["questions", "--bank", BANK])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 10 question(s)"));
}

#[test]
fn questions_by_system() {
    medprep()
        .args(["questions", "--bank", BANK, "--system", "renal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 question(s)"))
        .stdout(predicate::str::contains("sba-1"))
        .stdout(predicate::str::contains("mcq-3"))
        .stdout(predicate::str::contains("emq-1").not());
}

#[test]
fn questions_no_match() {
    medprep()
        .args([
            "questions",
            "--bank",
            BANK,
            "--kind",
            "emq",
            "--system",
            "musculoskeletal",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No questions found for the selected filters.",
        ));
}

#[test]
fn questions_unknown_kind() {
    medprep()
        .args(["questions", "--bank", BANK, "--kind", "osce"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown question type"));
}

#[test]
fn notes_by_system() {
    medprep()
        .args(["notes", "--bank", BANK, "--system", "CNS"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stroke thrombolysis - CNS"))
        .stdout(predicate::str::contains("Asthma").not());

    medprep()
        .args(["notes", "--bank", BANK, "--system", "reproductive"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No study notes found for the selected system.",
        ));
}

#[test]
fn check_choice_answers() {
    medprep()
        .args(["check", "--bank", BANK, "--id", "sba-1", "--answer", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Correct!"))
        .stdout(predicate::str::contains("Muddy brown granular casts"));

    medprep()
        .args(["check", "--bank", BANK, "--id", "sba-1", "--answer", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ Incorrect"))
        .stdout(predicate::str::contains("Correct answer: B"));
}

#[test]
fn check_emq_case() {
    medprep()
        .args([
            "check", "--bank", BANK, "--id", "emq-1", "--case", "2", "--answer", "D",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Correct!"))
        .stdout(predicate::str::contains("pulmonary embolism"));

    medprep()
        .args(["check", "--bank", BANK, "--id", "emq-1", "--answer", "D"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--case"));
}

#[test]
fn check_unknown_question() {
    medprep()
        .args(["check", "--bank", BANK, "--id", "nope", "--answer", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no question with id 'nope'"));
}

#[test]
fn quiz_from_stdin() {
    medprep()
        .args(["quiz", "--bank", BANK, "--kind", "sba", "--system", "renal"])
        .write_stdin("B\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 (SBA) - Renal"))
        .stdout(predicate::str::contains("✓ Correct!"))
        .stdout(predicate::str::contains("Session complete: 1/1 correct."));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    medprep()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created medprep.toml"))
        .stdout(predicate::str::contains("Created questions_database.json"));

    assert!(dir.path().join("medprep.toml").exists());
    assert!(dir.path().join("questions_database.json").exists());

    // The generated config points at the generated bank.
    medprep()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question bank valid."));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    medprep().current_dir(dir.path()).arg("init").assert().success();

    medprep()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    medprep()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Medical exam question bank"));
}

#[test]
fn version_output() {
    medprep()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("medprep"));
}
