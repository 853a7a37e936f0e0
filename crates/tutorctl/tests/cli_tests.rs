//! CLI integration tests for tutorctl
//!
//! Runs the built binary against the bundled ontology:
//! - tutorctl concepts          lists PhysicsConcept individuals
//! - tutorctl examples NAME     examples or the sentinel
//! - tutorctl questions NAME    questions with hints
//! - tutorctl check NAME ANS    feedback + exit code

use std::path::PathBuf;
use std::process::{Command, Output};

fn bundled_ontology() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/physics_laws_ontology.toml")
}

fn tutorctl(args: &[&str]) -> Output {
    let config_dir = tempfile::tempdir().unwrap();
    let config = config_dir.path().join("config.toml");
    std::fs::write(&config, "[output]\ncolor = \"never\"\n").unwrap();

    Command::new(env!("CARGO_BIN_EXE_tutorctl"))
        .arg("--config")
        .arg(&config)
        .arg("--ontology")
        .arg(bundled_ontology())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tutorctl")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn concepts_lists_bundled_concepts() {
    let output = tutorctl(&["concepts"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("[CONCEPTS]"));
    assert!(text.contains("Gravity"));
    assert!(text.contains("NewtonsFirstLaw"));
}

#[test]
fn concepts_json_for_subclass() {
    let output = tutorctl(&["concepts", "--class", "MechanicsConcept", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["concepts"].as_array().unwrap().len(), 3);
}

#[test]
fn examples_of_concept_without_examples() {
    let output = tutorctl(&["examples", "OhmsLaw"]);
    assert!(stdout(&output).contains("No examples available."));
}

#[test]
fn questions_show_hint_sentinel() {
    let output = tutorctl(&["questions", "NewtonsThirdLaw"]);
    assert!(stdout(&output).contains("Hint: No hint available."));
}

#[test]
fn check_correct_answer() {
    let output = tutorctl(&["check", "Gravity", "  newton "]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Correct! Your answer matches the expected response."));
}

#[test]
fn check_incorrect_answer() {
    let output = tutorctl(&["check", "NewtonsSecondLaw", "e=mc2"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("The correct answer is: F=ma"));
}

#[test]
fn check_unknown_concept() {
    let output = tutorctl(&["check", "Quantum", "anything"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn missing_ontology_fails_to_load() {
    let output = Command::new(env!("CARGO_BIN_EXE_tutorctl"))
        .args(["--ontology", "/nonexistent/physics.toml", "--color", "never", "concepts"])
        .env("TUTOR_CONFIG", "")
        .output()
        .expect("failed to run tutorctl");
    assert_eq!(output.status.code(), Some(66));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error loading ontology"));
}

#[test]
fn default_ontology_found_from_repo_root() {
    let config_dir = tempfile::tempdir().unwrap();
    let config = config_dir.path().join("config.toml");
    std::fs::write(&config, "[output]\ncolor = \"never\"\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_tutorctl"))
        .current_dir(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../.."))
        .arg("--config")
        .arg(&config)
        .arg("concepts")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tutorctl");
    assert!(output.status.success());
    assert!(stdout(&output).contains("Gravity"));
}
