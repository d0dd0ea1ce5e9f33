use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CORPUS: &str = r#"[
  {"title": "Test", "author": "Anon", "lines": ["the cat sat", "on the mat"], "linecount": "2"},
  {"title": "Roses", "lines": ["roses are red", "violets are blue"]}
]"#;

fn versegrep(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_versegrep"));
    cmd.arg("--corpus")
        .arg(dir.join("corpus.json"))
        .arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--color")
        .arg("never")
        .arg("--offline");
    cmd
}

fn setup() -> Result<TempDir, Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("corpus.json"), CORPUS)?;
    Ok(dir)
}

#[test]
fn test_one_shot_search() -> Result<(), Box<dyn std::error::Error>> {
    let dir = setup()?;

    versegrep(dir.path())
        .args(["search", "at", "--no-timing"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1 out of 2 documents contain \"at\".",
        ))
        .stdout(predicate::str::contains("[1/2] Test"))
        .stdout(predicate::str::contains("  [ 2] on the mat"));

    versegrep(dir.path())
        .args(["search", "xyz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 out of 2 documents contain \"xyz\"."))
        .stdout(predicate::str::contains("Your query took"));

    Ok(())
}

#[test]
fn test_search_mode_override() -> Result<(), Box<dyn std::error::Error>> {
    let dir = setup()?;

    versegrep(dir.path())
        .args(["search", "cat", "roses", "--mode", "and"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0 out of 2"));

    versegrep(dir.path())
        .args(["search", "cat", "roses", "--mode", "or"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2 out of 2"));

    Ok(())
}

#[test]
fn test_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = setup()?;

    let output = versegrep(dir.path())
        .args(["search", "red", "--format", "json"])
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["matched"], 1);
    assert_eq!(report["results"][0]["title"], "Roses");
    assert_eq!(report["results"][0]["line_matches"][0]["line_no"], 1);

    Ok(())
}

#[test]
fn test_interactive_session_persists_settings() -> Result<(), Box<dyn std::error::Error>> {
    let dir = setup()?;

    versegrep(dir.path())
        .write_stdin(":search-mode OR\n:hl-mode green\n:bogus\ncat roses\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded documents from the cache."))
        .stdout(predicate::str::contains("Loaded 2 documents."))
        .stdout(predicate::str::contains("Search mode set to OR"))
        .stdout(predicate::str::contains("Highlight mode set to GREEN"))
        .stdout(predicate::str::contains("Unknown command. Type :help for commands."))
        .stdout(predicate::str::contains("2 out of 2 documents contain \"cat roses\"."))
        .stdout(predicate::str::contains("Bye."));

    let saved = fs::read_to_string(dir.path().join("config.toml"))?;
    assert!(saved.contains(r#"search_mode = "OR""#));
    assert!(saved.contains(r#"hl_mode = "GREEN""#));

    Ok(())
}

#[test]
fn test_missing_corpus_is_seeded() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    versegrep(dir.path())
        .args(["search", "summer", "--no-timing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shall I compare thee"));
    assert!(dir.path().join("corpus.json").exists());

    Ok(())
}

#[test]
fn test_interactive_reports_bundled_source() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    versegrep(dir.path())
        .write_stdin(":quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Using the bundled documents."));

    Ok(())
}

#[test]
fn test_corrupt_corpus_fails_cleanly() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("corpus.json"), "[{")?;

    versegrep(dir.path())
        .args(["search", "love"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));

    Ok(())
}

#[test]
fn test_completions() {
    Command::new(env!("CARGO_BIN_EXE_versegrep"))
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("versegrep"));
}
