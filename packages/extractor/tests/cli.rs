//! Binary tests for the command-line interface.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn cmd() -> Command {
    Command::cargo_bin("dom-extractor").unwrap()
}

#[test]
fn test_extract_from_file() {
    cmd()
        .arg("extract")
        .arg("--config")
        .arg(fixture("products.yaml"))
        .arg("--file")
        .arg(fixture("basic.html"))
        .arg("--compact")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            r#"{"title":"My First Bootstrap Page","intro":"#,
        ))
        .stdout(predicate::str::contains(r#""width":120"#))
        .stdout(predicate::str::contains(r#""price":19.99"#));
}

#[test]
fn test_extract_from_stdin() {
    let config = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(config.path(), "items:\n  selector: li\n  multiple: true\n").unwrap();

    cmd()
        .arg("extract")
        .arg("-c")
        .arg(config.path())
        .arg("--compact")
        .write_stdin("<ul><li>One</li><li>Two</li></ul>")
        .assert()
        .success()
        .stdout(predicate::str::diff("{\"items\":[\"One\",\"Two\"]}\n"));
}

#[test]
fn test_extract_missing_document() {
    cmd()
        .arg("extract")
        .arg("-c")
        .arg(fixture("products.yaml"))
        .arg("--file")
        .arg("no-such-page.html")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to load document"));
}

#[test]
fn test_extract_malformed_config() {
    let config = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(config.path(), "title: [unclosed").unwrap();

    cmd()
        .arg("extract")
        .arg("-c")
        .arg(config.path())
        .write_stdin("<p>x</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_validate_lists_fields() {
    cmd()
        .arg("validate")
        .arg("-c")
        .arg(fixture("products.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("products.tags"))
        .stdout(predicate::str::contains("10 fields"));
}
