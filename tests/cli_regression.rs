// Regression tests for the solast binary.
// Requires: assert_cmd, predicates, tempfile in [dev-dependencies]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::tempdir;

fn solast() -> Command {
    let mut cmd = Command::cargo_bin("solast").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn ast_prints_json() {
    let dir = tempdir().unwrap();
    let file = write(dir.path(), "A.sol", "contract A { uint x; }");

    solast()
        .arg("ast")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains(r#""type": "ContractDefinition""#))
        .stdout(contains(r#""errors": []"#));
}

#[test]
fn ast_compact_and_yaml() {
    let dir = tempdir().unwrap();
    let file = write(dir.path(), "E.sol", "enum E { A, B }");

    solast()
        .args(["ast", "--compact"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains(r#"{"type":"EnumValue","name":"B"}"#));

    solast()
        .args(["ast", "--format", "yaml"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("type: EnumDefinition"));
}

#[test]
fn ast_reports_syntax_errors_and_fails() {
    let dir = tempdir().unwrap();
    let file = write(dir.path(), "Bad.sol", "contract {");

    solast()
        .arg("ast")
        .arg(&file)
        .assert()
        .failure()
        .stdout(contains(r#""type": "SourceUnit""#))
        .stderr(contains("syntax error").and(contains("Bad.sol")));
}

#[test]
fn max_depth_is_rendered_as_a_diagnostic() {
    let dir = tempdir().unwrap();
    let file = write(
        dir.path(),
        "Deep.sol",
        "contract C { function f() public { x = ((((((1)))))); } }",
    );

    solast()
        .args(["ast", "--max-depth", "4"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(contains("solast::syntax::nesting_limit"))
        .stderr(contains("exceeds the limit of 4"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();

    solast()
        .arg("ast")
        .arg(dir.path().join("Nope.sol"))
        .assert()
        .failure()
        .stderr(contains("solast::io::io").and(contains("Nope.sol")));
}

#[test]
fn ast_keeps_the_items_that_parsed() {
    let dir = tempdir().unwrap();
    let file = write(
        dir.path(),
        "Partial.sol",
        "contract Good { uint x; }\npragma abicoder v1",
    );

    solast()
        .args(["ast", "--compact"])
        .arg(&file)
        .assert()
        .failure()
        .stdout(contains(r#"{"type":"ContractDefinition","name":"Good""#))
        .stderr(contains("Partial.sol:"));
}

#[test]
fn check_walks_a_directory() {
    let dir = tempdir().unwrap();
    write(dir.path(), "Good.sol", "contract Good {}");
    fs::create_dir(dir.path().join("nested")).unwrap();
    write(&dir.path().join("nested"), "Also.sol", "library Also {}");
    write(dir.path(), "notes.txt", "not solidity");

    solast()
        .arg("check")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("2 passed, 0 failed"))
        .stdout(contains("notes.txt").not());

    write(dir.path(), "Broken.sol", "contract Broken {");
    solast()
        .arg("check")
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(contains("FAIL").and(contains("Broken.sol")))
        .stdout(contains("2 passed, 1 failed"));
}

#[test]
fn cst_dumps_productions() {
    let dir = tempdir().unwrap();
    let file = write(dir.path(), "P.sol", "pragma solidity ^0.8.0;");

    solast()
        .arg("cst")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("SourceUnit").and(contains("  PragmaDirective")))
        .stdout(contains("PragmaValue"));
}

#[test]
fn verbose_flag_enables_debug_logs() {
    let dir = tempdir().unwrap();
    let file = write(dir.path(), "A.sol", "contract A {}");

    solast()
        .args(["-v", "ast"])
        .arg(&file)
        .assert()
        .success()
        .stderr(contains("parse finished"));
}
