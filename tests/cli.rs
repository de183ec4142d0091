#[allow(unused_imports)]
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn cmd(temp: &TempDir) -> assert_cmd::Command {
    let mut c = assert_cmd::Command::cargo_bin("hose_notes").unwrap();
    c.env("HOSE_NOTES_DIR", temp.path()).env("NO_COLOR", "1");
    c
}

fn note_files(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|s| s == "hnote").unwrap_or(false))
        .collect()
}

fn first_name(temp: &TempDir) -> String {
    let list_out = cmd(temp)
        .args(["list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8_lossy(&list_out)
        .split_whitespace()
        .next()
        .unwrap()
        .to_string()
}

#[test]
fn add_and_list() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["add", "hello world from the cli"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added note"));

    cmd(&temp)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello world from the cli"));
}

#[test]
fn list_with_no_notes() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes yet"));
}

#[test]
fn view_shows_full_body_where_list_truncates() {
    let temp = TempDir::new().unwrap();
    let body = "a body well past the thirty-two byte preview boundary";
    cmd(&temp).args(["add", body]).assert().success();

    let name = first_name(&temp);
    cmd(&temp)
        .args(["view", &name])
        .assert()
        .success()
        .stdout(predicate::str::contains(body));

    let list_out = cmd(&temp)
        .args(["list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(!String::from_utf8_lossy(&list_out).contains(body));
}

#[test]
fn saved_note_carries_closed_flag() {
    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["add", "flag check"]).assert().success();

    let files = note_files(temp.path());
    assert_eq!(files.len(), 1);
    let bytes = fs::read(&files[0]).unwrap();
    assert_eq!(bytes[0], 0u8);
    assert_eq!(bytes[1], b'\n');
    assert_eq!(&bytes[2..], b"flag check");
}

#[test]
fn short_body_is_not_persisted() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["add", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing was saved"));
    assert!(note_files(temp.path()).is_empty());

    cmd(&temp)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes yet"));
}

#[test]
fn delete_removes_note_and_reports_missing() {
    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["add", "one note"]).assert().success();
    cmd(&temp).args(["add", "two note"]).assert().success();

    let name = first_name(&temp);
    cmd(&temp)
        .args(["delete", &name])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted {name}")));
    assert_eq!(note_files(temp.path()).len(), 1);

    cmd(&temp)
        .args(["delete", &name])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
    cmd(&temp).args(["view", &name]).assert().failure();
}

#[test]
fn edit_with_noop_editor_keeps_content() {
    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["add", "stable content"]).assert().success();
    let name = first_name(&temp);

    cmd(&temp)
        .env("EDITOR", "true")
        .args(["edit", &name])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Updated {name}")));

    cmd(&temp)
        .args(["view", &name])
        .assert()
        .success()
        .stdout(predicate::str::contains("stable content"));
    // The scratch file must be cleaned up.
    assert_eq!(note_files(temp.path()).len(), 1);
    assert!(!temp.path().join(format!(".{name}.edit")).exists());
}

#[test]
fn corrupt_file_is_skipped_not_fatal() {
    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["add", "good note body"]).assert().success();
    fs::write(temp.path().join("broken.hnote"), b"header without newline")
        .unwrap();

    cmd(&temp)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("good note body"));
}

#[test]
fn path_and_help() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            temp.path().to_string_lossy().as_ref(),
        ));

    cmd(&temp)
        .args(["help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hose Notes CLI"));
}
