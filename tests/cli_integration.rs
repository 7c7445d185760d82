//! Integration tests for the ReelVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Passwords are supplied through `REELVAULT_PASSWORD` so nothing
//! prompts interactively.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the reelvault binary.
fn reelvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("reelvault").expect("binary should exist")
}

/// Helper: run a command inside `dir` with a clean password env.
fn in_dir(dir: &TempDir) -> Command {
    let mut cmd = reelvault();
    cmd.current_dir(dir.path()).env_remove("REELVAULT_PASSWORD");
    cmd
}

/// Name of the single stored recording with the given extension.
fn stored_name(dir: &TempDir, ext: &str) -> String {
    std::fs::read_dir(dir.path().join("recordings"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .find(|n| n.starts_with("recording_") && n.ends_with(ext))
        .expect("stored recording")
}

#[test]
fn help_flag_shows_usage() {
    reelvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Password-protected screen recording library",
        ))
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("download"))
        .stdout(predicate::str::contains("decrypt"))
        .stdout(predicate::str::contains("verify"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn version_flag_shows_version() {
    reelvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reelvault"));
}

#[test]
fn no_args_shows_help() {
    reelvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn plain_upload_list_download_delete() {
    let tmp = TempDir::new().unwrap();
    tmp.child("screen.webm").write_binary(b"raw frames").unwrap();

    in_dir(&tmp)
        .args(["upload", "screen.webm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recording saved"));

    let name = stored_name(&tmp, ".webm");

    in_dir(&tmp)
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(name.as_str()))
        .stdout(predicate::str::contains("\"encrypted\": false"));

    in_dir(&tmp)
        .args(["download", &name, "-o", "copy.webm"])
        .assert()
        .success();
    tmp.child("copy.webm").assert(predicate::path::exists());
    assert_eq!(std::fs::read(tmp.path().join("copy.webm")).unwrap(), b"raw frames");

    in_dir(&tmp)
        .args(["delete", &name, "--force"])
        .assert()
        .success();

    in_dir(&tmp)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.0 KB"));
}

#[test]
fn protected_upload_decrypt_and_verify() {
    let tmp = TempDir::new().unwrap();
    tmp.child("screen.webm").write_binary(b"hello world").unwrap();

    in_dir(&tmp)
        .args(["upload", "screen.webm", "--protect"])
        .env("REELVAULT_PASSWORD", "secret123")
        .assert()
        .success()
        .stdout(predicate::str::contains("password protection"));

    let name = stored_name(&tmp, ".enc");

    // Plain download is refused.
    in_dir(&tmp)
        .args(["download", &name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("password protected"));

    in_dir(&tmp)
        .args(["verify", &name])
        .env("REELVAULT_PASSWORD", "wrong")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong password"));

    in_dir(&tmp)
        .args(["verify", &name, "--deep"])
        .env("REELVAULT_PASSWORD", "secret123")
        .assert()
        .success();

    in_dir(&tmp)
        .args(["decrypt", &name])
        .env("REELVAULT_PASSWORD", "secret123")
        .assert()
        .success();

    let plain_name = name.replace(".enc", ".webm");
    assert_eq!(
        std::fs::read(tmp.path().join(plain_name)).unwrap(),
        b"hello world"
    );

    in_dir(&tmp)
        .args(["audit", "--last", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("decrypt"));
}

#[test]
fn upload_rejects_unsupported_extension() {
    let tmp = TempDir::new().unwrap();
    tmp.child("notes.txt").write_str("text").unwrap();

    in_dir(&tmp)
        .args(["upload", "notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type"));
}

#[test]
fn dir_flag_overrides_recordings_dir() {
    let tmp = TempDir::new().unwrap();
    tmp.child("screen.mp4").write_binary(b"x").unwrap();

    in_dir(&tmp)
        .args(["--dir", "captures", "upload", "screen.mp4"])
        .assert()
        .success();

    tmp.child("captures").child("metadata.db").assert(predicate::path::exists());
}

#[test]
fn delete_unknown_recording_fails() {
    let tmp = TempDir::new().unwrap();
    in_dir(&tmp)
        .args(["delete", "recording_19700101_000000.webm", "-f"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
