// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const README: &str = "Version 1.2.3\nCopyright 2019 Socket Mobile, Inc.\n";

fn release_bump(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_release-bump"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute command")
}

fn init_repo(dir: &Path) {
    let repo = git2::Repository::init(dir).expect("Could not init repo");
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Release Bot").unwrap();
        config.set_str("user.email", "release@example.com").unwrap();
    }
    fs::write(dir.join("README.md"), README).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new("README.md")).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = repo.signature().unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
        .unwrap();
}

#[test]
fn test_help() {
    let output = release_bump(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("release-bump"));
    assert!(stdout.contains("Bump version strings"));
}

#[test]
fn test_no_arguments_prints_usage_and_succeeds() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.md"), README).unwrap();

    let output = release_bump(&["--dir", dir.path().to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Usage: release-bump <newVersion>"));
    assert_eq!(stdout.lines().count(), 2);
    assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), README);
}

#[test]
fn test_two_arguments_prints_usage_and_succeeds() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.md"), README).unwrap();

    let output = release_bump(&["--dir", dir.path().to_str().unwrap(), "1.4.0", "1.5.0"]);

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("Usage:"));
    assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), README);
}

#[test]
fn test_dry_run_in_repository() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());

    let output = release_bump(&["--dir", dir.path().to_str().unwrap(), "--dry-run", "1.4.0"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("would update README.md"));
    assert!(stdout.contains("update to version 1.4.0"));
    assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), README);
}

#[test]
fn test_release_in_repository() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());

    let output = release_bump(&["--dir", dir.path().to_str().unwrap(), "1.4.0"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(fs::read_to_string(dir.path().join("README.md"))
        .unwrap()
        .starts_with("Version 1.4.0\n"));

    let repo = git2::Repository::open(dir.path()).unwrap();
    assert!(repo.find_reference("refs/tags/1.4.0").is_ok());
}

#[test]
fn test_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");

    let output = release_bump(&["--dir", missing.to_str().unwrap(), "1.4.0"]);

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().contains("ERROR:"));
}
