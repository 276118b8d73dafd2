use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::tempdir;

fn bbctl() -> Command {
    Command::new(cargo::cargo_bin!("bbctl"))
}

fn create_zip(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default().unix_permissions(0o755);
    for (name, content) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[cfg(unix)]
fn write_executable(path: &Path, contents: &str) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::write(path, contents).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_version_flag() {
    bbctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("bbctl "));
}

#[test]
fn test_update_help_lists_flags() {
    bbctl()
        .args(["update", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--install-path"))
        .stdout(predicate::str::contains("--backup-path"))
        .stdout(predicate::str::contains("--skip-restart"));
}

#[cfg(all(
    target_os = "linux",
    any(target_arch = "x86_64", target_arch = "aarch64")
))]
#[test]
fn test_update_fails_when_bbctl_not_installed() {
    let dir = tempdir().unwrap();
    let empty_path = dir.path().join("empty");
    std::fs::create_dir_all(&empty_path).unwrap();
    let install_path = dir.path().join("install/bbctl");
    let backup_path = dir.path().join("bbctl.bak");

    bbctl()
        .env("PATH", &empty_path)
        .env("RUST_LOG", "off")
        .args(["update", "--skip-restart", "--install-path"])
        .arg(&install_path)
        .arg("--backup-path")
        .arg(&backup_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "failed to back up current bbctl binary",
        ));

    assert!(!install_path.exists());
    assert!(!backup_path.exists());
}

#[cfg(all(
    target_os = "linux",
    any(target_arch = "x86_64", target_arch = "aarch64")
))]
#[test]
fn test_end_to_end_update_from_file_url() {
    use std::os::unix::fs::PermissionsExt;

    if which::which("curl").is_err() {
        eprintln!("curl not available, skipping");
        return;
    }

    let dir = tempdir().unwrap();
    let bin_dir = dir.path().join("bin");
    let artifacts = dir.path().join("artifacts");
    let install_dir = dir.path().join("install");
    for d in [&bin_dir, &artifacts, &install_dir] {
        std::fs::create_dir_all(d).unwrap();
    }

    // The "old" bbctl that is found on PATH and backed up
    let old_script = "#!/bin/sh\necho \"bbctl version 0.12.0\"\n";
    write_executable(&bin_dir.join("bbctl"), old_script);

    // The "new" bbctl, published as a zip like the nightly artifacts
    let new_script = "#!/bin/sh\necho \"bbctl version 0.13.0\"\n";
    let artifact = if cfg!(target_arch = "x86_64") {
        "bbctl-linux-amd64.zip"
    } else {
        "bbctl-linux-arm64.zip"
    };
    std::fs::write(
        artifacts.join(artifact),
        create_zip(&[(artifact.trim_end_matches(".zip"), new_script)]),
    )
    .unwrap();

    let install_path = install_dir.join("bbctl");
    let backup_path = dir.path().join("bbctl.bak");
    let path_env = format!(
        "{}:{}",
        bin_dir.display(),
        std::env::var("PATH").unwrap_or_default()
    );

    bbctl()
        .env("PATH", path_env)
        .args(["update", "--skip-restart", "--install-path"])
        .arg(&install_path)
        .arg("--backup-path")
        .arg(&backup_path)
        .arg("--download-base-url")
        .arg(format!("file://{}", artifacts.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("skipping restart of bbctl"))
        .stdout(predicate::str::contains("bbctl updated: bbctl version 0.13.0"));

    // Old binary moved aside with its content intact
    assert!(!bin_dir.join("bbctl").exists());
    assert_eq!(std::fs::read_to_string(&backup_path).unwrap(), old_script);

    // New binary unpacked and executable
    assert_eq!(std::fs::read_to_string(&install_path).unwrap(), new_script);
    let mode = std::fs::metadata(&install_path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}
