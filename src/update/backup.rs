use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Move the installed `binary_name` found on the search path to `backup_path`.
///
/// A missing binary is an error; nothing on disk is touched in that case.
/// An earlier backup at `backup_path` is replaced. Returns where the binary was.
#[tracing::instrument(skip(runtime))]
pub fn backup_current_binary<R: Runtime>(
    runtime: &R,
    binary_name: &str,
    backup_path: &Path,
) -> Result<PathBuf> {
    let current = runtime.which(binary_name)?;
    info!("Backing up {:?} to {:?}", current, backup_path);
    runtime.rename(&current, backup_path)?;
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use anyhow::anyhow;
    use mockall::predicate::eq;
    use tempfile::tempdir;

    #[test]
    fn test_backup_moves_binary_with_identical_content() {
        let dir = tempdir().unwrap();
        let current = dir.path().join("bin/bbctl");
        let backup = dir.path().join("home/bbctl.bak");
        std::fs::create_dir_all(current.parent().unwrap()).unwrap();
        std::fs::create_dir_all(backup.parent().unwrap()).unwrap();
        std::fs::write(&current, b"old bbctl 0.12.0").unwrap();
        std::fs::write(&backup, b"stale backup").unwrap();

        let mut runtime = MockRuntime::new();
        let found = current.clone();
        runtime
            .expect_which()
            .with(eq("bbctl"))
            .returning(move |_| Ok(found.clone()));
        runtime
            .expect_rename()
            .times(1)
            .returning(|from, to| Ok(std::fs::rename(from, to)?));

        let moved_from = backup_current_binary(&runtime, "bbctl", &backup).unwrap();

        assert_eq!(moved_from, current);
        assert!(!current.exists());
        assert_eq!(std::fs::read(&backup).unwrap(), b"old bbctl 0.12.0");
    }

    #[test]
    fn test_backup_fails_when_binary_not_on_path() {
        // No rename expectation: touching the filesystem would panic
        let mut runtime = MockRuntime::new();
        runtime
            .expect_which()
            .with(eq("bbctl"))
            .returning(|_| Err(anyhow!("bbctl not found in PATH")));

        let err =
            backup_current_binary(&runtime, "bbctl", Path::new("/home/user/bbctl.bak")).unwrap_err();
        assert!(err.to_string().contains("not found in PATH"));
    }

    #[test]
    fn test_backup_rename_failure_propagates() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_which()
            .returning(|_| Ok(PathBuf::from("/usr/local/bin/bbctl")));
        runtime
            .expect_rename()
            .with(
                eq(Path::new("/usr/local/bin/bbctl").to_path_buf()),
                eq(Path::new("/home/user/bbctl.bak").to_path_buf()),
            )
            .returning(|_, _| Err(anyhow!("Permission denied (os error 13)")));

        let err =
            backup_current_binary(&runtime, "bbctl", Path::new("/home/user/bbctl.bak")).unwrap_err();
        assert!(err.to_string().contains("Permission denied"));
    }
}
