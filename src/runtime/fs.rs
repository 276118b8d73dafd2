//! File system operations (read, write, rename, permissions).

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn read_impl(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).context("Failed to read file")
    }

    #[tracing::instrument(skip(self, contents))]
    pub(crate) fn write_impl(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents).context("Failed to write to file")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn rename_impl(&self, from: &Path, to: &Path) -> Result<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                debug!("{:?} and {:?} are on different filesystems, copying", from, to);
                // fs::copy carries the permission bits over
                fs::copy(from, to).context("Failed to copy file")?;
                fs::remove_file(from).context("Failed to remove original file")?;
                Ok(())
            }
            Err(e) => Err(e).context("Failed to rename file"),
        }
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn set_permissions_impl(&self, path: &Path, mode: u32) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(mode);
            fs::set_permissions(path, permissions).context("Failed to set permissions")?;
        }
        #[cfg(not(unix))]
        {
            let _ = (path, mode); // Suppress unused warnings on non-Unix
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_file_ops() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bbctl");

        runtime.write(&file_path, b"hello").unwrap();
        assert_eq!(runtime.read(&file_path).unwrap(), b"hello");

        let new_path = dir.path().join("bbctl.bak");
        runtime.rename(&file_path, &new_path).unwrap();
        assert!(!file_path.exists());
        assert_eq!(runtime.read(&new_path).unwrap(), b"hello");
    }

    #[test]
    fn test_rename_overwrites_existing_target() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let from = dir.path().join("bbctl");
        let to = dir.path().join("bbctl.bak");

        runtime.write(&from, b"new").unwrap();
        runtime.write(&to, b"old backup").unwrap();
        runtime.rename(&from, &to).unwrap();

        assert_eq!(runtime.read(&to).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn test_set_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bbctl");
        runtime.write(&file_path, b"#!/bin/sh\n").unwrap();

        runtime.set_permissions(&file_path, 0o755).unwrap();

        let mode = std::fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_real_runtime_errors() {
        let runtime = RealRuntime;
        let missing = std::path::Path::new("/nonexistent/path/bbctl");

        assert!(runtime.read(missing).is_err());
        assert!(runtime.rename(missing, std::path::Path::new("/nonexistent/bbctl.bak")).is_err());
    }
}
