//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over the system operations
//! the updater performs, enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `env` - Home directory, search path lookup, user id
//! - `fs` - File system operations (read, write, rename, permissions)
//! - `process` - Child process execution with timeouts

mod env;
mod fs;
mod process;

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub use process::{CommandOutput, CommandSpec};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Runtime: Send + Sync {
    // Environment
    fn home_dir(&self) -> Option<PathBuf>;

    /// Locate an executable by name on the search path (`PATH`).
    fn which(&self, name: &str) -> Result<PathBuf>;

    /// Real user id of the current process. Always 0 on non-Unix hosts.
    fn current_uid(&self) -> u32;

    // File System
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Move a file, replacing anything at `to`.
    /// Falls back to copy and remove when the paths are on different filesystems.
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Set file permissions (mode) on Unix systems. No-op on Windows.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;

    // Processes
    /// Run a child process to completion, capturing its output.
    /// Returns Err if the process cannot be spawned or exceeds its timeout;
    /// a non-zero exit is reported through [`CommandOutput::success`].
    async fn run_command(&self, command: &CommandSpec) -> Result<CommandOutput>;
}

pub struct RealRuntime;

#[async_trait]
impl Runtime for RealRuntime {
    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir_impl()
    }

    fn which(&self, name: &str) -> Result<PathBuf> {
        self.which_impl(name)
    }

    fn current_uid(&self) -> u32 {
        self.current_uid_impl()
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.read_impl(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        self.rename_impl(from, to)
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        self.set_permissions_impl(path, mode)
    }

    async fn run_command(&self, command: &CommandSpec) -> Result<CommandOutput> {
        self.run_command_impl(command).await
    }
}
