//! Environment and system information operations.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn home_dir_impl(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn which_impl(&self, name: &str) -> Result<PathBuf> {
        which::which(name).with_context(|| format!("{} not found in PATH", name))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn current_uid_impl(&self) -> u32 {
        #[cfg(unix)]
        return nix::unistd::getuid().as_raw();

        #[cfg(not(unix))]
        return 0;
    }
}
