use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;
use std::time::Duration;

use crate::platform::DEFAULT_DOWNLOAD_BASE_URL;
use crate::runtime::Runtime;

pub const DEFAULT_BINARY_NAME: &str = "bbctl";
pub const DEFAULT_INSTALL_PATH: &str = "/usr/local/bin/bbctl";
pub const DEFAULT_BACKUP_FILE_NAME: &str = "bbctl.bak";
pub const DEFAULT_SERVICE: &str = "bbctl";
/// Oldest macOS release the bridges are supported on.
pub const DEFAULT_MINIMUM_MACOS_VERSION: &str = "12.0.0";
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 600;

/// Options for the update command, as given on the command line.
/// Unset values fall back to the defaults above.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    pub install_path: Option<PathBuf>,
    pub backup_path: Option<PathBuf>,
    pub download_base_url: Option<String>,
    pub service: Option<String>,
    pub skip_restart: bool,
    pub command_timeout: Option<u64>,
    pub download_timeout: Option<u64>,
}

/// Fully resolved settings for one update run.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateConfig {
    pub binary_name: String,
    pub install_path: PathBuf,
    pub backup_path: PathBuf,
    pub download_base_url: String,
    pub service: String,
    pub minimum_macos_version: String,
    pub command_timeout: Duration,
    pub download_timeout: Duration,
    pub skip_restart: bool,
}

impl UpdateConfig {
    pub fn new<R: Runtime>(runtime: &R, options: UpdateOptions) -> Result<Self> {
        let backup_path = match options.backup_path {
            Some(path) => path,
            None => runtime
                .home_dir()
                .context("Could not determine home directory for the backup path")?
                .join(DEFAULT_BACKUP_FILE_NAME),
        };

        let config = Self {
            binary_name: DEFAULT_BINARY_NAME.to_string(),
            install_path: options
                .install_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INSTALL_PATH)),
            backup_path,
            download_base_url: options
                .download_base_url
                .unwrap_or_else(|| DEFAULT_DOWNLOAD_BASE_URL.to_string()),
            service: options
                .service
                .unwrap_or_else(|| DEFAULT_SERVICE.to_string()),
            minimum_macos_version: DEFAULT_MINIMUM_MACOS_VERSION.to_string(),
            command_timeout: Duration::from_secs(
                options
                    .command_timeout
                    .unwrap_or(DEFAULT_COMMAND_TIMEOUT_SECS),
            ),
            download_timeout: Duration::from_secs(
                options
                    .download_timeout
                    .unwrap_or(DEFAULT_DOWNLOAD_TIMEOUT_SECS),
            ),
            skip_restart: options.skip_restart,
        };
        debug!("Resolved update config: {:?}", config);
        Ok(config)
    }

    #[cfg(test)]
    pub fn for_test(root: &std::path::Path) -> Self {
        Self {
            binary_name: DEFAULT_BINARY_NAME.to_string(),
            install_path: root.join("usr/local/bin/bbctl"),
            backup_path: root.join("home/user/bbctl.bak"),
            download_base_url: DEFAULT_DOWNLOAD_BASE_URL.to_string(),
            service: DEFAULT_SERVICE.to_string(),
            minimum_macos_version: DEFAULT_MINIMUM_MACOS_VERSION.to_string(),
            command_timeout: Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
            download_timeout: Duration::from_secs(DEFAULT_DOWNLOAD_TIMEOUT_SECS),
            skip_restart: false,
        }
    }
}
