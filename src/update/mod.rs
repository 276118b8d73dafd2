//! The bbctl self-update workflow.
//!
//! Stages run strictly in order and the first failure aborts the rest:
//!
//! 1. resolve the download URL for the platform
//! 2. preflight (macOS only): developer tools and OS version
//! 3. back up the installed binary
//! 4. download and install the new binary
//! 5. verify it runs, repairing permissions once
//! 6. restart the bridge manager service
//!
//! Each stage wraps its error with a short description of what failed.

mod backup;
mod install;
mod preflight;
mod verify;

use anyhow::{Context, Result};
use log::info;

use crate::commands::config::UpdateConfig;
use crate::platform::{Platform, PlatformOps, resolve_download_url};
use crate::runtime::Runtime;

pub use backup::backup_current_binary;
pub use install::{EXECUTABLE_MODE, download_and_install};
pub use preflight::{check_minimum_version, run_preflight};
pub use verify::verify_installed_binary;

pub struct Updater<'a, R: Runtime> {
    runtime: &'a R,
    ops: &'a dyn PlatformOps,
    config: &'a UpdateConfig,
}

impl<'a, R: Runtime> Updater<'a, R> {
    pub fn new(runtime: &'a R, ops: &'a dyn PlatformOps, config: &'a UpdateConfig) -> Self {
        Self {
            runtime,
            ops,
            config,
        }
    }

    /// Run every stage for `platform`. Returns the version the new binary reports.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self, platform: &Platform) -> Result<String> {
        let config = self.config;

        let url = resolve_download_url(platform, &config.download_base_url)?;
        info!("Resolved download URL {}", url);

        if self.ops.preflight_required() {
            run_preflight(self.ops, &config.minimum_macos_version).await?;
        }

        let previous =
            backup_current_binary(self.runtime, &config.binary_name, &config.backup_path)
                .context("failed to back up current bbctl binary")?;
        println!(
            "   backed up {} to {}",
            previous.display(),
            config.backup_path.display()
        );

        download_and_install(
            self.runtime,
            &url,
            &config.install_path,
            &config.binary_name,
            config.download_timeout,
        )
        .await?;
        println!("   installed {}", config.install_path.display());

        let version =
            verify_installed_binary(self.runtime, &config.install_path, config.command_timeout)
                .await?;

        if config.skip_restart {
            println!("   skipping restart of {}", config.service);
        } else {
            self.ops
                .restart_service(&config.service)
                .await
                .context("failed to restart bridge manager service")?;
            println!("   restarted {}", config.service);
        }

        Ok(version)
    }
}
