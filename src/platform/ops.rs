//! Host-specific operations the updater shells out for.
//!
//! Each supported OS family gets one implementation of [`PlatformOps`];
//! [`platform_ops_for`] picks it once at startup.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use std::time::Duration;

use crate::runtime::{CommandSpec, Runtime};

use super::Platform;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformOps: Send + Sync {
    /// Whether the developer-tools and OS-version checks run before updating.
    fn preflight_required(&self) -> bool;

    /// Install the developer tooling the bridges need. Already installed is success.
    async fn install_prerequisites(&self) -> Result<()>;

    /// Version string of the host operating system.
    async fn os_version(&self) -> Result<String>;

    /// Ask the host service manager to restart `service`.
    async fn restart_service(&self, service: &str) -> Result<()>;
}

/// Select the operations matching `platform`.
pub fn platform_ops_for<R: Runtime + 'static>(
    platform: &Platform,
    runtime: Arc<R>,
    timeout: Duration,
) -> Box<dyn PlatformOps> {
    if platform.is_darwin() {
        Box::new(MacOsOps::new(runtime, timeout))
    } else {
        Box::new(LinuxOps::new(runtime, timeout))
    }
}

/// Run `command` and return its trimmed stdout, failing on a non-zero exit.
async fn run_checked<R: Runtime>(runtime: &R, command: &CommandSpec) -> Result<String> {
    let output = runtime.run_command(command).await?;
    if !output.success {
        bail!("`{}` failed with {}", command, output.failure_summary());
    }
    Ok(output.stdout.trim().to_string())
}

/// macOS: Xcode Command Line Tools, `sw_vers` and launchd.
pub struct MacOsOps<R: Runtime> {
    runtime: Arc<R>,
    timeout: Duration,
}

impl<R: Runtime> MacOsOps<R> {
    pub fn new(runtime: Arc<R>, timeout: Duration) -> Self {
        Self { runtime, timeout }
    }
}

#[async_trait]
impl<R: Runtime> PlatformOps for MacOsOps<R> {
    fn preflight_required(&self) -> bool {
        true
    }

    #[tracing::instrument(skip(self))]
    async fn install_prerequisites(&self) -> Result<()> {
        let command = CommandSpec::new("xcode-select")
            .arg("--install")
            .timeout(self.timeout);
        let output = self.runtime.run_command(&command).await?;

        if output.success {
            return Ok(());
        }
        if output.combined().contains("already installed") {
            debug!("Xcode Command Line Tools already installed");
            return Ok(());
        }
        bail!("`{}` failed with {}", command, output.failure_summary())
    }

    #[tracing::instrument(skip(self))]
    async fn os_version(&self) -> Result<String> {
        let command = CommandSpec::new("sw_vers")
            .arg("-productVersion")
            .timeout(self.timeout);
        let version = run_checked(self.runtime.as_ref(), &command).await?;
        if version.is_empty() {
            bail!("`{}` printed no version", command);
        }
        Ok(version)
    }

    #[tracing::instrument(skip(self))]
    async fn restart_service(&self, service: &str) -> Result<()> {
        let target = format!("gui/{}/{}", self.runtime.current_uid(), service);
        let command = CommandSpec::new("launchctl")
            .args(["kickstart", "-k"])
            .arg(target)
            .timeout(self.timeout);
        run_checked(self.runtime.as_ref(), &command)
            .await
            .with_context(|| format!("launchd could not restart {}", service))?;
        Ok(())
    }
}

/// Linux: systemd, nothing to preflight.
pub struct LinuxOps<R: Runtime> {
    runtime: Arc<R>,
    timeout: Duration,
}

impl<R: Runtime> LinuxOps<R> {
    pub fn new(runtime: Arc<R>, timeout: Duration) -> Self {
        Self { runtime, timeout }
    }
}

#[async_trait]
impl<R: Runtime> PlatformOps for LinuxOps<R> {
    fn preflight_required(&self) -> bool {
        false
    }

    async fn install_prerequisites(&self) -> Result<()> {
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn os_version(&self) -> Result<String> {
        let command = CommandSpec::new("uname").arg("-r").timeout(self.timeout);
        run_checked(self.runtime.as_ref(), &command).await
    }

    #[tracing::instrument(skip(self))]
    async fn restart_service(&self, service: &str) -> Result<()> {
        let command = CommandSpec::new("systemctl")
            .args(["restart", service])
            .timeout(self.timeout);
        run_checked(self.runtime.as_ref(), &command)
            .await
            .with_context(|| format!("systemd could not restart {}", service))?;
        Ok(())
    }
}
