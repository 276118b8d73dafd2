use anyhow::{Context, Result, bail};
use log::{info, warn};
use std::path::Path;
use std::time::Duration;

use super::install::EXECUTABLE_MODE;
use crate::runtime::{CommandSpec, Runtime};

/// Check that the freshly installed binary runs, returning its version output.
///
/// A failed first check re-applies the executable bits and runs a new
/// `--version` invocation once more before giving up.
#[tracing::instrument(skip(runtime))]
pub async fn verify_installed_binary<R: Runtime>(
    runtime: &R,
    install_path: &Path,
    timeout: Duration,
) -> Result<String> {
    let command = CommandSpec::new(install_path)
        .arg("--version")
        .timeout(timeout);

    match version_check(runtime, &command).await {
        Ok(version) => return Ok(version),
        Err(e) => warn!(
            "`{}` failed ({:#}), resetting permissions and retrying",
            command, e
        ),
    }

    runtime
        .set_permissions(install_path, EXECUTABLE_MODE)
        .context("failed to set permissions for bbctl")?;

    version_check(runtime, &command)
        .await
        .context("bbctl is not functioning correctly after update")
}

async fn version_check<R: Runtime>(runtime: &R, command: &CommandSpec) -> Result<String> {
    let output = runtime.run_command(command).await?;
    if !output.success {
        bail!("{}", output.failure_summary());
    }
    let version = output.stdout.trim().to_string();
    info!("Installed binary reports {:?}", version);
    Ok(version)
}
