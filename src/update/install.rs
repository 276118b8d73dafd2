use anyhow::{Context, Result, bail};
use log::{debug, info};
use std::path::Path;
use std::time::Duration;

use crate::archive;
use crate::runtime::{CommandSpec, Runtime};

/// rwxr-xr-x
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Download `url` to `install_path`, unpack it if it is an archive, and make it executable.
#[tracing::instrument(skip(runtime))]
pub async fn download_and_install<R: Runtime>(
    runtime: &R,
    url: &str,
    install_path: &Path,
    binary_name: &str,
    timeout: Duration,
) -> Result<()> {
    download(runtime, url, install_path, timeout)
        .await
        .context("failed to download bbctl")?;

    unpack_if_archive(runtime, install_path, binary_name)
        .context("failed to unpack downloaded bbctl archive")?;

    runtime
        .set_permissions(install_path, EXECUTABLE_MODE)
        .context("failed to set permissions for bbctl")?;
    Ok(())
}

/// Fetch `url` with curl, following redirects.
async fn download<R: Runtime>(
    runtime: &R,
    url: &str,
    dest: &Path,
    timeout: Duration,
) -> Result<()> {
    info!("Downloading {} to {:?}...", url, dest);

    let command = CommandSpec::new("curl")
        .args(["-fsSL", "-o"])
        .arg(dest.to_string_lossy())
        .arg(url)
        .timeout(timeout);
    let output = runtime.run_command(&command).await?;
    if !output.success {
        bail!("curl failed with {}", output.failure_summary());
    }

    info!("Download complete.");
    Ok(())
}

/// Replace a downloaded zip archive at `path` with the executable inside it.
fn unpack_if_archive<R: Runtime>(runtime: &R, path: &Path, binary_name: &str) -> Result<()> {
    let bytes = runtime.read(path)?;
    if !archive::is_zip(&bytes) {
        debug!("{:?} is not an archive, installing as is", path);
        return Ok(());
    }

    debug!("Unpacking {} from zip archive", binary_name);
    let binary = archive::extract_binary(&bytes, binary_name)?;
    runtime.write(path, &binary)
}
