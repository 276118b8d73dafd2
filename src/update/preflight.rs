//! macOS preflight: developer tools and minimum OS version.

use anyhow::{Context, Result, bail};
use log::debug;
use std::cmp::Ordering;

use crate::platform::PlatformOps;

/// Install prerequisites and compare the OS version against `minimum`.
///
/// Returns the warning printed for an outdated OS, if any. Only a failure to
/// install prerequisites or to read the version is an error.
#[tracing::instrument(skip(ops))]
pub async fn run_preflight(ops: &dyn PlatformOps, minimum: &str) -> Result<Option<String>> {
    ops.install_prerequisites()
        .await
        .context("failed to install Xcode Command Line Tools")?;

    let version = ops.os_version().await.context("failed to check macOS version")?;
    debug!("macOS version {}", version);

    let warning =
        check_minimum_version(&version, minimum).context("failed to check macOS version")?;
    if let Some(message) = &warning {
        eprintln!("   warning: {}", message);
    }
    Ok(warning)
}

/// Compare `version` with `minimum`, returning a warning if it is older.
pub fn check_minimum_version(version: &str, minimum: &str) -> Result<Option<String>> {
    let current = parse_version(version)?;
    let required = parse_version(minimum)?;

    if compare_versions(&current, &required) == Ordering::Less {
        Ok(Some(format!(
            "macOS version {} is older than {}. Please consider upgrading.",
            version, minimum
        )))
    } else {
        Ok(None)
    }
}

/// Parse a dotted numeric version such as `14.4.1`.
fn parse_version(version: &str) -> Result<Vec<u64>> {
    let trimmed = version.trim();
    if trimmed.is_empty() {
        bail!("empty version string");
    }
    trimmed
        .split('.')
        .map(|part| {
            part.parse::<u64>()
                .with_context(|| format!("malformed version {:?}", trimmed))
        })
        .collect()
}

/// Component-wise comparison; missing trailing components count as zero.
fn compare_versions(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
