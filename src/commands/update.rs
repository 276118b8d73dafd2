use anyhow::Result;
use std::sync::Arc;

use crate::build_info::BuildInfo;
use crate::platform::{Platform, PlatformOps, platform_ops_for};
use crate::runtime::Runtime;
use crate::update::Updater;

use super::config::{UpdateConfig, UpdateOptions};

/// Replace the installed bbctl with the latest nightly build.
#[tracing::instrument(skip(runtime, options))]
pub async fn update<R: Runtime + 'static>(
    runtime: R,
    build: BuildInfo,
    options: UpdateOptions,
) -> Result<()> {
    let config = UpdateConfig::new(&runtime, options)?;
    let platform = Platform::detect();
    let runtime = Arc::new(runtime);
    let ops = platform_ops_for(&platform, Arc::clone(&runtime), config.command_timeout);
    run_update(runtime.as_ref(), ops.as_ref(), &config, build, &platform).await
}

#[tracing::instrument(skip(runtime, ops, config))]
async fn run_update<R: Runtime>(
    runtime: &R,
    ops: &dyn PlatformOps,
    config: &UpdateConfig,
    build: BuildInfo,
    platform: &Platform,
) -> Result<()> {
    println!("Updating bbctl {} ({})...", build.version, platform);

    let version = Updater::new(runtime, ops, config).run(platform).await?;

    println!();
    if version.is_empty() {
        println!("bbctl updated.");
    } else {
        println!("bbctl updated: {}", version);
    }
    Ok(())
}
