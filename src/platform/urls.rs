use anyhow::{Result, bail};

use super::Platform;

/// Where nightly builds of bbctl are published.
pub const DEFAULT_DOWNLOAD_BASE_URL: &str =
    "https://nightly.link/beeper/bridge-manager/workflows/go.yaml/main";

/// Supported (os, arch) pairs and the artifact published for each.
/// Anything not listed here is unsupported.
pub const ARTIFACTS: &[((&str, &str), &str)] = &[
    (("darwin", "amd64"), "bbctl-macos-amd64.zip"),
    (("darwin", "arm64"), "bbctl-macos-arm64.zip"),
    (("linux", "amd64"), "bbctl-linux-amd64.zip"),
    (("linux", "arm64"), "bbctl-linux-arm64.zip"),
];

/// Look up the artifact name for a platform.
pub fn artifact_for(platform: &Platform) -> Option<&'static str> {
    ARTIFACTS
        .iter()
        .find(|((os, arch), _)| *os == platform.os && *arch == platform.arch)
        .map(|(_, artifact)| *artifact)
}

/// Resolve the download URL for a platform against `base_url`.
pub fn resolve_download_url(platform: &Platform, base_url: &str) -> Result<String> {
    match artifact_for(platform) {
        Some(artifact) => Ok(format!("{}/{}", base_url.trim_end_matches('/'), artifact)),
        None => bail!(
            "unsupported OS or architecture: {}/{}",
            platform.os,
            platform.arch
        ),
    }
}
