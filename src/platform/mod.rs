//! Platform detection, download URL resolution and host operations
//!
//! This module detects the current platform (OS and architecture), maps it
//! to the nightly artifact published for it, and provides the host-specific
//! commands (developer tools, OS version, service manager) the updater needs.

mod detection;
mod ops;
mod urls;

pub use detection::Platform;
#[cfg(test)]
pub use ops::MockPlatformOps;
pub use ops::{LinuxOps, MacOsOps, PlatformOps, platform_ops_for};
pub use urls::{ARTIFACTS, DEFAULT_DOWNLOAD_BASE_URL, artifact_for, resolve_download_url};
