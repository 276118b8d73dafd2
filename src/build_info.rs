/// Facts about this build, fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    /// Version derived from `git describe` by the build script.
    pub version: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            version: env!("BBCTL_VERSION"),
        }
    }
}
