//! Version information.

/// The crate version.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Version string with the target platform, logged at startup.
#[must_use]
pub fn full_version() -> String {
    format!(
        "exprcalc {} ({}-{})",
        version(),
        std::env::consts::ARCH,
        std::env::consts::OS
    )
}
