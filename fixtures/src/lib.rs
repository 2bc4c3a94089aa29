//! Fixture patch clients for the integration tests, built by `build.rs`.

/// Exports `Patch`.
pub const PATCH_CLIENT: &str = env!("PATCH_FIXTURE_CLIENT");
/// Loads fine, but has no `Patch` export.
pub const NO_PATCH_CLIENT: &str = env!("PATCH_FIXTURE_NO_PATCH");
/// Environment variable naming the file the fixtures record their calls and
/// unloading in.
pub const OUTPUT_VAR: &str = "PATCH_FIXTURE_OUTPUT";
