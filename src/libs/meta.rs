//! Package metadata generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

/// `name vversion` line used in the startup log.
pub fn banner() -> String {
    format!("{} v{}", APP_METADATA_NAME, APP_METADATA_VERSION)
}
