//! scriptlink build driver
//!
//! Reads a module's build manifest, runs the configured linkers, and writes
//! the emitted artifacts to disk. Linking itself lives in
//! `scriptlink-linker`; this crate only handles files, configuration, and
//! logging setup.

#![warn(missing_docs)]

pub mod config;
pub mod driver;
pub mod manifest;

pub use config::DriverConfig;
pub use driver::{link_module, write_emitted, LinkSummary};
pub use manifest::{BuildManifest, ManifestResult};

/// Install the global tracing subscriber
///
/// Filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
