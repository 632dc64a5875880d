//! Driver configuration
//!
//! Loaded from an optional TOML file; command-line flags override it.

use anyhow::Context;
use scriptlink_linker::SingleScriptLinker;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Build driver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Directory public artifacts are written to
    pub out_dir: PathBuf,
    /// Directory private artifacts are written to; skipped when unset
    pub extra_dir: Option<PathBuf>,
    /// Omit optional whitespace from generated scripts
    pub output_compact: bool,
    /// Registry names of the linkers to run
    pub linkers: Vec<String>,
}

impl DriverConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns error if the text is not a valid configuration
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// With output directory
    #[inline]
    #[must_use]
    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    /// With directory for private artifacts
    #[inline]
    #[must_use]
    pub fn with_extra_dir(mut self, extra_dir: impl Into<PathBuf>) -> Self {
        self.extra_dir = Some(extra_dir.into());
        self
    }

    /// With output compactness
    #[inline]
    #[must_use]
    pub fn with_output_compact(mut self, compact: bool) -> Self {
        self.output_compact = compact;
        self
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("war"),
            extra_dir: None,
            output_compact: true,
            linkers: vec![SingleScriptLinker::NAME.to_string()],
        }
    }
}
