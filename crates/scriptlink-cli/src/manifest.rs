//! Build manifest
//!
//! JSON description of what the compilation stage produced for one module.
//!
//! ```json
//! {
//!   "module_name": "App",
//!   "toolchain_version": "2.9.0",
//!   "results": [{ "strong_name": "ABCD1234", "fragments": ["alert(1);"] }],
//!   "artifacts": []
//! }
//! ```

use anyhow::Context;
use scriptlink_artifact::{Artifact, ArtifactError, ArtifactSet, CompilationResult, StrongName};
use scriptlink_linker::{LinkError, ModuleContext};
use serde::Deserialize;
use std::path::Path;

/// One compilation result as listed in a manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestResult {
    /// Strong name; derived from the fragments when absent
    #[serde(default)]
    pub strong_name: Option<String>,
    /// Code fragments in load order
    pub fragments: Vec<String>,
    /// Permutation the result was compiled for
    #[serde(default)]
    pub permutation_id: u32,
}

impl ManifestResult {
    fn into_result(self) -> Result<CompilationResult, ArtifactError> {
        let result = match self.strong_name {
            Some(name) => CompilationResult::with_strong_name(StrongName::new(name)?, self.fragments),
            None => CompilationResult::new(self.fragments),
        };
        Ok(result.with_permutation_id(self.permutation_id))
    }
}

/// What the compilation stage produced for one module
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildManifest {
    /// Module name
    pub module_name: String,
    /// Toolchain version; the linker's own version when absent
    #[serde(default)]
    pub toolchain_version: Option<String>,
    /// Compilation results
    #[serde(default)]
    pub results: Vec<ManifestResult>,
    /// Other upstream artifacts, passed through
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl BuildManifest {
    /// Load from a JSON file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading manifest {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parsing manifest {}", path.display()))
    }

    /// Parse from JSON text
    ///
    /// # Errors
    /// Returns error if the text is not a valid manifest
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Module context for linking
    ///
    /// # Errors
    /// Returns error if the module name is empty
    pub fn context(&self, output_compact: bool) -> Result<ModuleContext, LinkError> {
        let context = ModuleContext::new(self.module_name.clone())?.with_output_compact(output_compact);
        Ok(match &self.toolchain_version {
            Some(version) => context.with_toolchain_version(version.clone()),
            None => context,
        })
    }

    /// All artifacts the manifest describes
    ///
    /// A result whose strong name repeats an earlier one is dropped with a
    /// warning.
    ///
    /// # Errors
    /// Returns error if a listed strong name is empty
    pub fn artifact_set(&self) -> Result<ArtifactSet, ArtifactError> {
        let mut set = ArtifactSet::new();
        for entry in &self.results {
            let result = entry.clone().into_result()?;
            let strong_name = result.strong_name().clone();
            if !set.add(result) {
                tracing::warn!(strong_name = %strong_name, "duplicate compilation result ignored");
            }
        }
        for artifact in &self.artifacts {
            if !set.add(artifact.clone()) {
                tracing::warn!(key = %artifact.key(), "duplicate artifact ignored");
            }
        }
        Ok(set)
    }
}
