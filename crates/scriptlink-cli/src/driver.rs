//! Link a manifest and write the results
//!
//! The driver owns everything the linkers do not: reading
//! inputs, resolving linker names, and putting emitted files on disk.

use crate::config::DriverConfig;
use crate::manifest::BuildManifest;
use anyhow::{bail, Context};
use scriptlink_artifact::{ArtifactSet, EmittedArtifact};
use scriptlink_linker::{LinkPipeline, LinkerRegistry};
use std::path::{Component, Path, PathBuf};

/// What a driver run wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSummary {
    /// Files written, in artifact order
    pub written: Vec<PathBuf>,
    /// Private artifacts not written because no extra directory is configured
    pub skipped: Vec<String>,
}

/// Link one module and write its emitted artifacts
///
/// # Errors
/// Returns error if the manifest is invalid, a linker name is unknown,
/// linking fails, or a file cannot be written. Nothing is written when
/// linking fails.
pub fn link_module(
    manifest: &BuildManifest,
    config: &DriverConfig,
    registry: &LinkerRegistry,
) -> anyhow::Result<LinkSummary> {
    let context = manifest.context(config.output_compact)?;
    let artifacts = manifest.artifact_set()?;
    let pipeline = LinkPipeline::from_names(registry, config.linkers.as_slice())?;

    tracing::info!(
        module = context.module_name(),
        linkers = ?pipeline.descriptions(),
        artifacts = artifacts.len(),
        "linking module"
    );
    let linked = pipeline
        .run(&context, &artifacts)
        .with_context(|| format!("linking module {} failed", context.module_name()))?;

    write_emitted(&linked, config)
}

/// Write every emitted artifact in `linked` according to its visibility
///
/// # Errors
/// Returns error if a path escapes its directory or a write fails
pub fn write_emitted(linked: &ArtifactSet, config: &DriverConfig) -> anyhow::Result<LinkSummary> {
    let mut summary = LinkSummary::default();
    for emitted in linked.find::<EmittedArtifact>() {
        let base = if emitted.is_private() {
            match &config.extra_dir {
                Some(dir) => dir,
                None => {
                    tracing::info!(path = emitted.partial_path(), "skipping private artifact");
                    summary.skipped.push(emitted.partial_path().to_string());
                    continue;
                }
            }
        } else {
            &config.out_dir
        };

        let target = resolve_partial_path(base, emitted.partial_path())?;
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(&target, emitted.contents())
            .with_context(|| format!("writing {}", target.display()))?;
        tracing::info!(
            path = %target.display(),
            bytes = emitted.contents().len(),
            hash = %emitted.content_hash().short(),
            "wrote artifact"
        );
        summary.written.push(target);
    }
    Ok(summary)
}

/// Join `partial_path` onto `base`, refusing anything that leaves `base`
fn resolve_partial_path(base: &Path, partial_path: &str) -> anyhow::Result<PathBuf> {
    let relative = Path::new(partial_path);
    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
    {
        bail!("artifact path {partial_path} escapes the output directory");
    }
    Ok(base.join(relative))
}
