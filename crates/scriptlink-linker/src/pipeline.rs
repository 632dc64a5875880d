//! Linker pipeline
//!
//! Runs several linkers over one module, `Pre` linkers first, then the
//! primary linker, then `Post` linkers. Each linker sees the set returned by
//! the previous one.

use crate::context::ModuleContext;
use crate::error::LinkError;
use crate::linker::{Linker, LinkerOrder};
use crate::registry::LinkerRegistry;
use scriptlink_artifact::ArtifactSet;

/// Ordered collection of linkers
#[derive(Debug, Default)]
pub struct LinkPipeline {
    linkers: Vec<Box<dyn Linker>>,
}

impl LinkPipeline {
    /// Create new empty pipeline
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pipeline from registry names
    ///
    /// # Errors
    /// - [`LinkError::UnknownLinker`] for a name the registry does not know
    /// - [`LinkError::DuplicatePrimary`] if two primary linkers are named
    pub fn from_names<S: AsRef<str>>(
        registry: &LinkerRegistry,
        names: &[S],
    ) -> Result<Self, LinkError> {
        let mut pipeline = Self::new();
        for name in names {
            let name = name.as_ref();
            let linker = registry
                .create(name)
                .ok_or_else(|| LinkError::UnknownLinker(name.to_string()))?;
            pipeline.push(linker)?;
        }
        Ok(pipeline)
    }

    /// Add a linker
    ///
    /// # Errors
    /// [`LinkError::DuplicatePrimary`] if `linker` is primary and the
    /// pipeline already has a primary linker
    pub fn push(&mut self, linker: Box<dyn Linker>) -> Result<(), LinkError> {
        if linker.order().is_primary() {
            if let Some(existing) = self.primary() {
                return Err(LinkError::DuplicatePrimary {
                    existing: existing.description(),
                    rejected: linker.description(),
                });
            }
        }
        self.linkers.push(linker);
        Ok(())
    }

    /// The primary linker, if any
    #[must_use]
    pub fn primary(&self) -> Option<&dyn Linker> {
        self.linkers
            .iter()
            .map(|linker| &**linker)
            .find(|linker| linker.order().is_primary())
    }

    /// Number of linkers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.linkers.len()
    }

    /// Check if the pipeline has no linkers
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.linkers.is_empty()
    }

    /// Descriptions of the linkers in execution order
    #[must_use]
    pub fn descriptions(&self) -> Vec<&'static str> {
        self.ordered().map(Linker::description).collect()
    }

    /// Run every linker over `artifacts`
    ///
    /// Linkers with the same order run in insertion order. The first failure
    /// aborts the run; `artifacts` is never modified.
    ///
    /// # Errors
    /// Returns the first linker failure
    pub fn run(
        &self,
        context: &ModuleContext,
        artifacts: &ArtifactSet,
    ) -> Result<ArtifactSet, LinkError> {
        let mut current = artifacts.clone();
        for linker in self.ordered() {
            let span = tracing::info_span!(
                "link",
                module = context.module_name(),
                linker = linker.description(),
                order = ?linker.order()
            );
            let _entered = span.enter();

            current = linker.link(context, &current)?;
            tracing::debug!(artifacts = current.len(), "linker finished");
        }
        Ok(current)
    }

    fn ordered(&self) -> impl Iterator<Item = &dyn Linker> {
        let mut ordered: Vec<&dyn Linker> = self.linkers.iter().map(|linker| &**linker).collect();
        ordered.sort_by_key(|linker| linker.order());
        ordered.into_iter()
    }
}
