//! Linker trait and core types
//!
//! Provides the [`Linker`] trait: a transform from an [`ArtifactSet`] to an
//! augmented [`ArtifactSet`] for one module.

use crate::context::ModuleContext;
use crate::error::LinkError;
use scriptlink_artifact::ArtifactSet;

/// A linking step
///
/// # Contract
/// - `link()` must not mutate its input; it returns a new set
/// - `link()` must be deterministic for identical inputs
/// - On failure no partial set is returned
pub trait Linker: Send + Sync + std::fmt::Debug {
    /// Human-readable name, used in diagnostics
    fn description(&self) -> &'static str;

    /// Position of this linker within a pipeline
    fn order(&self) -> LinkerOrder;

    /// Link the module's artifacts
    ///
    /// # Returns
    /// - `Ok(ArtifactSet)` holding the input artifacts plus anything emitted
    /// - `Err(LinkError)` if the artifacts cannot be linked
    fn link(&self, context: &ModuleContext, artifacts: &ArtifactSet)
        -> Result<ArtifactSet, LinkError>;
}

/// Where a linker runs relative to others
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LinkerOrder {
    /// Before the primary linker
    Pre,

    /// The linker that produces the module's entry point
    Primary,

    /// After the primary linker
    Post,
}

impl LinkerOrder {
    /// Check if this is the primary slot
    #[inline]
    #[must_use]
    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Primary)
    }
}
