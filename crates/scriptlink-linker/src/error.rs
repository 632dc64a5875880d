//! Error types for linking
//!
//! Every variant is terminal for the link call that produced it: inputs are
//! fully materialized, so nothing is retried.

use scriptlink_artifact::ArtifactError;

/// Link failure
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Zero or several compilation results where exactly one is required
    #[error(
        "the module must have exactly one distinct permutation when using the \
         {linker} linker, found {count}"
    )]
    PermutationCount {
        /// Description of the linker that rejected the input
        linker: &'static str,
        /// Number of compilation results present
        count: usize,
    },

    /// A compilation result with zero or several fragments
    #[error(
        "the module must have exactly one fragment when using the {linker} linker, \
         found {count}"
    )]
    FragmentCount {
        /// Description of the linker that rejected the input
        linker: &'static str,
        /// Number of fragments in the result
        count: usize,
    },

    /// An extension point this linker does not provide was invoked
    #[error("{operation} is not supported by the {linker} linker")]
    Unsupported {
        /// Description of the linker
        linker: &'static str,
        /// Name of the extension point
        operation: &'static str,
    },

    /// No linker registered under this name
    #[error("unknown linker: {0}")]
    UnknownLinker(String),

    /// A pipeline can hold one primary linker
    #[error("pipeline already has primary linker {existing}, cannot add {rejected}")]
    DuplicatePrimary {
        /// Description of the primary linker already present
        existing: &'static str,
        /// Description of the linker that was refused
        rejected: &'static str,
    },

    /// Module context rejected at construction
    #[error("invalid module context: {0}")]
    InvalidContext(String),

    /// Artifact construction failed
    #[error("artifact error: {0}")]
    Artifact(#[from] ArtifactError),
}

impl LinkError {
    /// Check if the input violated a cardinality rule
    #[inline]
    #[must_use]
    pub fn is_cardinality(&self) -> bool {
        matches!(
            self,
            Self::PermutationCount { .. } | Self::FragmentCount { .. }
        )
    }

    /// Check if the host called something the linker does not support
    ///
    /// These are programming errors in the caller, not bad input data.
    #[inline]
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::Unsupported { .. } | Self::DuplicatePrimary { .. }
        )
    }
}
