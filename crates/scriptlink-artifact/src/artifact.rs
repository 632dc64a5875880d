//! Artifact enum and kind trait
//!
//! Defines [`Artifact`], the closed set of artifact kinds exchanged between
//! the compilation and linking stages, and the sealed [`ArtifactKind`] trait
//! used to query an [`ArtifactSet`](crate::ArtifactSet) by kind.

use crate::compilation::CompilationResult;
use crate::emitted::EmittedArtifact;
use crate::hash::ContentHash;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display, Formatter};

/// Trait implemented by every concrete artifact kind
///
/// This trait is **sealed** - only kinds defined within this crate can
/// implement it, which keeps [`Artifact`] exhaustive.
pub trait ArtifactKind: Send + Sync + 'static + Debug + private::Sealed {
    /// Artifact kind identifier
    ///
    /// Lowercase, stable, and unique across kinds.
    const TYPE_ID: &'static str;

    /// Borrow this kind out of a type-erased artifact
    fn from_artifact(artifact: &Artifact) -> Option<&Self>;
}

pub(crate) mod private {
    /// Sealed trait marker
    pub trait Sealed {}
}

/// Errors related to artifact construction
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// Strong names must carry at least one character
    #[error("strong name must not be empty")]
    EmptyStrongName,

    /// Emitted artifacts need a path to be written to
    #[error("emitted artifact path must not be empty")]
    EmptyPartialPath,

    /// Opaque artifacts need a type id and a name
    #[error("opaque artifact is missing its {0}")]
    IncompleteOpaque(&'static str),

    /// Opaque artifacts may not claim a built-in kind's type id
    #[error("type id '{0}' is reserved")]
    ReservedTypeId(String),
}

/// An artifact produced upstream that this workspace does not interpret
///
/// Passed through linking unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOpaque")]
pub struct OpaqueArtifact {
    type_id: String,
    name: String,
    hash: ContentHash,
}

#[derive(Deserialize)]
struct RawOpaque {
    type_id: String,
    name: String,
    hash: ContentHash,
}

impl TryFrom<RawOpaque> for OpaqueArtifact {
    type Error = ArtifactError;

    fn try_from(raw: RawOpaque) -> Result<Self, Self::Error> {
        Self::new(raw.type_id, raw.name, raw.hash)
    }
}

impl OpaqueArtifact {
    /// Create an opaque artifact
    ///
    /// # Errors
    /// Returns error if `type_id` or `name` is empty
    pub fn new(
        type_id: impl Into<String>,
        name: impl Into<String>,
        hash: ContentHash,
    ) -> Result<Self, ArtifactError> {
        let type_id = type_id.into();
        let name = name.into();
        if type_id.is_empty() {
            return Err(ArtifactError::IncompleteOpaque("type id"));
        }
        if type_id == CompilationResult::TYPE_ID || type_id == EmittedArtifact::TYPE_ID {
            return Err(ArtifactError::ReservedTypeId(type_id));
        }
        if name.is_empty() {
            return Err(ArtifactError::IncompleteOpaque("name"));
        }
        Ok(Self {
            type_id,
            name,
            hash,
        })
    }

    /// Upstream type identifier
    #[inline]
    #[must_use]
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Upstream name, unique within its type
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hash of the upstream contents
    #[inline]
    #[must_use]
    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }
}

/// Identity of an artifact within an [`ArtifactSet`](crate::ArtifactSet)
///
/// Ordered by type id first, then by the kind-specific identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactKey {
    type_id: String,
    identity: String,
}

impl ArtifactKey {
    /// Build a key from its parts
    #[inline]
    #[must_use]
    pub fn new(type_id: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            identity: identity.into(),
        }
    }

    /// Type id component
    #[inline]
    #[must_use]
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Identity component
    #[inline]
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }
}

impl Display for ArtifactKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_id, self.identity)
    }
}

/// A build artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    /// One compiled permutation
    Compilation(CompilationResult),

    /// A named output blob
    Emitted(EmittedArtifact),

    /// Anything else, carried through untouched
    Opaque(OpaqueArtifact),
}

impl Artifact {
    /// Kind identifier of the wrapped artifact
    #[must_use]
    pub fn type_id(&self) -> &str {
        match self {
            Self::Compilation(_) => CompilationResult::TYPE_ID,
            Self::Emitted(_) => EmittedArtifact::TYPE_ID,
            Self::Opaque(opaque) => opaque.type_id(),
        }
    }

    /// Identity used for set membership
    #[must_use]
    pub fn key(&self) -> ArtifactKey {
        match self {
            Self::Compilation(result) => {
                ArtifactKey::new(CompilationResult::TYPE_ID, result.strong_name().as_str())
            }
            Self::Emitted(emitted) => {
                ArtifactKey::new(EmittedArtifact::TYPE_ID, emitted.partial_path())
            }
            Self::Opaque(opaque) => ArtifactKey::new(opaque.type_id(), opaque.name()),
        }
    }
}

impl From<CompilationResult> for Artifact {
    fn from(value: CompilationResult) -> Self {
        Self::Compilation(value)
    }
}

impl From<EmittedArtifact> for Artifact {
    fn from(value: EmittedArtifact) -> Self {
        Self::Emitted(value)
    }
}

impl From<OpaqueArtifact> for Artifact {
    fn from(value: OpaqueArtifact) -> Self {
        Self::Opaque(value)
    }
}
