//! Compilation results and strong names

use crate::artifact::{private, Artifact, ArtifactError, ArtifactKind};
use crate::hash::ContentHash;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Content-derived unique identifier of a compilation result
///
/// Produced upstream and embedded verbatim in linked output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StrongName(String);

impl StrongName {
    /// Wrap an upstream-supplied strong name
    ///
    /// # Errors
    /// Returns error if `name` is empty
    pub fn new(name: impl Into<String>) -> Result<Self, ArtifactError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ArtifactError::EmptyStrongName);
        }
        Ok(Self(name))
    }

    /// Derive a strong name from fragment text
    ///
    /// Upper-case hex of the first 16 bytes of the Blake3 digest over all
    /// fragments, 32 characters long.
    #[must_use]
    pub fn compute<S: AsRef<str>>(fragments: &[S]) -> Self {
        let hash = ContentHash::compute_parts(fragments.iter().map(|f| f.as_ref().as_bytes()));
        Self(hex::encode_upper(&hash.as_bytes()[..16]))
    }

    /// Borrow as str
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StrongName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StrongName {
    type Error = ArtifactError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StrongName> for String {
    fn from(value: StrongName) -> Self {
        value.0
    }
}

/// One compiled permutation of a module
///
/// Carries its strong name and the ordered code fragments generated for it.
/// Fragment count is not checked here; linkers decide what they accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationResult {
    strong_name: StrongName,
    fragments: Vec<String>,
    #[serde(default)]
    permutation_id: u32,
}

impl CompilationResult {
    /// Create a result whose strong name is derived from its fragments
    #[must_use]
    pub fn new(fragments: Vec<String>) -> Self {
        let strong_name = StrongName::compute(&fragments);
        Self::with_strong_name(strong_name, fragments)
    }

    /// Create a result with an upstream-supplied strong name
    #[must_use]
    pub fn with_strong_name(strong_name: StrongName, fragments: Vec<String>) -> Self {
        Self {
            strong_name,
            fragments,
            permutation_id: 0,
        }
    }

    /// Set the permutation id
    #[inline]
    #[must_use]
    pub fn with_permutation_id(mut self, permutation_id: u32) -> Self {
        self.permutation_id = permutation_id;
        self
    }

    /// Strong name of this result
    #[inline]
    #[must_use]
    pub fn strong_name(&self) -> &StrongName {
        &self.strong_name
    }

    /// Code fragments in load order
    #[inline]
    #[must_use]
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Permutation this result was compiled for
    #[inline]
    #[must_use]
    pub fn permutation_id(&self) -> u32 {
        self.permutation_id
    }
}

impl private::Sealed for CompilationResult {}

impl ArtifactKind for CompilationResult {
    const TYPE_ID: &'static str = "compilation";

    fn from_artifact(artifact: &Artifact) -> Option<&Self> {
        match artifact {
            Artifact::Compilation(result) => Some(result),
            _ => None,
        }
    }
}
