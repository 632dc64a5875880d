//! Emitted artifacts
//!
//! An [`EmittedArtifact`] is a named, immutable blob that a deployment step
//! writes out. Linkers create them; nothing mutates them afterwards.

use crate::artifact::{private, Artifact, ArtifactError, ArtifactKind};
use crate::hash::ContentHash;
use serde::{Deserialize, Serialize};

/// Whether an emitted artifact is deployed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Served to clients
    #[default]
    Public,

    /// Kept alongside the build, never served
    Private,
}

/// A named output blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEmitted")]
pub struct EmittedArtifact {
    partial_path: String,
    contents: Vec<u8>,
    visibility: Visibility,
}

#[derive(Deserialize)]
struct RawEmitted {
    partial_path: String,
    contents: Vec<u8>,
    #[serde(default)]
    visibility: Visibility,
}

impl TryFrom<RawEmitted> for EmittedArtifact {
    type Error = ArtifactError;

    fn try_from(raw: RawEmitted) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.partial_path, raw.contents)?.with_visibility(raw.visibility))
    }
}

impl EmittedArtifact {
    /// Create a public artifact
    ///
    /// # Errors
    /// Returns error if `partial_path` is empty
    pub fn new(
        partial_path: impl Into<String>,
        contents: impl Into<Vec<u8>>,
    ) -> Result<Self, ArtifactError> {
        let partial_path = partial_path.into();
        if partial_path.is_empty() {
            return Err(ArtifactError::EmptyPartialPath);
        }
        Ok(Self {
            partial_path,
            contents: contents.into(),
            visibility: Visibility::Public,
        })
    }

    /// Set visibility
    #[inline]
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Path relative to the module output directory
    #[inline]
    #[must_use]
    pub fn partial_path(&self) -> &str {
        &self.partial_path
    }

    /// Raw contents
    #[inline]
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Contents as UTF-8 text, if they are text
    #[inline]
    #[must_use]
    pub fn contents_as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.contents).ok()
    }

    /// Visibility of this artifact
    #[inline]
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Shorthand for `visibility() == Visibility::Private`
    #[inline]
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }

    /// Blake3 hash of the contents
    #[inline]
    #[must_use]
    pub fn content_hash(&self) -> ContentHash {
        ContentHash::compute(&self.contents)
    }
}

impl private::Sealed for EmittedArtifact {}

impl ArtifactKind for EmittedArtifact {
    const TYPE_ID: &'static str = "emitted";

    fn from_artifact(artifact: &Artifact) -> Option<&Self> {
        match artifact {
            Artifact::Emitted(emitted) => Some(emitted),
            _ => None,
        }
    }
}
