//! Artifact sets
//!
//! Provides [`ArtifactSet`], the collection a linker consumes and returns.

use crate::artifact::{Artifact, ArtifactKey, ArtifactKind};
use std::collections::btree_map::{self, BTreeMap};

/// Collection of artifacts keyed by identity
///
/// # Invariants
/// - At most one artifact per [`ArtifactKey`]
/// - Iteration follows key order, so it is deterministic regardless of
///   insertion order
///
/// Cloning produces an independent copy; linkers clone their input and
/// return the augmented copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: BTreeMap<ArtifactKey, Artifact>,
}

impl ArtifactSet {
    /// Create new empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an artifact
    ///
    /// Returns `false` and keeps the existing artifact if one with the same
    /// key is already present.
    pub fn add(&mut self, artifact: impl Into<Artifact>) -> bool {
        let artifact = artifact.into();
        match self.artifacts.entry(artifact.key()) {
            btree_map::Entry::Occupied(_) => false,
            btree_map::Entry::Vacant(slot) => {
                slot.insert(artifact);
                true
            }
        }
    }

    /// Insert an artifact, returning the one it displaced
    pub fn replace(&mut self, artifact: impl Into<Artifact>) -> Option<Artifact> {
        let artifact = artifact.into();
        self.artifacts.insert(artifact.key(), artifact)
    }

    /// Check whether an artifact with `key` is present
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &ArtifactKey) -> bool {
        self.artifacts.contains_key(key)
    }

    /// Look up an artifact by key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &ArtifactKey) -> Option<&Artifact> {
        self.artifacts.get(key)
    }

    /// All artifacts of kind `K`, in key order
    #[must_use]
    pub fn find<K: ArtifactKind>(&self) -> Vec<&K> {
        self.artifacts.values().filter_map(K::from_artifact).collect()
    }

    /// Number of artifacts
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Check if the set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Iterate over artifacts in key order
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.values()
    }

    /// Check that every artifact in `self` is also in `other`, unchanged
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.artifacts
            .iter()
            .all(|(key, artifact)| other.artifacts.get(key) == Some(artifact))
    }
}

impl<A: Into<Artifact>> FromIterator<A> for ArtifactSet {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<A: Into<Artifact>> Extend<A> for ArtifactSet {
    fn extend<I: IntoIterator<Item = A>>(&mut self, iter: I) {
        for artifact in iter {
            self.add(artifact);
        }
    }
}

impl IntoIterator for ArtifactSet {
    type Item = Artifact;
    type IntoIter = btree_map::IntoValues<ArtifactKey, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompilationResult, ContentHash, EmittedArtifact, OpaqueArtifact, StrongName};

    fn result(name: &str) -> CompilationResult {
        CompilationResult::with_strong_name(
            StrongName::new(name).unwrap(),
            vec![format!("{name}();")],
        )
    }

    #[test]
    fn set_new_empty() {
        let set = ArtifactSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn add_keeps_existing() {
        let mut set = ArtifactSet::new();
        assert!(set.add(EmittedArtifact::new("a.js", "first").unwrap()));
        assert!(!set.add(EmittedArtifact::new("a.js", "second").unwrap()));

        let emitted = set.find::<EmittedArtifact>();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].contents(), b"first");
    }

    #[test]
    fn replace_returns_displaced() {
        let mut set = ArtifactSet::new();
        assert!(set.replace(EmittedArtifact::new("a.js", "first").unwrap()).is_none());
        let displaced = set.replace(EmittedArtifact::new("a.js", "second").unwrap());
        assert!(matches!(displaced, Some(Artifact::Emitted(e)) if e.contents() == b"first"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn find_filters_by_kind() {
        let set: ArtifactSet = [
            Artifact::from(result("B")),
            Artifact::from(result("A")),
            Artifact::from(EmittedArtifact::new("x.js", "").unwrap()),
            Artifact::from(
                OpaqueArtifact::new("symbol_map", "A.symbols", ContentHash::compute(b"")).unwrap(),
            ),
        ]
        .into_iter()
        .collect();

        let results = set.find::<CompilationResult>();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].strong_name().as_str(), "A");
        assert_eq!(results[1].strong_name().as_str(), "B");
        assert_eq!(set.find::<EmittedArtifact>().len(), 1);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn clone_is_independent() {
        let original: ArtifactSet = std::iter::once(result("A")).collect();
        let mut copy = original.clone();
        copy.add(result("B"));

        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
        assert!(original.is_subset_of(&copy));
        assert!(!copy.is_subset_of(&original));
    }

    #[test]
    fn iteration_ignores_insertion_order() {
        let a: ArtifactSet = [result("A"), result("B")].into_iter().collect();
        let b: ArtifactSet = [result("B"), result("A")].into_iter().collect();
        assert_eq!(a, b);
        assert!(a.iter().eq(b.iter()));
    }
}
