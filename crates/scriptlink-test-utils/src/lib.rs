//! Testing utilities for the scriptlink workspace
//!
//! Shared fixtures for artifacts and module contexts.

#![allow(missing_docs)]

use scriptlink_artifact::{
    Artifact, ArtifactSet, CompilationResult, ContentHash, OpaqueArtifact, StrongName,
};
use scriptlink_linker::ModuleContext;

pub const TEST_TOOLCHAIN_VERSION: &str = "2.9.0";

pub fn compilation_result(strong_name: &str, fragments: &[&str]) -> CompilationResult {
    CompilationResult::with_strong_name(
        StrongName::new(strong_name).unwrap(),
        fragments.iter().map(ToString::to_string).collect(),
    )
}

pub fn single_result_set(strong_name: &str, fragment: &str) -> ArtifactSet {
    std::iter::once(compilation_result(strong_name, &[fragment])).collect()
}

pub fn symbol_map(name: &str) -> OpaqueArtifact {
    OpaqueArtifact::new("symbol_map", name, ContentHash::compute(name.as_bytes())).unwrap()
}

pub fn artifact_set<I, A>(artifacts: I) -> ArtifactSet
where
    I: IntoIterator<Item = A>,
    A: Into<Artifact>,
{
    artifacts.into_iter().collect()
}

pub fn module_context(module_name: &str) -> ModuleContext {
    ModuleContext::new(module_name)
        .unwrap()
        .with_toolchain_version(TEST_TOOLCHAIN_VERSION)
}
