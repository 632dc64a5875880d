//! scriptlink Artifact System
//!
//! Build artifacts exchanged between the compilation stage and linkers.
//!
//! # Core Concepts
//!
//! - [`Artifact`]: Closed set of artifact kinds
//! - [`CompilationResult`]: One compiled permutation (strong name + fragments)
//! - [`EmittedArtifact`]: Named output blob produced by a linker
//! - [`ArtifactSet`]: Identity-keyed collection, queried by kind with [`ArtifactSet::find`]
//! - [`ContentHash`]: 32-byte Blake3 hash
//!
//! # Example
//!
//! ```rust,ignore
//! use scriptlink_artifact::{ArtifactSet, CompilationResult};
//!
//! let mut artifacts = ArtifactSet::new();
//! artifacts.add(CompilationResult::new(vec!["alert(1);".to_string()]));
//!
//! let results = artifacts.find::<CompilationResult>();
//! println!("strong name: {}", results[0].strong_name());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod artifact;
mod compilation;
mod emitted;
mod hash;
mod set;

// Re-exports
pub use artifact::{Artifact, ArtifactError, ArtifactKey, ArtifactKind, OpaqueArtifact};
pub use compilation::{CompilationResult, StrongName};
pub use emitted::{EmittedArtifact, Visibility};
pub use hash::{ContentHash, HashError};
pub use set::ArtifactSet;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
