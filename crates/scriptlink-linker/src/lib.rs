//! scriptlink Linker
//!
//! Linking contract and the single-script linker.
//!
//! # Core Concepts
//!
//! - [`Linker`]: Transform from an [`ArtifactSet`](scriptlink_artifact::ArtifactSet) to an augmented copy
//! - [`SelectionScriptLinker`]: Contract for linkers that emit per-result files plus an entry script
//! - [`SingleScriptLinker`]: One permutation, one fragment, one self-contained script
//! - [`LinkerRegistry`]: Named linker factories
//! - [`LinkPipeline`]: Runs linkers in `Pre`, `Primary`, `Post` order
//!
//! # Example
//!
//! ```rust,ignore
//! use scriptlink_artifact::{ArtifactSet, CompilationResult};
//! use scriptlink_linker::{Linker, ModuleContext, SingleScriptLinker};
//!
//! let context = ModuleContext::new("App")?.with_toolchain_version("2.9.0");
//! let artifacts: ArtifactSet =
//!     std::iter::once(CompilationResult::new(vec!["alert(1);".to_string()])).collect();
//!
//! let linked = SingleScriptLinker::new().link(&context, &artifacts)?;
//! // linked holds the input artifacts plus App.nocache.js
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod context;
mod error;
mod linker;
mod output;
mod pipeline;
mod registry;
mod selection;
mod single_script;

// Re-exports
pub use context::ModuleContext;
pub use error::LinkError;
pub use linker::{Linker, LinkerOrder};
pub use output::{js_string_literal, TextOutput};
pub use pipeline::LinkPipeline;
pub use registry::{LinkerFactory, LinkerRegistry};
pub use selection::{emit_compilation_default, SelectionScriptLinker};
pub use single_script::{SingleScriptLinker, LOAD_CALLBACK, NOCACHE_SUFFIX};

/// Version of this crate, the default toolchain version of a [`ModuleContext`]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
