//! Selection-script linking contract
//!
//! [`SelectionScriptLinker`] is the general contract for linkers that emit
//! one file per compilation result plus an entry script. Variants that
//! support only part of it must fail loudly from the parts they do not
//! support rather than return placeholder values.

use crate::context::ModuleContext;
use crate::error::LinkError;
use crate::linker::Linker;
use scriptlink_artifact::{ArtifactSet, CompilationResult, EmittedArtifact, StrongName};

/// Linker that emits per-result files and an entry script
pub trait SelectionScriptLinker: Linker {
    /// Template the entry script is generated from
    ///
    /// # Errors
    /// Returns error if this linker has no template
    fn selection_script_template(&self, context: &ModuleContext) -> Result<String, LinkError>;

    /// File extension of per-result files, including the leading dot
    ///
    /// # Errors
    /// Returns error if this linker does not emit per-result files
    fn compilation_extension(&self, context: &ModuleContext) -> Result<String, LinkError>;

    /// Text placed before a result's initial fragment
    ///
    /// # Errors
    /// Returns error if this linker does not emit per-result files
    fn module_prefix(
        &self,
        context: &ModuleContext,
        strong_name: &StrongName,
    ) -> Result<String, LinkError>;

    /// Text placed after a result's initial fragment
    ///
    /// # Errors
    /// Returns error if this linker does not emit per-result files
    fn module_suffix(&self, context: &ModuleContext) -> Result<String, LinkError>;

    /// Build the module's entry script
    ///
    /// # Errors
    /// Returns error if the artifacts cannot be linked
    fn emit_selection_script(
        &self,
        context: &ModuleContext,
        artifacts: &ArtifactSet,
    ) -> Result<EmittedArtifact, LinkError>;

    /// Emit the files for one compilation result
    ///
    /// Defaults to [`emit_compilation_default`].
    ///
    /// # Errors
    /// Returns error if any extension point fails
    fn do_emit_compilation(
        &self,
        context: &ModuleContext,
        result: &CompilationResult,
    ) -> Result<Vec<EmittedArtifact>, LinkError> {
        emit_compilation_default(self, context, result)
    }

    /// Emit the files for every compilation result in `artifacts`
    ///
    /// # Errors
    /// Returns the first failure from [`Self::do_emit_compilation`]
    fn emit_compilations(
        &self,
        context: &ModuleContext,
        artifacts: &ArtifactSet,
    ) -> Result<Vec<EmittedArtifact>, LinkError> {
        let mut emitted = Vec::new();
        for result in artifacts.find::<CompilationResult>() {
            emitted.extend(self.do_emit_compilation(context, result)?);
        }
        Ok(emitted)
    }
}

/// Default per-result emission
///
/// The initial fragment becomes `<strongName><extension>`, wrapped in the
/// module prefix and suffix. Every further fragment `i` is written verbatim
/// to `deferredjs/<strongName>/<i>.cache.js`.
///
/// # Errors
/// Returns error if an extension point fails
pub fn emit_compilation_default<L>(
    linker: &L,
    context: &ModuleContext,
    result: &CompilationResult,
) -> Result<Vec<EmittedArtifact>, LinkError>
where
    L: SelectionScriptLinker + ?Sized,
{
    let strong_name = result.strong_name();
    let mut fragments = result.fragments().iter();
    let mut emitted = Vec::with_capacity(result.fragments().len());

    if let Some(initial) = fragments.next() {
        let extension = linker.compilation_extension(context)?;
        let prefix = linker.module_prefix(context, strong_name)?;
        let suffix = linker.module_suffix(context)?;

        let mut contents = String::with_capacity(prefix.len() + initial.len() + suffix.len());
        contents.push_str(&prefix);
        contents.push_str(initial);
        contents.push_str(&suffix);
        emitted.push(EmittedArtifact::new(
            format!("{strong_name}{extension}"),
            contents,
        )?);
    }

    for (offset, fragment) in fragments.enumerate() {
        let path = format!("deferredjs/{strong_name}/{}.cache.js", offset + 1);
        emitted.push(EmittedArtifact::new(path, fragment.as_bytes())?);
    }

    tracing::debug!(
        strong_name = %strong_name,
        files = emitted.len(),
        "emitted compilation"
    );
    Ok(emitted)
}
