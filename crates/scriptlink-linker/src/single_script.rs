//! Single-script linker
//!
//! Produces one self-contained script from a module that has exactly one
//! compilation result with exactly one fragment. The script is a fixed
//! preamble, the fragment verbatim, and a call to the load callback.

use crate::context::ModuleContext;
use crate::error::LinkError;
use crate::linker::{Linker, LinkerOrder};
use crate::output::{js_string_literal, TextOutput};
use crate::selection::{emit_compilation_default, SelectionScriptLinker};
use scriptlink_artifact::{ArtifactSet, CompilationResult, EmittedArtifact, StrongName};

/// Suffix appended to the module name to name the entry script
pub const NOCACHE_SUFFIX: &str = ".nocache.js";

/// Global function the generated script calls once the module is loaded
pub const LOAD_CALLBACK: &str = "gwtOnLoad";

// Preamble statements, in emission order
const GLOBAL_SCOPE: &str = "var $_window = this;";
const WINDOW_ALIAS: &str = "var $wnd = $_window;";
const DOCUMENT_ALIAS: &str = "var $doc = $wnd.document;";
const MODULE_PLACEHOLDERS: &str = "var $moduleName, $moduleBase;";
const STATS_HOOK: &str =
    "var $stats = $wnd.__gwtStatsEvent ? function(a) {$wnd.__gwtStatsEvent(a)} : null;";

/// Linker for modules with one permutation and one fragment
///
/// Stateless; one instance can link any number of modules, concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleScriptLinker;

impl SingleScriptLinker {
    /// Registry name
    pub const NAME: &'static str = "single_script";

    /// Create new linker
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Select the module's only compilation result
    ///
    /// # Errors
    /// [`LinkError::PermutationCount`] unless exactly one result is present
    pub fn select_unique_result<'a>(
        &self,
        artifacts: &'a ArtifactSet,
    ) -> Result<&'a CompilationResult, LinkError> {
        match artifacts.find::<CompilationResult>().as_slice() {
            [result] => Ok(*result),
            results => {
                let err = LinkError::PermutationCount {
                    linker: self.description(),
                    count: results.len(),
                };
                tracing::error!(count = results.len(), "{err}");
                Err(err)
            }
        }
    }

    /// The result's only fragment
    ///
    /// # Errors
    /// [`LinkError::FragmentCount`] unless the result has exactly one fragment
    pub fn single_fragment<'a>(&self, result: &'a CompilationResult) -> Result<&'a str, LinkError> {
        match result.fragments() {
            [fragment] => Ok(fragment.as_str()),
            fragments => {
                let err = LinkError::FragmentCount {
                    linker: self.description(),
                    count: fragments.len(),
                };
                tracing::error!(
                    strong_name = %result.strong_name(),
                    count = fragments.len(),
                    "{err}"
                );
                Err(err)
            }
        }
    }

    /// Name of the entry script for `context`
    #[inline]
    #[must_use]
    pub fn script_name(context: &ModuleContext) -> String {
        format!("{}{NOCACHE_SUFFIX}", context.module_name())
    }

    /// Assemble the script text
    ///
    /// Inputs are already validated; this cannot fail.
    fn assemble(context: &ModuleContext, strong_name: &StrongName, fragment: &str) -> String {
        let mut out = TextOutput::new(context.is_output_compact());

        out.print(GLOBAL_SCOPE);
        out.newline_opt();
        out.newline_opt();

        out.print(&format!(
            "var $gwt_version = {};",
            js_string_literal(context.toolchain_version(), '"')
        ));
        out.newline_opt();
        for statement in [WINDOW_ALIAS, DOCUMENT_ALIAS, MODULE_PLACEHOLDERS, STATS_HOOK] {
            out.print(statement);
            out.newline_opt();
        }

        out.print(&format!(
            "var $strongName = {};",
            js_string_literal(strong_name.as_str(), '\'')
        ));
        out.newline_opt();

        out.print(fragment);
        out.newline_opt();

        out.print(&format!("{LOAD_CALLBACK}();"));
        out.newline_opt();

        out.into_string()
    }

    fn unsupported(&self, operation: &'static str) -> LinkError {
        let err = LinkError::Unsupported {
            linker: self.description(),
            operation,
        };
        tracing::error!("{err}");
        err
    }
}

impl Linker for SingleScriptLinker {
    fn description(&self) -> &'static str {
        "Single Script"
    }

    fn order(&self) -> LinkerOrder {
        LinkerOrder::Primary
    }

    fn link(
        &self,
        context: &ModuleContext,
        artifacts: &ArtifactSet,
    ) -> Result<ArtifactSet, LinkError> {
        let script = self.emit_selection_script(context, artifacts)?;

        let mut linked = artifacts.clone();
        let path = script.partial_path().to_string();
        if !linked.add(script) {
            tracing::warn!(path = %path, "artifact already present, keeping the input's copy");
        }
        Ok(linked)
    }
}

impl SelectionScriptLinker for SingleScriptLinker {
    fn selection_script_template(&self, _context: &ModuleContext) -> Result<String, LinkError> {
        Err(self.unsupported("selection_script_template"))
    }

    fn compilation_extension(&self, _context: &ModuleContext) -> Result<String, LinkError> {
        Err(self.unsupported("compilation_extension"))
    }

    fn module_prefix(
        &self,
        _context: &ModuleContext,
        _strong_name: &StrongName,
    ) -> Result<String, LinkError> {
        Err(self.unsupported("module_prefix"))
    }

    fn module_suffix(&self, _context: &ModuleContext) -> Result<String, LinkError> {
        Err(self.unsupported("module_suffix"))
    }

    fn emit_selection_script(
        &self,
        context: &ModuleContext,
        artifacts: &ArtifactSet,
    ) -> Result<EmittedArtifact, LinkError> {
        let result = self.select_unique_result(artifacts)?;
        let fragment = self.single_fragment(result)?;

        let script = Self::assemble(context, result.strong_name(), fragment);
        let name = Self::script_name(context);
        tracing::info!(
            module = context.module_name(),
            strong_name = %result.strong_name(),
            path = %name,
            bytes = script.len(),
            "linked single script"
        );
        Ok(EmittedArtifact::new(name, script)?)
    }

    fn do_emit_compilation(
        &self,
        context: &ModuleContext,
        result: &CompilationResult,
    ) -> Result<Vec<EmittedArtifact>, LinkError> {
        self.single_fragment(result)?;
        emit_compilation_default(self, context, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptlink_artifact::{Artifact, ContentHash, OpaqueArtifact};

    fn result(strong_name: &str, fragments: &[&str]) -> CompilationResult {
        CompilationResult::with_strong_name(
            StrongName::new(strong_name).unwrap(),
            fragments.iter().map(ToString::to_string).collect(),
        )
    }

    fn context() -> ModuleContext {
        ModuleContext::new("App")
            .unwrap()
            .with_toolchain_version("2.9.0")
    }

    #[test]
    fn compact_script_is_exact() {
        let artifacts: ArtifactSet = std::iter::once(result("ABCD1234", &["alert(1);"])).collect();
        let script = SingleScriptLinker
            .emit_selection_script(&context(), &artifacts)
            .unwrap();

        assert_eq!(script.partial_path(), "App.nocache.js");
        assert_eq!(
            script.contents_as_str().unwrap(),
            concat!(
                "var $_window = this;",
                "var $gwt_version = \"2.9.0\";",
                "var $wnd = $_window;",
                "var $doc = $wnd.document;",
                "var $moduleName, $moduleBase;",
                "var $stats = $wnd.__gwtStatsEvent ? function(a) {$wnd.__gwtStatsEvent(a)} : null;",
                "var $strongName = 'ABCD1234';",
                "alert(1);",
                "gwtOnLoad();",
            )
        );
    }

    #[test]
    fn pretty_script_has_one_statement_per_line() {
        let artifacts: ArtifactSet = std::iter::once(result("ABCD1234", &["alert(1);"])).collect();
        let ctx = context().with_output_compact(false);
        let script = SingleScriptLinker
            .emit_selection_script(&ctx, &artifacts)
            .unwrap();
        let text = script.contents_as_str().unwrap();

        assert!(text.starts_with("var $_window = this;\n\nvar $gwt_version = \"2.9.0\";\n"));
        assert!(text.ends_with("var $strongName = 'ABCD1234';\nalert(1);\ngwtOnLoad();\n"));
    }

    #[test]
    fn zero_results_rejected() {
        let err = SingleScriptLinker
            .link(&context(), &ArtifactSet::new())
            .unwrap_err();
        assert!(matches!(
            err,
            LinkError::PermutationCount {
                linker: "Single Script",
                count: 0
            }
        ));
    }

    #[test]
    fn two_results_rejected() {
        let artifacts: ArtifactSet = [result("A", &["a();"]), result("B", &["b();"])]
            .into_iter()
            .collect();
        let err = SingleScriptLinker.link(&context(), &artifacts).unwrap_err();
        assert!(matches!(err, LinkError::PermutationCount { count: 2, .. }));
    }

    #[test]
    fn multiple_fragments_rejected() {
        let artifacts: ArtifactSet = std::iter::once(result("A", &["a();", "b();"])).collect();
        let err = SingleScriptLinker.link(&context(), &artifacts).unwrap_err();
        assert!(matches!(err, LinkError::FragmentCount { count: 2, .. }));
    }

    #[test]
    fn empty_fragment_list_rejected() {
        let artifacts: ArtifactSet = std::iter::once(result("A", &[])).collect();
        let err = SingleScriptLinker.link(&context(), &artifacts).unwrap_err();
        assert!(matches!(err, LinkError::FragmentCount { count: 0, .. }));
    }

    #[test]
    fn other_artifacts_pass_through() {
        let opaque =
            OpaqueArtifact::new("symbol_map", "A.symbols", ContentHash::compute(b"m")).unwrap();
        let artifacts: ArtifactSet = [
            Artifact::from(result("A", &["a();"])),
            Artifact::from(opaque),
        ]
        .into_iter()
        .collect();

        let linked = SingleScriptLinker.link(&context(), &artifacts).unwrap();
        assert_eq!(linked.len(), 3);
        assert!(artifacts.is_subset_of(&linked));
    }

    #[test]
    fn existing_script_is_kept() {
        let stale = EmittedArtifact::new("App.nocache.js", "stale").unwrap();
        let artifacts: ArtifactSet = [
            Artifact::from(result("A", &["a();"])),
            Artifact::from(stale),
        ]
        .into_iter()
        .collect();

        let linked = SingleScriptLinker.link(&context(), &artifacts).unwrap();
        assert_eq!(linked, artifacts);
        let emitted = linked.find::<EmittedArtifact>();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].contents(), b"stale");
    }

    #[test]
    fn strong_name_is_quoted_safely() {
        let artifacts: ArtifactSet = std::iter::once(result("it's", &["x();"])).collect();
        let script = SingleScriptLinker
            .emit_selection_script(&context(), &artifacts)
            .unwrap();
        assert!(script
            .contents_as_str()
            .unwrap()
            .contains(r"var $strongName = 'it\'s';"));
    }

    #[test]
    fn disabled_extension_points_fail() {
        let ctx = context();
        let linker = SingleScriptLinker;
        let strong_name = StrongName::new("A").unwrap();

        assert!(linker.selection_script_template(&ctx).unwrap_err().is_contract_violation());
        assert!(linker.compilation_extension(&ctx).unwrap_err().is_contract_violation());
        assert!(linker
            .module_prefix(&ctx, &strong_name)
            .unwrap_err()
            .is_contract_violation());
        assert!(linker.module_suffix(&ctx).unwrap_err().is_contract_violation());
    }

    #[test]
    fn do_emit_compilation_checks_fragments_first() {
        let err = SingleScriptLinker
            .do_emit_compilation(&context(), &result("A", &["a();", "b();"]))
            .unwrap_err();
        assert!(matches!(err, LinkError::FragmentCount { count: 2, .. }));
    }

    #[test]
    fn do_emit_compilation_reaches_disabled_extension() {
        let err = SingleScriptLinker
            .do_emit_compilation(&context(), &result("A", &["a();"]))
            .unwrap_err();
        assert!(matches!(
            err,
            LinkError::Unsupported {
                operation: "compilation_extension",
                ..
            }
        ));
    }

    #[test]
    fn script_name_appends_suffix() {
        let ctx = ModuleContext::new("com.example.Hello").unwrap();
        assert_eq!(
            SingleScriptLinker::script_name(&ctx),
            "com.example.Hello.nocache.js"
        );
    }
}
