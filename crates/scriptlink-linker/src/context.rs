//! Module context handed to linkers
//!
//! [`ModuleContext`] is read-only metadata supplied by the build driver.
//! Linkers consume it and never mutate it.

use crate::error::LinkError;

/// Read-only metadata about the module being linked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleContext {
    module_name: String,
    toolchain_version: String,
    output_compact: bool,
}

impl ModuleContext {
    /// Create a context for `module_name`
    ///
    /// The toolchain version defaults to this crate's version and output is
    /// compact.
    ///
    /// # Errors
    /// Returns error if `module_name` is empty
    pub fn new(module_name: impl Into<String>) -> Result<Self, LinkError> {
        let module_name = module_name.into();
        if module_name.is_empty() {
            return Err(LinkError::InvalidContext(
                "module name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            module_name,
            toolchain_version: crate::VERSION.to_string(),
            output_compact: true,
        })
    }

    /// With the toolchain version reported by the compilation stage
    #[inline]
    #[must_use]
    pub fn with_toolchain_version(mut self, version: impl Into<String>) -> Self {
        self.toolchain_version = version.into();
        self
    }

    /// With output compactness
    #[inline]
    #[must_use]
    pub fn with_output_compact(mut self, compact: bool) -> Self {
        self.output_compact = compact;
        self
    }

    /// Module name, used verbatim in output naming
    #[inline]
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Toolchain version, embedded verbatim in output
    #[inline]
    #[must_use]
    pub fn toolchain_version(&self) -> &str {
        &self.toolchain_version
    }

    /// Whether optional whitespace is omitted from generated text
    #[inline]
    #[must_use]
    pub fn is_output_compact(&self) -> bool {
        self.output_compact
    }
}
