//! Linker registry
//!
//! Provides [`LinkerRegistry`] for looking up linkers by the names a build
//! configuration refers to them by.

use crate::linker::Linker;
use crate::single_script::SingleScriptLinker;
use std::collections::BTreeMap;

/// Constructor for a registered linker
pub type LinkerFactory = fn() -> Box<dyn Linker>;

/// Registry of linker factories by name
///
/// Names iterate in sorted order.
#[derive(Debug, Default, Clone)]
pub struct LinkerRegistry {
    factories: BTreeMap<String, LinkerFactory>,
}

impl LinkerRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Create registry with built-in linkers
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(SingleScriptLinker::NAME, single_script);
        registry
    }

    /// Register a factory, replacing any previous one under `name`
    pub fn register(&mut self, name: &str, factory: LinkerFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    /// Check if a linker is registered under `name`
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Remove a registration
    #[inline]
    pub fn remove(&mut self, name: &str) -> bool {
        self.factories.remove(name).is_some()
    }

    /// Instantiate the linker registered under `name`
    #[must_use]
    pub fn create(&self, name: &str) -> Option<Box<dyn Linker>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// List all registered names
    #[inline]
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Get number of registered linkers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

fn single_script() -> Box<dyn Linker> {
    Box::new(SingleScriptLinker::new())
}
