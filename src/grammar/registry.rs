//! Context specification registry
//!
//! Maps every [`ContextId`] to its immutable [`Specification`]. The tables are
//! built once per process and shared by all parses; individual parser
//! contexts hold an [`Arc`] to the specification they run.

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

use super::spec::{Specification, SpecificationBuilder};
use super::symbols::ContextId;
use super::tables;
use crate::error::{Error, Result};

static GLOBAL: OnceCell<Registry> = OnceCell::new();

/// Immutable table of context grammars
#[derive(Debug, Clone)]
pub struct Registry {
    specifications: IndexMap<ContextId, Arc<Specification>>,
}

impl Registry {
    /// Build the XML Schema 1.0 grammar tables
    pub fn new() -> Result<Self> {
        let mut builder = RegistryBuilder::new();
        tables::register(&mut builder);
        builder.build()
    }

    /// Process-wide registry, built on first use
    pub fn global() -> Result<&'static Registry> {
        GLOBAL.get_or_try_init(Registry::new)
    }

    /// Specification of a context
    pub fn create(&self, context: ContextId) -> Result<Arc<Specification>> {
        self.specifications
            .get(&context)
            .filter(|spec| !spec.is_empty())
            .cloned()
            .ok_or(Error::UnsupportedContext(context))
    }

    /// Registered contexts, in registration order
    pub fn contexts(&self) -> impl Iterator<Item = ContextId> + '_ {
        self.specifications.keys().copied()
    }

    /// Number of registered contexts
    pub fn len(&self) -> usize {
        self.specifications.len()
    }

    /// Check if no context is registered
    pub fn is_empty(&self) -> bool {
        self.specifications.is_empty()
    }
}

/// Collects context grammars into a [`Registry`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    contexts: IndexMap<ContextId, SpecificationBuilder>,
}

impl RegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Grammar under construction for `context`
    pub fn context(&mut self, context: ContextId) -> &mut SpecificationBuilder {
        self.contexts
            .entry(context)
            .or_insert_with(|| SpecificationBuilder::new(context))
    }

    /// Freeze all grammars, failing on the first authoring error
    pub fn build(self) -> Result<Registry> {
        let mut specifications = IndexMap::with_capacity(self.contexts.len());
        for (context, builder) in self.contexts {
            specifications.insert(context, Arc::new(builder.build()?));
        }

        debug!(contexts = specifications.len(), "built grammar registry");
        Ok(Registry { specifications })
    }
}
