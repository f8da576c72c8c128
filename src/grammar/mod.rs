//! Grammar-driven content models
//!
//! The grammar of XML Schema 1.0 is expressed as one deterministic automaton
//! per [`ContextId`]. Each automaton accepts the sequences of child elements
//! valid inside an element of that context and names the context each child
//! is parsed in. The tables are assembled once into a [`Registry`].

pub mod dfa;
pub mod registry;
pub mod spec;
pub mod symbols;
mod tables;

pub use dfa::Dfa;
pub use registry::{Registry, RegistryBuilder};
pub use spec::{AttributeBinding, Specification, SpecificationBuilder, TransitionKey};
pub use symbols::{AttributeKind, ContextId, ElementKind, Symbol};

/// Automaton state; numbering is local to each context
pub type State = u16;
