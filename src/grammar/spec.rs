//! Context specifications
//!
//! A [`Specification`] is the immutable description of one grammar context:
//! the content-model automaton over child elements, which context each
//! accepted child is built in, and which attributes the element understands.

use indexmap::{IndexMap, IndexSet};

use super::symbols::{AttributeKind, ContextId, Symbol};
use super::State;
use crate::error::{Error, Result};

/// Key of a transition: the state it leaves and the symbol it consumes
pub type TransitionKey = (State, Symbol);

/// Attribute binding: local name, namespace and the typed kind it maps to
pub type AttributeBinding = (&'static str, Option<&'static str>, AttributeKind);

/// Grammar of a single context
#[derive(Debug, Clone)]
pub struct Specification {
    context: ContextId,
    initial_state: Option<State>,
    final_states: IndexSet<State>,
    element_names: IndexMap<TransitionKey, &'static str>,
    next_states: IndexMap<TransitionKey, State>,
    element_builders: IndexMap<TransitionKey, ContextId>,
    attribute_builders: Vec<AttributeBinding>,
    required_attributes: Vec<AttributeKind>,
}

impl Specification {
    /// Context this grammar applies to
    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Initial state; `None` for leaf contexts that accept no child elements
    pub fn initial_state(&self) -> Option<State> {
        self.initial_state
    }

    /// Accepting states
    pub fn final_states(&self) -> impl Iterator<Item = State> + '_ {
        self.final_states.iter().copied()
    }

    /// Local names accepted per transition
    pub fn element_names(&self) -> impl Iterator<Item = (TransitionKey, &'static str)> + '_ {
        self.element_names.iter().map(|(key, name)| (*key, *name))
    }

    /// Target state per transition
    pub fn next_states(&self) -> impl Iterator<Item = (TransitionKey, State)> + '_ {
        self.next_states.iter().map(|(key, next)| (*key, *next))
    }

    /// Local name accepted by a transition
    pub fn element_name(&self, key: TransitionKey) -> Option<&'static str> {
        self.element_names.get(&key).copied()
    }

    /// Target state of a transition
    pub fn next_state(&self, key: TransitionKey) -> Option<State> {
        self.next_states.get(&key).copied()
    }

    /// Context the child accepted by a transition is built in
    pub fn element_builder(&self, key: TransitionKey) -> Option<ContextId> {
        self.element_builders.get(&key).copied()
    }

    /// All attribute bindings
    pub fn attribute_builders(&self) -> &[AttributeBinding] {
        &self.attribute_builders
    }

    /// Attribute kind bound to `(name, namespace)`
    pub fn attribute_builder(&self, name: &str, namespace: Option<&str>) -> Option<AttributeKind> {
        self.attribute_builders
            .iter()
            .find(|(n, ns, _)| *n == name && *ns == namespace)
            .map(|(_, _, kind)| *kind)
    }

    /// Attributes that must be present on every element of this context
    pub fn required_attributes(&self) -> &[AttributeKind] {
        &self.required_attributes
    }

    /// Check if the context accepts child elements at all
    pub fn is_composite(&self) -> bool {
        self.initial_state.is_some()
    }

    /// Check if anything at all is registered for the context
    pub fn is_empty(&self) -> bool {
        self.initial_state.is_none() && self.attribute_builders.is_empty()
    }
}

/// Accumulates the grammar of one context.
///
/// Authoring mistakes (a repeated transition or attribute) are remembered and
/// reported by [`SpecificationBuilder::build`].
#[derive(Debug)]
pub struct SpecificationBuilder {
    spec: Specification,
    error: Option<Error>,
}

impl SpecificationBuilder {
    /// Start an empty grammar for `context`
    pub fn new(context: ContextId) -> Self {
        Self {
            spec: Specification {
                context,
                initial_state: None,
                final_states: IndexSet::new(),
                element_names: IndexMap::new(),
                next_states: IndexMap::new(),
                element_builders: IndexMap::new(),
                attribute_builders: Vec::new(),
                required_attributes: Vec::new(),
            },
            error: None,
        }
    }

    /// Set the initial state
    pub fn initial(&mut self, state: State) -> &mut Self {
        self.spec.initial_state = Some(state);
        self
    }

    /// Mark states as accepting
    pub fn finals(&mut self, states: &[State]) -> &mut Self {
        self.spec.final_states.extend(states.iter().copied());
        self
    }

    /// Accept `symbol` in `from`, moving to `to` and building the child in `child`
    pub fn transition(
        &mut self,
        from: State,
        symbol: Symbol,
        to: State,
        child: ContextId,
    ) -> &mut Self {
        let key = (from, symbol);
        if self.spec.next_states.contains_key(&key) {
            self.fail(Error::DuplicateTransition {
                context: self.spec.context,
                state: from,
                symbol: symbol.local_name(),
            });
            return self;
        }

        self.spec.element_names.insert(key, symbol.local_name());
        self.spec.next_states.insert(key, to);
        self.spec.element_builders.insert(key, child);
        self
    }

    /// Same transition out of several states
    pub fn transitions(
        &mut self,
        from: &[State],
        symbol: Symbol,
        to: State,
        child: ContextId,
    ) -> &mut Self {
        for &state in from {
            self.transition(state, symbol, to, child);
        }
        self
    }

    /// Understand attribute `kind`
    pub fn attribute(&mut self, kind: AttributeKind) -> &mut Self {
        let (name, namespace) = (kind.local_name(), kind.namespace());
        if self.spec.attribute_builder(name, namespace).is_some() {
            self.fail(Error::Structure(format!(
                "attribute '{}' registered twice for context {:?}",
                kind, self.spec.context
            )));
            return self;
        }

        self.spec.attribute_builders.push((name, namespace, kind));
        self
    }

    /// Understand several attributes
    pub fn attributes(&mut self, kinds: &[AttributeKind]) -> &mut Self {
        for &kind in kinds {
            self.attribute(kind);
        }
        self
    }

    /// Understand attribute `kind` and require it
    pub fn required(&mut self, kind: AttributeKind) -> &mut Self {
        self.attribute(kind);
        self.spec.required_attributes.push(kind);
        self
    }

    /// Finish the grammar
    pub fn build(self) -> Result<Specification> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.spec),
        }
    }

    fn fail(&mut self, error: Error) {
        self.error.get_or_insert(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ElementKind;

    fn identity_constraint() -> Specification {
        let mut builder = SpecificationBuilder::new(ContextId::Key);
        builder
            .initial(0)
            .finals(&[3])
            .transition(0, ElementKind::Annotation, 1, ContextId::Annotation)
            .transitions(&[0, 1], ElementKind::Selector, 2, ContextId::Selector)
            .transitions(&[2, 3], ElementKind::Field, 3, ContextId::Field)
            .attribute(AttributeKind::Id)
            .required(AttributeKind::Name);
        builder.build().unwrap()
    }

    #[test]
    fn test_lookup_tables_share_keys() {
        let spec = identity_constraint();
        assert_eq!(spec.context(), ContextId::Key);
        assert_eq!(spec.initial_state(), Some(0));
        assert!(spec.is_composite());

        let key = (1, ElementKind::Selector);
        assert_eq!(spec.element_name(key), Some("selector"));
        assert_eq!(spec.next_state(key), Some(2));
        assert_eq!(spec.element_builder(key), Some(ContextId::Selector));
        assert_eq!(spec.element_name((1, ElementKind::Field)), None);

        assert_eq!(spec.element_names().count(), spec.next_states().count());
        assert_eq!(spec.final_states().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_attribute_bindings() {
        let spec = identity_constraint();
        assert_eq!(spec.attribute_builder("name", None), Some(AttributeKind::Name));
        assert_eq!(spec.attribute_builder("name", Some("urn:other")), None);
        assert_eq!(spec.attribute_builder("refer", None), None);
        assert_eq!(spec.required_attributes(), &[AttributeKind::Name]);
    }

    #[test]
    fn test_duplicate_transition_is_reported() {
        let mut builder = SpecificationBuilder::new(ContextId::Sequence);
        builder
            .initial(0)
            .transition(0, ElementKind::Element, 1, ContextId::LocalElement)
            .transition(0, ElementKind::Element, 2, ContextId::LocalElement);

        match builder.build() {
            Err(Error::DuplicateTransition {
                context, state, symbol,
            }) => {
                assert_eq!(context, ContextId::Sequence);
                assert_eq!(state, 0);
                assert_eq!(symbol, "element");
            }
            other => panic!("expected duplicate transition, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_attribute_is_reported() {
        let mut builder = SpecificationBuilder::new(ContextId::LocalElement);
        builder
            .attribute(AttributeKind::MaxOccurs)
            .attribute(AttributeKind::NarrowMaxOccurs);
        assert!(matches!(builder.build(), Err(Error::Structure(_))));
    }

    #[test]
    fn test_leaf_specification() {
        let mut builder = SpecificationBuilder::new(ContextId::Documentation);
        builder.attribute(AttributeKind::Source);
        let spec = builder.build().unwrap();
        assert!(!spec.is_composite());
        assert!(!spec.is_empty());
        assert!(SpecificationBuilder::new(ContextId::Field).build().unwrap().is_empty());
    }
}
