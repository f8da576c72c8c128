//! Per-element parser context
//!
//! A [`ParserContext`] runs one [`Specification`] for one open element: it
//! owns a fresh automaton positioned at the initial state and uses the
//! specification tables to build children and attributes.

use std::sync::Arc;

use crate::builder::DocumentBuilder;
use crate::error::{Error, Result};
use crate::grammar::{AttributeKind, ContextId, Dfa, ElementKind, Specification, State, Symbol, TransitionKey};
use crate::model::NodeId;
use crate::XSD_NAMESPACE;

/// Result of accepting a child element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedElement {
    /// Symbol consumed by the automaton
    pub symbol: Symbol,
    /// Context the child is to be parsed in
    pub context: ContextId,
    /// Node built for the child
    pub node: NodeId,
}

/// Grammar state of one open element
#[derive(Debug, Clone)]
pub struct ParserContext {
    spec: Arc<Specification>,
    dfa: Option<Dfa<State, Symbol>>,
}

impl ParserContext {
    /// Start running `spec` from its initial state
    pub fn new(spec: Arc<Specification>) -> Self {
        let dfa = spec.initial_state().map(|initial| {
            let mut dfa = Dfa::new(initial);
            for ((state, symbol), next) in spec.next_states() {
                dfa.add_transition(state, symbol, next);
            }
            for state in spec.final_states() {
                dfa.add_final_state(state);
            }
            dfa
        });
        Self { spec, dfa }
    }

    /// Context being run
    pub fn context_id(&self) -> ContextId {
        self.spec.context()
    }

    /// Local name of the element this context belongs to
    pub fn element_name(&self) -> &'static str {
        self.context_id().element_name()
    }

    /// Specification being run
    pub fn specification(&self) -> &Specification {
        &self.spec
    }

    /// Check if the element may have child elements
    pub fn is_composite(&self) -> bool {
        self.dfa.is_some()
    }

    /// Current automaton state
    pub fn current_state(&self) -> Option<State> {
        self.dfa.as_ref().map(|dfa| dfa.current_state())
    }

    /// Transition taken by a child named `local_name`, if any
    fn transition_for(&self, local_name: &str) -> Option<TransitionKey> {
        let dfa = self.dfa.as_ref()?;
        let symbol = ElementKind::from_local_name(local_name)?;
        let key = (dfa.current_state(), symbol);
        match self.spec.element_name(key) {
            Some(name) if name == local_name => Some(key),
            _ => None,
        }
    }

    /// Check if a schema element named `local_name` may come next
    pub fn is_element_accepted(&self, local_name: &str) -> bool {
        self.transition_for(local_name).is_some()
    }

    /// Local names that may come next, in registration order
    pub fn accepted_elements(&self) -> Vec<&'static str> {
        match self.current_state() {
            Some(state) => self
                .spec
                .element_names()
                .filter(|((from, _), _)| *from == state)
                .map(|(_, name)| name)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Accept a child element: build its node and advance the automaton
    pub fn create_element(
        &mut self,
        local_name: &str,
        builder: &mut DocumentBuilder,
        parent: Option<NodeId>,
    ) -> Result<CreatedElement> {
        let key = self.transition_for(local_name).ok_or_else(|| Error::UnexpectedElement {
            name: local_name.to_string(),
            namespace: Some(XSD_NAMESPACE.to_string()),
            parent: self.element_name().to_string(),
            accepted: self.accepted_elements().into_iter().map(String::from).collect(),
            position: None,
        })?;
        let context = self.spec.element_builder(key).ok_or_else(|| {
            Error::Structure(format!(
                "no builder for <{}> in context {:?}",
                local_name,
                self.context_id()
            ))
        })?;

        let node = builder.build_element(parent, context)?;
        let (_, symbol) = key;
        if let Some(dfa) = self.dfa.as_mut() {
            dfa.add_symbol(symbol)?;
        }
        Ok(CreatedElement {
            symbol,
            context,
            node,
        })
    }

    /// Check if the children seen so far form valid content
    pub fn is_content_valid(&self) -> bool {
        self.dfa.as_ref().map_or(true, |dfa| dfa.is_valid())
    }

    /// Check if an attribute has a builder in this context
    pub fn is_attribute_supported(&self, name: &str, namespace: Option<&str>) -> bool {
        self.spec.attribute_builder(name, namespace).is_some()
    }

    /// Build a supported attribute onto `node`, returning its kind
    pub fn create_attribute(
        &self,
        name: &str,
        namespace: Option<&str>,
        value: &str,
        builder: &mut DocumentBuilder,
        node: NodeId,
    ) -> Result<AttributeKind> {
        let kind = self
            .spec
            .attribute_builder(name, namespace)
            .ok_or_else(|| Error::UnsupportedAttribute {
                element: self.element_name().to_string(),
                name: name.to_string(),
                namespace: namespace.map(String::from),
                position: None,
            })?;
        builder.build_attribute(node, kind, value)?;
        Ok(kind)
    }

    /// Attributes every element of this context must carry
    pub fn required_attributes(&self) -> &[AttributeKind] {
        self.spec.required_attributes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Registry;

    fn context(id: ContextId) -> ParserContext {
        ParserContext::new(Registry::global().unwrap().create(id).unwrap())
    }

    #[test]
    fn test_fresh_context_starts_at_initial_state() {
        let key = context(ContextId::Key);
        assert!(key.is_composite());
        assert_eq!(key.current_state(), key.specification().initial_state());
        assert!(!key.is_content_valid());
        assert_eq!(key.accepted_elements(), vec!["annotation", "selector"]);
    }

    #[test]
    fn test_leaf_context() {
        let documentation = context(ContextId::Documentation);
        assert!(!documentation.is_composite());
        assert!(documentation.is_content_valid());
        assert!(documentation.accepted_elements().is_empty());
        assert!(!documentation.is_element_accepted("annotation"));
        assert!(documentation.is_attribute_supported("lang", Some(crate::XML_NAMESPACE)));
        assert!(!documentation.is_attribute_supported("lang", None));
    }

    #[test]
    fn test_create_element_advances_automaton() {
        let mut builder = DocumentBuilder::new();
        let mut root = context(ContextId::Root);
        let created = root.create_element("schema", &mut builder, None).unwrap();
        assert_eq!(created.symbol, ElementKind::Schema);
        assert_eq!(created.context, ContextId::Schema);
        assert!(root.is_content_valid());
        assert!(!root.is_element_accepted("schema"));

        let mut schema = context(ContextId::Schema);
        let element = schema
            .create_element("element", &mut builder, Some(created.node))
            .unwrap();
        assert_eq!(element.context, ContextId::TopLevelElement);
        // prolog elements are closed once a definition was seen
        assert!(!schema.is_element_accepted("import"));
        assert!(schema.is_element_accepted("annotation"));
    }

    #[test]
    fn test_create_element_rejects_out_of_order_child() {
        let mut builder = DocumentBuilder::new();
        let mut key = context(ContextId::Key);
        match key.create_element("field", &mut builder, None) {
            Err(Error::UnexpectedElement {
                name, parent, accepted, ..
            }) => {
                assert_eq!(name, "field");
                assert_eq!(parent, "key");
                assert_eq!(accepted, vec!["annotation", "selector"]);
            }
            other => panic!("expected unexpected element, got {:?}", other),
        }
        assert!(builder.is_empty());
    }

    #[test]
    fn test_create_attribute() {
        let mut builder = DocumentBuilder::new();
        let mut root = context(ContextId::Root);
        let schema = root.create_element("schema", &mut builder, None).unwrap();
        let spec = context(ContextId::Schema);

        let kind = spec
            .create_attribute("version", None, "1.0", &mut builder, schema.node)
            .unwrap();
        assert_eq!(kind, AttributeKind::Version);

        assert!(matches!(
            spec.create_attribute("name", None, "x", &mut builder, schema.node),
            Err(Error::UnsupportedAttribute { .. })
        ));
        assert!(matches!(
            spec.create_attribute("elementFormDefault", None, "sometimes", &mut builder, schema.node),
            Err(Error::InvalidAttributeValue { .. })
        ));
    }

    #[test]
    fn test_required_attributes() {
        assert_eq!(
            context(ContextId::Keyref).required_attributes(),
            &[AttributeKind::Name, AttributeKind::Refer]
        );
        assert!(context(ContextId::LocalElement).required_attributes().is_empty());
    }
}
