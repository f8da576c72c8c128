//! Document builder
//!
//! The builder owns the node arena while a document is being parsed. The
//! parser tells it which node to attach to on every call, so the builder
//! keeps no cursor of its own and elements need no explicit end event.

use tracing::trace;

use crate::error::{Error, Result};
use crate::grammar::{AttributeKind, ContextId};
use crate::model::{
    lookup_namespace, slot_for, AttributeValue, ForeignAttribute, LeafContent, Node, NodeId,
    SchemaDocument,
};
use crate::namespaces::QName;
use crate::values::NcName;

/// Builds a [`SchemaDocument`] one element at a time
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl DocumentBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes built so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if nothing was built yet
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create the node for an element built in `context`.
    ///
    /// Without a parent the node becomes the document root; with one, it is
    /// placed into the parent slot that matches its kind.
    pub fn build_element(&mut self, parent: Option<NodeId>, context: ContextId) -> Result<NodeId> {
        let kind = context.element_kind().ok_or_else(|| {
            Error::Structure(format!("context {:?} does not build an element", context))
        })?;
        let id = NodeId::from_index(self.nodes.len());
        let mut node = Node::new(kind, context);

        match parent {
            None => {
                if self.root.is_some() {
                    return Err(Error::Structure(format!(
                        "<{}> cannot become a second document root",
                        kind
                    )));
                }
                self.root = Some(id);
            }
            Some(parent) => {
                node.attach_parent(parent)?;
                let parent_node = self.node_mut(parent)?;
                let slot = slot_for(parent_node.kind(), kind).ok_or_else(|| {
                    Error::Structure(format!(
                        "<{}> has no slot for <{}>",
                        parent_node.kind(),
                        kind
                    ))
                })?;
                parent_node.adopt(slot, id)?;
            }
        }

        trace!(element = %kind, context = ?context, node = id.index(), "built element");
        self.nodes.push(node);
        Ok(id)
    }

    /// Interpret and store a typed attribute on `node`
    pub fn build_attribute(&mut self, node: NodeId, kind: AttributeKind, value: &str) -> Result<()> {
        let element = self.node(node)?.kind();
        let invalid = |reason| Error::InvalidAttributeValue {
            element: element.local_name().to_string(),
            attribute: kind.to_string(),
            value: value.to_string(),
            reason,
            position: None,
        };

        if kind == AttributeKind::Id {
            let id = NcName::parse(value).map_err(invalid)?;
            self.node_mut(node)?.set_id(id);
            return Ok(());
        }

        let parsed = AttributeValue::parse(kind, value, |prefix| {
            self.lookup_namespace(node, prefix).map(str::to_string)
        })
        .map_err(invalid)?;

        if self.node_mut(node)?.properties_mut().assign(kind, parsed) {
            Ok(())
        } else {
            Err(Error::Structure(format!(
                "<{}> has no property for attribute '{}'",
                element, kind
            )))
        }
    }

    /// Keep an attribute from a foreign namespace on `node`
    pub fn build_foreign_attribute(&mut self, node: NodeId, name: QName, value: &str) -> Result<()> {
        self.node_mut(node)?.push_foreign_attribute(ForeignAttribute {
            name,
            value: value.to_string(),
        });
        Ok(())
    }

    /// Record a namespace declaration made on `node`
    pub fn bind_namespace(&mut self, node: NodeId, prefix: &str, namespace: &str) -> Result<()> {
        self.node_mut(node)?.namespaces_mut().bind(prefix, namespace)?;
        Ok(())
    }

    /// Store the verbatim content of a leaf element
    pub fn build_leaf_content(&mut self, node: NodeId, content: LeafContent) -> Result<()> {
        self.node_mut(node)?.set_content(content);
        Ok(())
    }

    /// Namespace bound to `prefix` in scope at `node`
    pub fn lookup_namespace(&self, node: NodeId, prefix: &str) -> Option<&str> {
        lookup_namespace(&self.nodes, node, prefix)
    }

    /// Hand over the finished document
    pub fn finish(self) -> Result<SchemaDocument> {
        let root = self
            .root
            .ok_or_else(|| Error::Structure("no schema element was built".to_string()))?;
        Ok(SchemaDocument::new(self.nodes, root))
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.index())
            .ok_or_else(|| Error::Structure(format!("unknown node {}", id.index())))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .ok_or_else(|| Error::Structure(format!("unknown node {}", id.index())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;
    use crate::grammar::ElementKind;
    use crate::model::{Properties, SlotKind};
    use crate::XSD_NAMESPACE;

    fn schema_with_element() -> (DocumentBuilder, NodeId, NodeId) {
        let mut builder = DocumentBuilder::new();
        let schema = builder.build_element(None, ContextId::Schema).unwrap();
        builder.bind_namespace(schema, "xs", XSD_NAMESPACE).unwrap();
        let element = builder
            .build_element(Some(schema), ContextId::TopLevelElement)
            .unwrap();
        (builder, schema, element)
    }

    #[test]
    fn test_build_tree() {
        let (mut builder, schema, element) = schema_with_element();
        builder.build_attribute(element, AttributeKind::Name, "order").unwrap();
        builder.build_attribute(element, AttributeKind::Type, "xs:string").unwrap();
        builder.build_attribute(element, AttributeKind::Id, "e1").unwrap();
        assert_eq!(builder.len(), 2);

        let document = builder.finish().unwrap();
        let root = document.root();
        assert_eq!(root.id(), schema);
        assert_eq!(root.slot(SlotKind::Content).len(), 1);

        let order = document.find_global(ElementKind::Element, "order").unwrap();
        assert_eq!(order.id(), element);
        assert_eq!(order.xml_id(), Some("e1"));
        match order.properties() {
            Properties::Element(p) => assert_eq!(
                p.type_name,
                Some(QName::namespaced(XSD_NAMESPACE, "string"))
            ),
            other => panic!("unexpected properties {:?}", other),
        }
    }

    #[test]
    fn test_second_root_is_rejected() {
        let mut builder = DocumentBuilder::new();
        builder.build_element(None, ContextId::Schema).unwrap();
        assert!(matches!(
            builder.build_element(None, ContextId::Schema),
            Err(Error::Structure(_))
        ));
    }

    #[test]
    fn test_child_without_slot_is_rejected() {
        let (mut builder, _, element) = schema_with_element();
        assert!(matches!(
            builder.build_element(Some(element), ContextId::Field),
            Err(Error::Structure(_))
        ));
        assert!(matches!(
            builder.build_element(None, ContextId::Root),
            Err(Error::Structure(_))
        ));
    }

    #[test]
    fn test_second_annotation_fills_singular_slot() {
        let (mut builder, _, element) = schema_with_element();
        builder
            .build_element(Some(element), ContextId::Annotation)
            .unwrap();
        assert!(builder
            .build_element(Some(element), ContextId::Annotation)
            .is_err());
    }

    #[test]
    fn test_invalid_attribute_value() {
        let (mut builder, _, element) = schema_with_element();
        let err = builder
            .build_attribute(element, AttributeKind::Type, "tns:missing")
            .unwrap_err();
        match err {
            Error::InvalidAttributeValue {
                element, attribute, reason, ..
            } => {
                assert_eq!(element, "element");
                assert_eq!(attribute, "type");
                assert_eq!(reason, ValueError::UnboundPrefix("tns".to_string()));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_attribute_without_property() {
        let (mut builder, _, element) = schema_with_element();
        assert!(matches!(
            builder.build_attribute(element, AttributeKind::Base, "xs:string"),
            Err(Error::Structure(_))
        ));
    }

    #[test]
    fn test_reserved_namespace_binding() {
        let (mut builder, _, element) = schema_with_element();
        assert!(matches!(
            builder.bind_namespace(element, "xml", "urn:not-xml"),
            Err(Error::Namespace(_))
        ));
        assert_eq!(builder.lookup_namespace(element, "xs"), Some(XSD_NAMESPACE));
    }

    #[test]
    fn test_finish_requires_root() {
        assert!(matches!(
            DocumentBuilder::new().finish(),
            Err(Error::Structure(_))
        ));
    }
}
