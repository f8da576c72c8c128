//! Schema document model
//!
//! The parsed document is an arena of [`Node`]s addressed by [`NodeId`].
//! Parents own their children through typed slots; children keep a
//! non-owning back reference to their parent. [`NodeRef`] is the borrowed
//! view used to navigate a finished [`SchemaDocument`].

pub mod properties;
pub mod slots;

pub use properties::*;
pub use slots::{slot_for, ChildSlots, Slot, SlotKind};

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::grammar::{ContextId, ElementKind};
use crate::namespaces::{NamespaceBindings, QName};
use crate::values::{NcName, Occurs};
use crate::XML_NAMESPACE;

/// Index of a node inside its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Position in document order
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Verbatim content of `appinfo` and `documentation`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeafContent {
    /// Concatenated character data of all descendants
    pub text: String,
    /// Source text between the start and end tags, markup included
    pub markup: String,
}

/// Attribute from a non-schema namespace, kept as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignAttribute {
    /// Qualified attribute name
    pub name: QName,
    /// Raw value
    pub value: String,
}

/// A schema component in the arena
#[derive(Debug, Clone)]
pub struct Node {
    kind: ElementKind,
    context: ContextId,
    parent: Option<NodeId>,
    slots: ChildSlots,
    children: Vec<NodeId>,
    namespaces: NamespaceBindings,
    id: Option<NcName>,
    properties: Properties,
    content: Option<LeafContent>,
    foreign_attributes: Vec<ForeignAttribute>,
}

impl Node {
    /// Create a detached node built in `context`
    pub(crate) fn new(kind: ElementKind, context: ContextId) -> Self {
        Self {
            kind,
            context,
            parent: None,
            slots: ChildSlots::default(),
            children: Vec::new(),
            namespaces: NamespaceBindings::new(),
            id: None,
            properties: Properties::for_kind(kind),
            content: None,
            foreign_attributes: Vec::new(),
        }
    }

    /// Set the back reference; a node is attached at most once
    pub(crate) fn attach_parent(&mut self, parent: NodeId) -> Result<()> {
        match self.parent {
            Some(existing) => Err(Error::Structure(format!(
                "<{}> is already attached to node {}",
                self.kind,
                existing.index()
            ))),
            None => {
                self.parent = Some(parent);
                Ok(())
            }
        }
    }

    /// Record `child` in `slot` and in document order
    pub(crate) fn adopt(&mut self, slot: SlotKind, child: NodeId) -> Result<()> {
        self.slots.insert(slot, child)?;
        self.children.push(child);
        Ok(())
    }

    pub(crate) fn namespaces_mut(&mut self) -> &mut NamespaceBindings {
        &mut self.namespaces
    }

    pub(crate) fn set_id(&mut self, id: NcName) {
        self.id = Some(id);
    }

    pub(crate) fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub(crate) fn set_content(&mut self, content: LeafContent) {
        self.content = Some(content);
    }

    pub(crate) fn push_foreign_attribute(&mut self, attribute: ForeignAttribute) {
        self.foreign_attributes.push(attribute);
    }

    /// Element kind
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Context the node was built in
    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Parent node, `None` for the `schema` element
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Namespace declarations made on this element
    pub fn namespaces(&self) -> &NamespaceBindings {
        &self.namespaces
    }
}

/// Resolve `prefix` at `node` by walking up the parent chain.
///
/// The `xml` prefix is always bound; a default namespace undeclared with
/// `xmlns=""` resolves to `None`.
pub(crate) fn lookup_namespace<'a>(nodes: &'a [Node], node: NodeId, prefix: &str) -> Option<&'a str> {
    let mut current = Some(node);
    while let Some(id) = current {
        let node = nodes.get(id.index())?;
        if let Some(namespace) = node.namespaces.get(prefix) {
            return (!namespace.is_empty()).then_some(namespace);
        }
        current = node.parent;
    }
    (prefix == "xml").then_some(XML_NAMESPACE)
}

/// A parsed schema document
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SchemaDocument {
    pub(crate) fn new(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    /// The `schema` element
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            document: self,
            id: self.root,
        }
    }

    /// View of a node
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.index() < self.nodes.len()).then_some(NodeRef { document: self, id })
    }

    /// Number of schema elements in the document
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in document order
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(move |index| NodeRef {
            document: self,
            id: NodeId(index),
        })
    }

    /// Top-level component of `kind` named `name`
    pub fn find_global(&self, kind: ElementKind, name: &str) -> Option<NodeRef<'_>> {
        self.root()
            .children()
            .find(|child| child.kind() == kind && child.name() == Some(name))
    }

    /// Target namespace declared on `schema`
    pub fn target_namespace(&self) -> Option<&str> {
        match self.root().properties() {
            Properties::Schema(p) => p.target_namespace.as_ref().map(|uri| uri.as_str()),
            _ => None,
        }
    }

    /// JSON rendering of the whole tree
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.root()).unwrap_or(serde_json::Value::Null)
    }
}

/// Borrowed view of one node
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    document: &'a SchemaDocument,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        &self.document.nodes[self.id.index()]
    }

    fn view(&self, id: NodeId) -> NodeRef<'a> {
        NodeRef {
            document: self.document,
            id,
        }
    }

    /// Identifier of this node
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Element kind
    pub fn kind(&self) -> ElementKind {
        self.node().kind
    }

    /// Context the node was built in
    pub fn context(&self) -> ContextId {
        self.node().context
    }

    /// Parent node
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| self.view(id))
    }

    /// Children in document order
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let document = self.document;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { document, id })
    }

    /// Children of a given kind
    pub fn children_of_kind(&self, kind: ElementKind) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children().filter(move |child| child.kind() == kind)
    }

    /// Children held in `slot`
    pub fn slot(&self, slot: SlotKind) -> Vec<NodeRef<'a>> {
        self.node()
            .slots
            .get(slot)
            .map(|slot| slot.nodes().iter().map(|&id| self.view(id)).collect())
            .unwrap_or_default()
    }

    /// The leading annotation
    pub fn annotation(&self) -> Option<NodeRef<'a>> {
        self.slot(SlotKind::Annotation).into_iter().next()
    }

    /// Descendants in document order, excluding this node
    pub fn descendants(&self) -> Vec<NodeRef<'a>> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.node().children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let view = self.view(id);
            stack.extend(view.node().children.iter().rev().copied());
            found.push(view);
        }
        found
    }

    /// Typed properties
    pub fn properties(&self) -> &'a Properties {
        &self.node().properties
    }

    /// `id` attribute
    pub fn xml_id(&self) -> Option<&'a str> {
        self.node().id.as_ref().map(|id| id.as_str())
    }

    /// `name` attribute of named components
    pub fn name(&self) -> Option<&'a str> {
        self.properties().name().map(|name| name.as_str())
    }

    /// Occurrence bounds of particles
    pub fn occurs(&self) -> Option<Occurs> {
        self.properties().occurs()
    }

    /// Verbatim content of `appinfo` and `documentation`
    pub fn content(&self) -> Option<&'a LeafContent> {
        self.node().content.as_ref()
    }

    /// Attributes from foreign namespaces
    pub fn foreign_attributes(&self) -> &'a [ForeignAttribute] {
        &self.node().foreign_attributes
    }

    /// Namespace declarations made on this element
    pub fn namespaces(&self) -> &'a NamespaceBindings {
        &self.node().namespaces
    }

    /// Namespace bound to `prefix` in scope at this element
    pub fn lookup_namespace(&self, prefix: &str) -> Option<&'a str> {
        lookup_namespace(&self.document.nodes, self.id, prefix)
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let node = self.node();
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", &node.kind)?;
        if let Some(id) = &node.id {
            map.serialize_entry("id", id)?;
        }
        if !node.namespaces.is_empty() {
            let bindings: Vec<_> = node.namespaces.iter().collect();
            map.serialize_entry("namespaces", &bindings)?;
        }
        if node.properties != Properties::None {
            map.serialize_entry("properties", &node.properties)?;
        }
        if let Some(content) = &node.content {
            map.serialize_entry("content", content)?;
        }
        if !node.foreign_attributes.is_empty() {
            map.serialize_entry("foreignAttributes", &node.foreign_attributes)?;
        }
        if !node.children.is_empty() {
            let children: Vec<_> = self.children().collect();
            map.serialize_entry("children", &children)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::AttributeKind;

    /// schema > element > complexType, built by hand
    fn small_document() -> SchemaDocument {
        let mut schema = Node::new(ElementKind::Schema, ContextId::Schema);
        schema.namespaces_mut().bind("", "urn:default").unwrap();
        let mut element = Node::new(ElementKind::Element, ContextId::TopLevelElement);
        let mut complex = Node::new(ElementKind::ComplexType, ContextId::LocalComplexType);

        schema.adopt(SlotKind::Content, NodeId(1)).unwrap();
        element.attach_parent(NodeId(0)).unwrap();
        element
            .properties_mut()
            .assign(AttributeKind::Name, AttributeValue::NcName(NcName::parse("order").unwrap()));
        element.adopt(SlotKind::Type, NodeId(2)).unwrap();
        element.namespaces_mut().bind("", "").unwrap();
        complex.attach_parent(NodeId(1)).unwrap();

        SchemaDocument::new(vec![schema, element, complex], NodeId(0))
    }

    #[test]
    fn test_navigation() {
        let document = small_document();
        let root = document.root();
        assert_eq!(root.kind(), ElementKind::Schema);
        assert!(root.parent().is_none());

        let element = document.find_global(ElementKind::Element, "order").unwrap();
        assert_eq!(element.parent().map(|p| p.id()), Some(root.id()));
        assert_eq!(element.slot(SlotKind::Type).len(), 1);
        assert_eq!(root.descendants().len(), 2);
        assert_eq!(document.iter().count(), document.node_count());
        assert!(document.find_global(ElementKind::Element, "missing").is_none());
    }

    #[test]
    fn test_namespace_lookup_walks_ancestors() {
        let document = small_document();
        let root = document.root();
        assert_eq!(root.lookup_namespace(""), Some("urn:default"));
        assert_eq!(root.lookup_namespace("xml"), Some(XML_NAMESPACE));
        assert_eq!(root.lookup_namespace("tns"), None);

        // undeclared on the element, so its subtree has no default namespace
        let complex = document.node(NodeId(2)).unwrap();
        assert_eq!(complex.lookup_namespace(""), None);
    }

    #[test]
    fn test_attach_twice_is_structural_error() {
        let mut node = Node::new(ElementKind::Sequence, ContextId::Sequence);
        node.attach_parent(NodeId(0)).unwrap();
        assert!(matches!(node.attach_parent(NodeId(1)), Err(Error::Structure(_))));
        assert_eq!(node.parent(), Some(NodeId(0)));
    }

    #[test]
    fn test_json_rendering() {
        let document = small_document();
        let json = document.to_json();
        assert_eq!(json["kind"], "schema");
        assert_eq!(json["children"][0]["kind"], "element");
        assert_eq!(json["children"][0]["properties"]["name"], "order");
        assert_eq!(json["children"][0]["children"][0]["kind"], "complexType");
    }
}
