//! Typed child slots
//!
//! Every child of a schema component lands in a named slot of its parent:
//! the annotation, the type definition, the particles, the facets and so
//! on. Singular slots hold at most one child.

use serde::Serialize;

use super::NodeId;
use crate::error::{Error, Result};
use crate::grammar::ElementKind;

/// Named role of a child within its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotKind {
    /// The leading `annotation`
    Annotation,
    /// Anonymous type definition
    Type,
    /// Derivation step (`restriction`, `extension`, `list`, `union`, content models)
    Derivation,
    /// The single content particle of a type or named group
    Particle,
    /// Particles of a compositor
    Particles,
    /// Constraining facets
    Facets,
    /// Attribute uses and attribute group references
    Attributes,
    /// Attribute wildcard
    AnyAttribute,
    /// Identity constraints
    Constraints,
    /// Identity-constraint selector
    Selector,
    /// Identity-constraint fields
    Fields,
    /// Anonymous member types of a union
    MemberTypes,
    /// Ordered content of `schema`, `redefine` and `annotation`
    Content,
}

impl SlotKind {
    /// Check if the slot holds any number of children
    pub fn is_many(&self) -> bool {
        matches!(
            self,
            SlotKind::Particles
                | SlotKind::Facets
                | SlotKind::Attributes
                | SlotKind::Constraints
                | SlotKind::Fields
                | SlotKind::MemberTypes
                | SlotKind::Content
        )
    }
}

/// Slot that a `child` element occupies inside `parent`, if it may appear there
pub fn slot_for(parent: ElementKind, child: ElementKind) -> Option<SlotKind> {
    use ElementKind as E;

    let slot = match (parent, child) {
        (
            E::Schema,
            E::Include
            | E::Import
            | E::Redefine
            | E::Annotation
            | E::SimpleType
            | E::ComplexType
            | E::Group
            | E::AttributeGroup
            | E::Element
            | E::Attribute
            | E::Notation,
        ) => SlotKind::Content,
        (
            E::Redefine,
            E::Annotation | E::SimpleType | E::ComplexType | E::Group | E::AttributeGroup,
        ) => SlotKind::Content,
        (E::Annotation, E::Appinfo | E::Documentation) => SlotKind::Content,
        (E::Schema | E::Redefine | E::Annotation | E::Appinfo | E::Documentation, _) => {
            return None
        }
        (_, E::Annotation) => SlotKind::Annotation,

        (E::SimpleType, E::Restriction | E::List | E::Union) => SlotKind::Derivation,
        (E::ComplexType, E::SimpleContent | E::ComplexContent) => SlotKind::Derivation,
        (E::SimpleContent | E::ComplexContent, E::Restriction | E::Extension) => {
            SlotKind::Derivation
        }

        (E::Restriction | E::List | E::Attribute, E::SimpleType) => SlotKind::Type,
        (E::Element, E::SimpleType | E::ComplexType) => SlotKind::Type,
        (E::Union, E::SimpleType) => SlotKind::MemberTypes,
        (E::Restriction, facet) if facet.is_facet() => SlotKind::Facets,

        (
            E::ComplexType | E::Restriction | E::Extension,
            E::Group | E::All | E::Choice | E::Sequence,
        ) => SlotKind::Particle,
        (E::Group, E::All | E::Choice | E::Sequence) => SlotKind::Particle,
        (
            E::All | E::Choice | E::Sequence,
            E::Element | E::Group | E::Choice | E::Sequence | E::Any,
        ) => SlotKind::Particles,

        (
            E::ComplexType | E::Restriction | E::Extension | E::AttributeGroup,
            E::Attribute | E::AttributeGroup,
        ) => SlotKind::Attributes,
        (
            E::ComplexType | E::Restriction | E::Extension | E::AttributeGroup,
            E::AnyAttribute,
        ) => SlotKind::AnyAttribute,

        (E::Element, E::Unique | E::Key | E::Keyref) => SlotKind::Constraints,
        (E::Unique | E::Key | E::Keyref, E::Selector) => SlotKind::Selector,
        (E::Unique | E::Key | E::Keyref, E::Field) => SlotKind::Fields,

        _ => return None,
    };
    Some(slot)
}

/// Content of one slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Singular slot
    Single(NodeId),
    /// Repeated slot, in document order
    Many(Vec<NodeId>),
}

impl Slot {
    /// Children held by the slot
    pub fn nodes(&self) -> &[NodeId] {
        match self {
            Slot::Single(node) => std::slice::from_ref(node),
            Slot::Many(nodes) => nodes,
        }
    }
}

/// Slots of one node, created as children arrive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildSlots {
    slots: Vec<(SlotKind, Slot)>,
}

impl ChildSlots {
    /// Put `child` into `slot`.
    ///
    /// Fails if `slot` is singular and already filled.
    pub fn insert(&mut self, kind: SlotKind, child: NodeId) -> Result<()> {
        match self.slots.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, Slot::Many(nodes))) => nodes.push(child),
            Some((_, Slot::Single(existing))) => {
                return Err(Error::Structure(format!(
                    "slot {:?} already holds node {}",
                    kind,
                    existing.index()
                )))
            }
            None if kind.is_many() => self.slots.push((kind, Slot::Many(vec![child]))),
            None => self.slots.push((kind, Slot::Single(child))),
        }
        Ok(())
    }

    /// Content of a slot, if anything was put there
    pub fn get(&self, kind: SlotKind) -> Option<&Slot> {
        self.slots
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, slot)| slot)
    }

    /// Filled slots, in the order they were first filled
    pub fn iter(&self) -> impl Iterator<Item = (SlotKind, &Slot)> {
        self.slots.iter().map(|(kind, slot)| (*kind, slot))
    }

    /// Check if no slot is filled
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
