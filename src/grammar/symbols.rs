//! Alphabet of the schema grammar
//!
//! Element kinds are the symbols consumed by the content-model automata,
//! context identifiers name the grammar that applies inside an element, and
//! attribute kinds name the typed attributes each context understands.

use serde::Serialize;
use std::fmt;

use crate::XML_NAMESPACE;

macro_rules! element_kinds {
    ( $( $(#[$vmeta:meta])* $variant:ident => $name:literal ),+ $(,)? ) => {
        /// Local name of an element in the XML Schema namespace
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ElementKind {
            $( $(#[$vmeta])* $variant ),+
        }

        impl ElementKind {
            /// Every element kind, in declaration order
            pub const ALL: &'static [ElementKind] = &[$(ElementKind::$variant),+];

            /// Local name in the XML Schema namespace
            pub fn local_name(&self) -> &'static str {
                match self {
                    $( ElementKind::$variant => $name ),+
                }
            }

            /// Look up an element kind by local name
            pub fn from_local_name(name: &str) -> Option<Self> {
                match name {
                    $( $name => Some(ElementKind::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

element_kinds! {
    /// `xs:schema`
    Schema => "schema",
    /// `xs:include`
    Include => "include",
    /// `xs:import`
    Import => "import",
    /// `xs:redefine`
    Redefine => "redefine",
    /// `xs:annotation`
    Annotation => "annotation",
    /// `xs:appinfo`
    Appinfo => "appinfo",
    /// `xs:documentation`
    Documentation => "documentation",
    /// `xs:simpleType`
    SimpleType => "simpleType",
    /// `xs:complexType`
    ComplexType => "complexType",
    /// `xs:group`
    Group => "group",
    /// `xs:attributeGroup`
    AttributeGroup => "attributeGroup",
    /// `xs:element`
    Element => "element",
    /// `xs:attribute`
    Attribute => "attribute",
    /// `xs:notation`
    Notation => "notation",
    /// `xs:restriction`
    Restriction => "restriction",
    /// `xs:extension`
    Extension => "extension",
    /// `xs:list`
    List => "list",
    /// `xs:union`
    Union => "union",
    /// `xs:simpleContent`
    SimpleContent => "simpleContent",
    /// `xs:complexContent`
    ComplexContent => "complexContent",
    /// `xs:minExclusive`
    MinExclusive => "minExclusive",
    /// `xs:minInclusive`
    MinInclusive => "minInclusive",
    /// `xs:maxExclusive`
    MaxExclusive => "maxExclusive",
    /// `xs:maxInclusive`
    MaxInclusive => "maxInclusive",
    /// `xs:totalDigits`
    TotalDigits => "totalDigits",
    /// `xs:fractionDigits`
    FractionDigits => "fractionDigits",
    /// `xs:length`
    Length => "length",
    /// `xs:minLength`
    MinLength => "minLength",
    /// `xs:maxLength`
    MaxLength => "maxLength",
    /// `xs:enumeration`
    Enumeration => "enumeration",
    /// `xs:whiteSpace`
    WhiteSpace => "whiteSpace",
    /// `xs:pattern`
    Pattern => "pattern",
    /// `xs:all`
    All => "all",
    /// `xs:choice`
    Choice => "choice",
    /// `xs:sequence`
    Sequence => "sequence",
    /// `xs:any`
    Any => "any",
    /// `xs:anyAttribute`
    AnyAttribute => "anyAttribute",
    /// `xs:unique`
    Unique => "unique",
    /// `xs:key`
    Key => "key",
    /// `xs:keyref`
    Keyref => "keyref",
    /// `xs:selector`
    Selector => "selector",
    /// `xs:field`
    Field => "field",
}

/// Symbols of the content-model automata are element kinds
pub type Symbol = ElementKind;

impl ElementKind {
    /// Check if this is one of the twelve constraining facets
    pub fn is_facet(&self) -> bool {
        matches!(
            self,
            ElementKind::MinExclusive
                | ElementKind::MinInclusive
                | ElementKind::MaxExclusive
                | ElementKind::MaxInclusive
                | ElementKind::TotalDigits
                | ElementKind::FractionDigits
                | ElementKind::Length
                | ElementKind::MinLength
                | ElementKind::MaxLength
                | ElementKind::Enumeration
                | ElementKind::WhiteSpace
                | ElementKind::Pattern
        )
    }

    /// Check if this is a model group compositor
    pub fn is_compositor(&self) -> bool {
        matches!(
            self,
            ElementKind::All | ElementKind::Choice | ElementKind::Sequence
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

impl Serialize for ElementKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.local_name())
    }
}

/// Grammar context of an element.
///
/// The same element kind can follow different grammars depending on where it
/// appears: a top-level `element` carries a name and may not carry
/// occurrence bounds, a local one may; a `restriction` inside `simpleType`
/// holds facets, one inside `complexContent` holds particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[allow(missing_docs)]
pub enum ContextId {
    /// Document level; accepts exactly one `schema`
    Root,
    Schema,
    Include,
    Import,
    Redefine,
    Annotation,
    Appinfo,
    Documentation,
    TopLevelSimpleType,
    LocalSimpleType,
    SimpleTypeRestriction,
    List,
    Union,
    MinExclusive,
    MinInclusive,
    MaxExclusive,
    MaxInclusive,
    TotalDigits,
    FractionDigits,
    Length,
    MinLength,
    MaxLength,
    Enumeration,
    WhiteSpace,
    Pattern,
    TopLevelComplexType,
    LocalComplexType,
    SimpleContent,
    SimpleContentRestriction,
    SimpleContentExtension,
    ComplexContent,
    ComplexContentRestriction,
    ComplexContentExtension,
    TopLevelAttribute,
    LocalAttribute,
    TopLevelAttributeGroup,
    AttributeGroupRef,
    AnyAttribute,
    TopLevelElement,
    LocalElement,
    /// Element particle directly inside `all`
    AllElement,
    /// Named `group` definition
    NamedGroup,
    /// `group` reference used as a particle
    GroupRef,
    All,
    Choice,
    Sequence,
    /// Compositor directly inside a named `group`
    GroupAll,
    GroupChoice,
    GroupSequence,
    Any,
    Unique,
    Key,
    Keyref,
    Selector,
    Field,
    Notation,
}

impl ContextId {
    /// Every context, in declaration order
    pub const ALL: &'static [ContextId] = &[
        ContextId::Root,
        ContextId::Schema,
        ContextId::Include,
        ContextId::Import,
        ContextId::Redefine,
        ContextId::Annotation,
        ContextId::Appinfo,
        ContextId::Documentation,
        ContextId::TopLevelSimpleType,
        ContextId::LocalSimpleType,
        ContextId::SimpleTypeRestriction,
        ContextId::List,
        ContextId::Union,
        ContextId::MinExclusive,
        ContextId::MinInclusive,
        ContextId::MaxExclusive,
        ContextId::MaxInclusive,
        ContextId::TotalDigits,
        ContextId::FractionDigits,
        ContextId::Length,
        ContextId::MinLength,
        ContextId::MaxLength,
        ContextId::Enumeration,
        ContextId::WhiteSpace,
        ContextId::Pattern,
        ContextId::TopLevelComplexType,
        ContextId::LocalComplexType,
        ContextId::SimpleContent,
        ContextId::SimpleContentRestriction,
        ContextId::SimpleContentExtension,
        ContextId::ComplexContent,
        ContextId::ComplexContentRestriction,
        ContextId::ComplexContentExtension,
        ContextId::TopLevelAttribute,
        ContextId::LocalAttribute,
        ContextId::TopLevelAttributeGroup,
        ContextId::AttributeGroupRef,
        ContextId::AnyAttribute,
        ContextId::TopLevelElement,
        ContextId::LocalElement,
        ContextId::AllElement,
        ContextId::NamedGroup,
        ContextId::GroupRef,
        ContextId::All,
        ContextId::Choice,
        ContextId::Sequence,
        ContextId::GroupAll,
        ContextId::GroupChoice,
        ContextId::GroupSequence,
        ContextId::Any,
        ContextId::Unique,
        ContextId::Key,
        ContextId::Keyref,
        ContextId::Selector,
        ContextId::Field,
        ContextId::Notation,
    ];

    /// Element kind built in this context; `None` for the document level
    pub fn element_kind(&self) -> Option<ElementKind> {
        use ContextId as C;
        use ElementKind as E;

        let kind = match self {
            C::Root => return None,
            C::Schema => E::Schema,
            C::Include => E::Include,
            C::Import => E::Import,
            C::Redefine => E::Redefine,
            C::Annotation => E::Annotation,
            C::Appinfo => E::Appinfo,
            C::Documentation => E::Documentation,
            C::TopLevelSimpleType | C::LocalSimpleType => E::SimpleType,
            C::SimpleTypeRestriction | C::SimpleContentRestriction | C::ComplexContentRestriction => {
                E::Restriction
            }
            C::SimpleContentExtension | C::ComplexContentExtension => E::Extension,
            C::List => E::List,
            C::Union => E::Union,
            C::MinExclusive => E::MinExclusive,
            C::MinInclusive => E::MinInclusive,
            C::MaxExclusive => E::MaxExclusive,
            C::MaxInclusive => E::MaxInclusive,
            C::TotalDigits => E::TotalDigits,
            C::FractionDigits => E::FractionDigits,
            C::Length => E::Length,
            C::MinLength => E::MinLength,
            C::MaxLength => E::MaxLength,
            C::Enumeration => E::Enumeration,
            C::WhiteSpace => E::WhiteSpace,
            C::Pattern => E::Pattern,
            C::TopLevelComplexType | C::LocalComplexType => E::ComplexType,
            C::SimpleContent => E::SimpleContent,
            C::ComplexContent => E::ComplexContent,
            C::TopLevelAttribute | C::LocalAttribute => E::Attribute,
            C::TopLevelAttributeGroup | C::AttributeGroupRef => E::AttributeGroup,
            C::AnyAttribute => E::AnyAttribute,
            C::TopLevelElement | C::LocalElement | C::AllElement => E::Element,
            C::NamedGroup | C::GroupRef => E::Group,
            C::All | C::GroupAll => E::All,
            C::Choice | C::GroupChoice => E::Choice,
            C::Sequence | C::GroupSequence => E::Sequence,
            C::Any => E::Any,
            C::Unique => E::Unique,
            C::Key => E::Key,
            C::Keyref => E::Keyref,
            C::Selector => E::Selector,
            C::Field => E::Field,
            C::Notation => E::Notation,
        };
        Some(kind)
    }

    /// Local name of the element built in this context, `#document` at the top
    pub fn element_name(&self) -> &'static str {
        self.element_kind().map_or("#document", |kind| kind.local_name())
    }
}

macro_rules! attribute_kinds {
    (@ns) => { None };
    (@ns $ns:expr) => { Some($ns) };
    ( $( $(#[$vmeta:meta])* $variant:ident => $name:literal $(in $ns:expr)? ),+ $(,)? ) => {
        /// Typed attribute understood by some grammar context.
        ///
        /// Several kinds share a lexical name (`value`, `final`, `maxOccurs`)
        /// but differ in the datatype their value must conform to.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum AttributeKind {
            $( $(#[$vmeta])* $variant ),+
        }

        impl AttributeKind {
            /// Every attribute kind, in declaration order
            pub const ALL: &'static [AttributeKind] = &[$(AttributeKind::$variant),+];

            /// Local name of the attribute
            pub fn local_name(&self) -> &'static str {
                match self {
                    $( AttributeKind::$variant => $name ),+
                }
            }

            /// Namespace of the attribute; `None` for unqualified attributes
            pub fn namespace(&self) -> Option<&'static str> {
                match self {
                    $( AttributeKind::$variant => attribute_kinds!(@ns $($ns)?) ),+
                }
            }
        }
    };
}

attribute_kinds! {
    /// `id` (ID)
    Id => "id",
    /// `name` (NCName)
    Name => "name",
    /// `ref` (QName)
    Ref => "ref",
    /// `type` (QName)
    Type => "type",
    /// `base` (QName)
    Base => "base",
    /// `itemType` (QName)
    ItemType => "itemType",
    /// `memberTypes` (list of QName)
    MemberTypes => "memberTypes",
    /// `substitutionGroup` (QName)
    SubstitutionGroup => "substitutionGroup",
    /// `refer` (QName)
    Refer => "refer",
    /// `targetNamespace` (anyURI)
    TargetNamespace => "targetNamespace",
    /// `import/@namespace` (anyURI)
    ImportNamespace => "namespace",
    /// `any/@namespace` and `anyAttribute/@namespace` (namespaceList)
    WildcardNamespace => "namespace",
    /// `schemaLocation` (anyURI)
    SchemaLocation => "schemaLocation",
    /// `source` (anyURI)
    Source => "source",
    /// `public` (token)
    Public => "public",
    /// `system` (anyURI)
    System => "system",
    /// `version` (token)
    Version => "version",
    /// `xml:lang` (language)
    XmlLang => "lang" in XML_NAMESPACE,
    /// `elementFormDefault` (formChoice)
    ElementFormDefault => "elementFormDefault",
    /// `attributeFormDefault` (formChoice)
    AttributeFormDefault => "attributeFormDefault",
    /// `form` (formChoice)
    Form => "form",
    /// `blockDefault` (blockSet)
    BlockDefault => "blockDefault",
    /// `finalDefault` (fullDerivationSet)
    FinalDefault => "finalDefault",
    /// `element/@block` (blockSet)
    Block => "block",
    /// `complexType/@block` (derivationSet)
    TypeBlock => "block",
    /// `element/@final` and `complexType/@final` (derivationSet)
    Final => "final",
    /// `simpleType/@final` (simpleDerivationSet)
    SimpleFinal => "final",
    /// `abstract` (boolean)
    Abstract => "abstract",
    /// `nillable` (boolean)
    Nillable => "nillable",
    /// `mixed` (boolean)
    Mixed => "mixed",
    /// `default` (string)
    Default => "default",
    /// `fixed` on declarations (string)
    Fixed => "fixed",
    /// `fixed` on facets (boolean)
    FacetFixed => "fixed",
    /// `minOccurs` (nonNegativeInteger)
    MinOccurs => "minOccurs",
    /// `maxOccurs` (nonNegativeInteger or `unbounded`)
    MaxOccurs => "maxOccurs",
    /// `minOccurs` restricted to 0 or 1
    NarrowMinOccurs => "minOccurs",
    /// `maxOccurs` restricted to 0 or 1
    NarrowMaxOccurs => "maxOccurs",
    /// `all/@maxOccurs`, which may only be 1
    AllMaxOccurs => "maxOccurs",
    /// `use` (optional, prohibited, required)
    Use => "use",
    /// `processContents` (skip, lax, strict)
    ProcessContents => "processContents",
    /// `xpath` of selectors and fields
    XPath => "xpath",
    /// Facet `value` kept as a literal string
    Value => "value",
    /// Facet `value` of length-like facets (nonNegativeInteger)
    LengthValue => "value",
    /// `totalDigits/@value` (positiveInteger)
    TotalDigitsValue => "value",
    /// `whiteSpace/@value` (preserve, replace, collapse)
    WhiteSpaceValue => "value",
    /// `pattern/@value` (regular expression)
    PatternValue => "value",
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace() {
            Some(XML_NAMESPACE) => write!(f, "xml:{}", self.local_name()),
            _ => f.write_str(self.local_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_element_kind_lookup() {
        assert_eq!(ElementKind::ALL.len(), 42);
        for kind in ElementKind::ALL {
            assert_eq!(ElementKind::from_local_name(kind.local_name()), Some(*kind));
        }
        assert_eq!(ElementKind::from_local_name("Sequence"), None);
        assert_eq!(ElementKind::from_local_name("redefine"), Some(ElementKind::Redefine));
    }

    #[test]
    fn test_facets_and_compositors() {
        let facets = ElementKind::ALL.iter().filter(|k| k.is_facet()).count();
        assert_eq!(facets, 12);
        assert!(ElementKind::Choice.is_compositor());
        assert!(!ElementKind::Group.is_compositor());
    }

    #[test]
    fn test_every_context_but_root_builds_an_element() {
        assert_eq!(ContextId::ALL.len(), 56);
        let unique: HashSet<_> = ContextId::ALL.iter().collect();
        assert_eq!(unique.len(), ContextId::ALL.len());

        assert_eq!(ContextId::Root.element_kind(), None);
        assert_eq!(ContextId::Root.element_name(), "#document");
        for context in &ContextId::ALL[1..] {
            assert!(context.element_kind().is_some(), "{:?}", context);
        }
        assert_eq!(
            ContextId::ComplexContentExtension.element_kind(),
            Some(ElementKind::Extension)
        );
    }

    #[test]
    fn test_attribute_kind_names() {
        assert_eq!(AttributeKind::XmlLang.local_name(), "lang");
        assert_eq!(AttributeKind::XmlLang.namespace(), Some(XML_NAMESPACE));
        assert_eq!(AttributeKind::XmlLang.to_string(), "xml:lang");
        assert_eq!(AttributeKind::TypeBlock.to_string(), "block");
        assert_eq!(AttributeKind::Name.namespace(), None);
        assert!(AttributeKind::ALL
            .iter()
            .filter(|k| **k != AttributeKind::XmlLang)
            .all(|k| k.namespace().is_none()));
    }
}
