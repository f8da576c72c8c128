//! Typed properties of schema components
//!
//! Each element kind owns one property record. Attribute values are first
//! interpreted against their datatype ([`AttributeValue::parse`]) and then
//! stored into the matching field ([`Properties::assign`]).

use serde::Serialize;

use crate::error::ValueError;
use crate::grammar::{AttributeKind, ElementKind};
use crate::namespaces::{resolve_qname, QName};
use crate::values::{
    collapse_whitespace, parse_boolean, parse_bounded_integer, parse_non_negative_integer,
    parse_positive_integer, validate_pattern, validate_xpath, AnyUri, AttributeUse,
    DerivationSet, Form, Language, MaxOccurs, NamespaceList, NcName, Occurs, ProcessContents,
    WhiteSpace, BLOCK_SET, DERIVATION_SET, FULL_DERIVATION_SET, SIMPLE_DERIVATION_SET,
};

/// An interpreted attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// NCName
    NcName(NcName),
    /// Resolved QName
    QName(QName),
    /// List of resolved QNames
    QNames(Vec<QName>),
    /// anyURI
    Uri(AnyUri),
    /// Wildcard namespace constraint
    Namespaces(NamespaceList),
    /// Language tag
    Language(Language),
    /// Uninterpreted or whitespace-collapsed string
    Text(String),
    /// Boolean
    Boolean(bool),
    /// Non-negative count
    Count(u64),
    /// Upper occurrence bound
    MaxOccurs(MaxOccurs),
    /// Qualification form
    Form(Form),
    /// Attribute use
    Use(AttributeUse),
    /// Wildcard processing mode
    ProcessContents(ProcessContents),
    /// White space handling
    WhiteSpace(WhiteSpace),
    /// Blocked or final derivation methods
    Derivations(DerivationSet),
}

impl AttributeValue {
    /// Interpret `raw` as the datatype of attribute `kind`.
    ///
    /// `lookup` resolves namespace prefixes visible at the element carrying
    /// the attribute; it is only consulted for QName-valued attributes.
    pub fn parse<F>(kind: AttributeKind, raw: &str, lookup: F) -> Result<Self, ValueError>
    where
        F: Fn(&str) -> Option<String>,
    {
        use AttributeKind as A;
        use AttributeValue as V;

        let value = match kind {
            A::Id | A::Name => V::NcName(NcName::parse(raw)?),
            A::Ref | A::Type | A::Base | A::ItemType | A::SubstitutionGroup | A::Refer => {
                V::QName(resolve_qname(raw, &lookup)?)
            }
            A::MemberTypes => V::QNames(
                raw.split_ascii_whitespace()
                    .map(|token| resolve_qname(token, &lookup))
                    .collect::<Result<_, _>>()?,
            ),
            A::TargetNamespace | A::ImportNamespace | A::SchemaLocation | A::Source | A::System => {
                V::Uri(AnyUri::parse(raw)?)
            }
            A::WildcardNamespace => V::Namespaces(NamespaceList::parse(raw)?),
            A::Public | A::Version => V::Text(collapse_whitespace(raw)),
            A::XmlLang => V::Language(Language::parse(raw)?),
            A::ElementFormDefault | A::AttributeFormDefault | A::Form => V::Form(Form::parse(raw)?),
            A::BlockDefault | A::Block => V::Derivations(DerivationSet::parse(raw, BLOCK_SET)?),
            A::FinalDefault => V::Derivations(DerivationSet::parse(raw, FULL_DERIVATION_SET)?),
            A::TypeBlock | A::Final => V::Derivations(DerivationSet::parse(raw, DERIVATION_SET)?),
            A::SimpleFinal => V::Derivations(DerivationSet::parse(raw, SIMPLE_DERIVATION_SET)?),
            A::Abstract | A::Nillable | A::Mixed | A::FacetFixed => V::Boolean(parse_boolean(raw)?),
            A::Default | A::Fixed | A::Value => V::Text(raw.to_string()),
            A::MinOccurs | A::LengthValue => V::Count(parse_non_negative_integer(raw)?),
            A::TotalDigitsValue => V::Count(parse_positive_integer(raw)?),
            A::NarrowMinOccurs => V::Count(parse_bounded_integer(raw, 0, 1)?),
            A::MaxOccurs => V::MaxOccurs(MaxOccurs::parse(raw)?),
            A::NarrowMaxOccurs => V::MaxOccurs(MaxOccurs::Bounded(parse_bounded_integer(raw, 0, 1)?)),
            A::AllMaxOccurs => V::MaxOccurs(MaxOccurs::Bounded(parse_bounded_integer(raw, 1, 1)?)),
            A::Use => V::Use(AttributeUse::parse(raw)?),
            A::ProcessContents => V::ProcessContents(ProcessContents::parse(raw)?),
            A::WhiteSpaceValue => V::WhiteSpace(WhiteSpace::parse(raw)?),
            A::PatternValue => {
                validate_pattern(raw)?;
                V::Text(raw.to_string())
            }
            A::XPath => V::Text(validate_xpath(raw)?),
        };
        Ok(value)
    }
}

/// `schema`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct SchemaProperties {
    pub target_namespace: Option<AnyUri>,
    pub version: Option<String>,
    pub final_default: Option<DerivationSet>,
    pub block_default: Option<DerivationSet>,
    pub attribute_form_default: Option<Form>,
    pub element_form_default: Option<Form>,
    pub lang: Option<Language>,
}

/// `include`, `import` and `redefine`.
///
/// Locations are recorded only; referenced documents are not loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct LocationProperties {
    pub namespace: Option<AnyUri>,
    pub schema_location: Option<AnyUri>,
}

/// `appinfo` and `documentation`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct DocumentationProperties {
    pub source: Option<AnyUri>,
    pub lang: Option<Language>,
}

/// `simpleType`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct SimpleTypeProperties {
    pub name: Option<NcName>,
    #[serde(rename = "final")]
    pub final_derivation: Option<DerivationSet>,
}

/// `restriction` and `extension`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct DerivationProperties {
    pub base: Option<QName>,
}

/// `list`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ListProperties {
    pub item_type: Option<QName>,
}

/// `union`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct UnionProperties {
    pub member_types: Option<Vec<QName>>,
}

/// Value of a constraining facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FacetValue {
    /// Literal in the base type's lexical space (bounds, enumeration)
    Literal(String),
    /// Length or digit count
    Count(u64),
    /// White space handling
    WhiteSpace(WhiteSpace),
    /// Regular expression, validated but kept verbatim
    Pattern(String),
}

/// The twelve constraining facets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct FacetProperties {
    pub value: Option<FacetValue>,
    pub fixed: Option<bool>,
}

/// `complexType`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct ComplexTypeProperties {
    pub name: Option<NcName>,
    pub mixed: Option<bool>,
    #[serde(rename = "abstract")]
    pub is_abstract: Option<bool>,
    #[serde(rename = "final")]
    pub final_derivation: Option<DerivationSet>,
    pub block: Option<DerivationSet>,
}

/// `simpleContent` and `complexContent`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct ContentProperties {
    pub mixed: Option<bool>,
}

/// `attribute`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct AttributeProperties {
    pub name: Option<NcName>,
    #[serde(rename = "ref")]
    pub reference: Option<QName>,
    #[serde(rename = "type")]
    pub type_name: Option<QName>,
    #[serde(rename = "use")]
    pub attribute_use: Option<AttributeUse>,
    pub default: Option<String>,
    pub fixed: Option<String>,
    pub form: Option<Form>,
}

/// `attributeGroup`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct AttributeGroupProperties {
    pub name: Option<NcName>,
    #[serde(rename = "ref")]
    pub reference: Option<QName>,
}

/// `any` and `anyAttribute`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct WildcardProperties {
    pub namespace: Option<NamespaceList>,
    pub process_contents: Option<ProcessContents>,
    pub min_occurs: Option<u64>,
    pub max_occurs: Option<MaxOccurs>,
}

/// `element`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ElementProperties {
    pub name: Option<NcName>,
    #[serde(rename = "ref")]
    pub reference: Option<QName>,
    #[serde(rename = "type")]
    pub type_name: Option<QName>,
    pub substitution_group: Option<QName>,
    pub min_occurs: Option<u64>,
    pub max_occurs: Option<MaxOccurs>,
    pub default: Option<String>,
    pub fixed: Option<String>,
    pub nillable: Option<bool>,
    #[serde(rename = "abstract")]
    pub is_abstract: Option<bool>,
    #[serde(rename = "final")]
    pub final_derivation: Option<DerivationSet>,
    pub block: Option<DerivationSet>,
    pub form: Option<Form>,
}

/// `group`, `all`, `choice` and `sequence`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct GroupProperties {
    pub name: Option<NcName>,
    #[serde(rename = "ref")]
    pub reference: Option<QName>,
    pub min_occurs: Option<u64>,
    pub max_occurs: Option<MaxOccurs>,
}

/// `unique`, `key` and `keyref`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct IdentityConstraintProperties {
    pub name: Option<NcName>,
    pub refer: Option<QName>,
}

/// `selector` and `field`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct XPathProperties {
    pub xpath: Option<String>,
}

/// `notation`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct NotationProperties {
    pub name: Option<NcName>,
    pub public: Option<String>,
    pub system: Option<AnyUri>,
}

/// Property record of a node, one variant per family of element kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum Properties {
    /// Elements with no attributes besides `id`
    None,
    Schema(SchemaProperties),
    Location(LocationProperties),
    Documentation(DocumentationProperties),
    SimpleType(SimpleTypeProperties),
    Derivation(DerivationProperties),
    List(ListProperties),
    Union(UnionProperties),
    Facet(FacetProperties),
    ComplexType(ComplexTypeProperties),
    Content(ContentProperties),
    Attribute(AttributeProperties),
    AttributeGroup(AttributeGroupProperties),
    Wildcard(WildcardProperties),
    Element(ElementProperties),
    Group(GroupProperties),
    IdentityConstraint(IdentityConstraintProperties),
    XPath(XPathProperties),
    Notation(NotationProperties),
}

impl Properties {
    /// Empty record for an element kind
    pub fn for_kind(kind: ElementKind) -> Self {
        use ElementKind as E;

        match kind {
            E::Schema => Properties::Schema(Default::default()),
            E::Include | E::Import | E::Redefine => Properties::Location(Default::default()),
            E::Appinfo | E::Documentation => Properties::Documentation(Default::default()),
            E::Annotation => Properties::None,
            E::SimpleType => Properties::SimpleType(Default::default()),
            E::Restriction | E::Extension => Properties::Derivation(Default::default()),
            E::List => Properties::List(Default::default()),
            E::Union => Properties::Union(Default::default()),
            E::ComplexType => Properties::ComplexType(Default::default()),
            E::SimpleContent | E::ComplexContent => Properties::Content(Default::default()),
            E::Attribute => Properties::Attribute(Default::default()),
            E::AttributeGroup => Properties::AttributeGroup(Default::default()),
            E::Any | E::AnyAttribute => Properties::Wildcard(Default::default()),
            E::Element => Properties::Element(Default::default()),
            E::Group | E::All | E::Choice | E::Sequence => Properties::Group(Default::default()),
            E::Unique | E::Key | E::Keyref => Properties::IdentityConstraint(Default::default()),
            E::Selector | E::Field => Properties::XPath(Default::default()),
            E::Notation => Properties::Notation(Default::default()),
            facet => {
                debug_assert!(facet.is_facet());
                Properties::Facet(Default::default())
            }
        }
    }

    /// Store an interpreted attribute value.
    ///
    /// Returns `false` when this record has no field for `kind`.
    pub fn assign(&mut self, kind: AttributeKind, value: AttributeValue) -> bool {
        use AttributeKind as A;
        use AttributeValue as V;
        use Properties as P;

        match (kind, value, self) {
            (A::Name, V::NcName(v), P::SimpleType(p)) => p.name = Some(v),
            (A::Name, V::NcName(v), P::ComplexType(p)) => p.name = Some(v),
            (A::Name, V::NcName(v), P::Attribute(p)) => p.name = Some(v),
            (A::Name, V::NcName(v), P::AttributeGroup(p)) => p.name = Some(v),
            (A::Name, V::NcName(v), P::Element(p)) => p.name = Some(v),
            (A::Name, V::NcName(v), P::Group(p)) => p.name = Some(v),
            (A::Name, V::NcName(v), P::IdentityConstraint(p)) => p.name = Some(v),
            (A::Name, V::NcName(v), P::Notation(p)) => p.name = Some(v),

            (A::Ref, V::QName(v), P::Attribute(p)) => p.reference = Some(v),
            (A::Ref, V::QName(v), P::AttributeGroup(p)) => p.reference = Some(v),
            (A::Ref, V::QName(v), P::Element(p)) => p.reference = Some(v),
            (A::Ref, V::QName(v), P::Group(p)) => p.reference = Some(v),
            (A::Type, V::QName(v), P::Attribute(p)) => p.type_name = Some(v),
            (A::Type, V::QName(v), P::Element(p)) => p.type_name = Some(v),
            (A::Base, V::QName(v), P::Derivation(p)) => p.base = Some(v),
            (A::ItemType, V::QName(v), P::List(p)) => p.item_type = Some(v),
            (A::MemberTypes, V::QNames(v), P::Union(p)) => p.member_types = Some(v),
            (A::SubstitutionGroup, V::QName(v), P::Element(p)) => p.substitution_group = Some(v),
            (A::Refer, V::QName(v), P::IdentityConstraint(p)) => p.refer = Some(v),

            (A::TargetNamespace, V::Uri(v), P::Schema(p)) => p.target_namespace = Some(v),
            (A::Version, V::Text(v), P::Schema(p)) => p.version = Some(v),
            (A::FinalDefault, V::Derivations(v), P::Schema(p)) => p.final_default = Some(v),
            (A::BlockDefault, V::Derivations(v), P::Schema(p)) => p.block_default = Some(v),
            (A::AttributeFormDefault, V::Form(v), P::Schema(p)) => {
                p.attribute_form_default = Some(v)
            }
            (A::ElementFormDefault, V::Form(v), P::Schema(p)) => p.element_form_default = Some(v),
            (A::XmlLang, V::Language(v), P::Schema(p)) => p.lang = Some(v),

            (A::ImportNamespace, V::Uri(v), P::Location(p)) => p.namespace = Some(v),
            (A::SchemaLocation, V::Uri(v), P::Location(p)) => p.schema_location = Some(v),
            (A::Source, V::Uri(v), P::Documentation(p)) => p.source = Some(v),
            (A::XmlLang, V::Language(v), P::Documentation(p)) => p.lang = Some(v),
            (A::Public, V::Text(v), P::Notation(p)) => p.public = Some(v),
            (A::System, V::Uri(v), P::Notation(p)) => p.system = Some(v),

            (A::SimpleFinal, V::Derivations(v), P::SimpleType(p)) => p.final_derivation = Some(v),
            (A::Final, V::Derivations(v), P::ComplexType(p)) => p.final_derivation = Some(v),
            (A::Final, V::Derivations(v), P::Element(p)) => p.final_derivation = Some(v),
            (A::TypeBlock, V::Derivations(v), P::ComplexType(p)) => p.block = Some(v),
            (A::Block, V::Derivations(v), P::Element(p)) => p.block = Some(v),

            (A::Mixed, V::Boolean(v), P::ComplexType(p)) => p.mixed = Some(v),
            (A::Mixed, V::Boolean(v), P::Content(p)) => p.mixed = Some(v),
            (A::Abstract, V::Boolean(v), P::ComplexType(p)) => p.is_abstract = Some(v),
            (A::Abstract, V::Boolean(v), P::Element(p)) => p.is_abstract = Some(v),
            (A::Nillable, V::Boolean(v), P::Element(p)) => p.nillable = Some(v),

            (A::Default, V::Text(v), P::Attribute(p)) => p.default = Some(v),
            (A::Default, V::Text(v), P::Element(p)) => p.default = Some(v),
            (A::Fixed, V::Text(v), P::Attribute(p)) => p.fixed = Some(v),
            (A::Fixed, V::Text(v), P::Element(p)) => p.fixed = Some(v),
            (A::Form, V::Form(v), P::Attribute(p)) => p.form = Some(v),
            (A::Form, V::Form(v), P::Element(p)) => p.form = Some(v),
            (A::Use, V::Use(v), P::Attribute(p)) => p.attribute_use = Some(v),

            (A::MinOccurs | A::NarrowMinOccurs, V::Count(v), P::Element(p)) => {
                p.min_occurs = Some(v)
            }
            (A::MinOccurs | A::NarrowMinOccurs, V::Count(v), P::Group(p)) => p.min_occurs = Some(v),
            (A::MinOccurs, V::Count(v), P::Wildcard(p)) => p.min_occurs = Some(v),
            (
                A::MaxOccurs | A::NarrowMaxOccurs | A::AllMaxOccurs,
                V::MaxOccurs(v),
                P::Element(p),
            ) => p.max_occurs = Some(v),
            (
                A::MaxOccurs | A::NarrowMaxOccurs | A::AllMaxOccurs,
                V::MaxOccurs(v),
                P::Group(p),
            ) => p.max_occurs = Some(v),
            (A::MaxOccurs, V::MaxOccurs(v), P::Wildcard(p)) => p.max_occurs = Some(v),

            (A::WildcardNamespace, V::Namespaces(v), P::Wildcard(p)) => p.namespace = Some(v),
            (A::ProcessContents, V::ProcessContents(v), P::Wildcard(p)) => {
                p.process_contents = Some(v)
            }
            (A::XPath, V::Text(v), P::XPath(p)) => p.xpath = Some(v),

            (A::Value, V::Text(v), P::Facet(p)) => p.value = Some(FacetValue::Literal(v)),
            (A::PatternValue, V::Text(v), P::Facet(p)) => p.value = Some(FacetValue::Pattern(v)),
            (A::LengthValue | A::TotalDigitsValue, V::Count(v), P::Facet(p)) => {
                p.value = Some(FacetValue::Count(v))
            }
            (A::WhiteSpaceValue, V::WhiteSpace(v), P::Facet(p)) => {
                p.value = Some(FacetValue::WhiteSpace(v))
            }
            (A::FacetFixed, V::Boolean(v), P::Facet(p)) => p.fixed = Some(v),

            _ => return false,
        }
        true
    }

    /// `name` of a named component
    pub fn name(&self) -> Option<&NcName> {
        match self {
            Properties::SimpleType(p) => p.name.as_ref(),
            Properties::ComplexType(p) => p.name.as_ref(),
            Properties::Attribute(p) => p.name.as_ref(),
            Properties::AttributeGroup(p) => p.name.as_ref(),
            Properties::Element(p) => p.name.as_ref(),
            Properties::Group(p) => p.name.as_ref(),
            Properties::IdentityConstraint(p) => p.name.as_ref(),
            Properties::Notation(p) => p.name.as_ref(),
            _ => None,
        }
    }

    /// `ref` of a reference
    pub fn reference(&self) -> Option<&QName> {
        match self {
            Properties::Attribute(p) => p.reference.as_ref(),
            Properties::AttributeGroup(p) => p.reference.as_ref(),
            Properties::Element(p) => p.reference.as_ref(),
            Properties::Group(p) => p.reference.as_ref(),
            _ => None,
        }
    }

    /// Occurrence bounds of a particle, defaults applied
    pub fn occurs(&self) -> Option<Occurs> {
        match self {
            Properties::Element(p) => Some(Occurs::from_attributes(p.min_occurs, p.max_occurs)),
            Properties::Group(p) => Some(Occurs::from_attributes(p.min_occurs, p.max_occurs)),
            Properties::Wildcard(p) => Some(Occurs::from_attributes(p.min_occurs, p.max_occurs)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::XSD_NAMESPACE;

    fn xs_lookup(prefix: &str) -> Option<String> {
        match prefix {
            "xs" => Some(XSD_NAMESPACE.to_string()),
            "tns" => Some("urn:example".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_parse_qname_attributes() {
        let value = AttributeValue::parse(AttributeKind::Type, "xs:string", xs_lookup).unwrap();
        assert_eq!(value, AttributeValue::QName(QName::namespaced(XSD_NAMESPACE, "string")));

        let members =
            AttributeValue::parse(AttributeKind::MemberTypes, " xs:int  tns:code ", xs_lookup)
                .unwrap();
        assert_eq!(
            members,
            AttributeValue::QNames(vec![
                QName::namespaced(XSD_NAMESPACE, "int"),
                QName::namespaced("urn:example", "code"),
            ])
        );

        assert_eq!(
            AttributeValue::parse(AttributeKind::Base, "other:thing", xs_lookup),
            Err(ValueError::UnboundPrefix("other".to_string()))
        );
    }

    #[test]
    fn test_parse_occurrence_variants() {
        let parse = |kind, raw| AttributeValue::parse(kind, raw, xs_lookup);

        assert_eq!(
            parse(AttributeKind::MaxOccurs, "unbounded"),
            Ok(AttributeValue::MaxOccurs(MaxOccurs::Unbounded))
        );
        assert!(parse(AttributeKind::NarrowMaxOccurs, "unbounded").is_err());
        assert!(parse(AttributeKind::NarrowMinOccurs, "2").is_err());
        assert_eq!(
            parse(AttributeKind::AllMaxOccurs, "1"),
            Ok(AttributeValue::MaxOccurs(MaxOccurs::Bounded(1)))
        );
        assert!(parse(AttributeKind::AllMaxOccurs, "0").is_err());
        assert!(parse(AttributeKind::TotalDigitsValue, "0").is_err());
        assert_eq!(parse(AttributeKind::LengthValue, "0"), Ok(AttributeValue::Count(0)));
    }

    #[test]
    fn test_parse_enumerated_tokens() {
        let err = AttributeValue::parse(AttributeKind::Use, "invalid-token", xs_lookup).unwrap_err();
        assert_eq!(
            err,
            ValueError::InvalidEnumeration {
                value: "invalid-token".to_string(),
                allowed: vec!["optional", "prohibited", "required"],
            }
        );

        assert!(AttributeValue::parse(AttributeKind::SimpleFinal, "extension", xs_lookup).is_err());
        assert!(AttributeValue::parse(AttributeKind::FinalDefault, "extension list", xs_lookup).is_ok());
    }

    #[test]
    fn test_for_kind_covers_every_element() {
        for kind in ElementKind::ALL {
            let properties = Properties::for_kind(*kind);
            assert_eq!(properties == Properties::None, *kind == ElementKind::Annotation);
        }
    }

    #[test]
    fn test_assign_into_matching_record() {
        let mut properties = Properties::for_kind(ElementKind::Element);
        let name = AttributeValue::NcName(NcName::parse("order").unwrap());
        assert!(properties.assign(AttributeKind::Name, name));
        assert!(properties.assign(AttributeKind::MinOccurs, AttributeValue::Count(0)));
        assert_eq!(properties.name().map(|n| n.as_str()), Some("order"));
        assert_eq!(properties.occurs(), Some(Occurs::new(0, Some(1))));

        // no `base` on an element
        let base = AttributeValue::QName(QName::local("t"));
        assert!(!properties.assign(AttributeKind::Base, base));
    }

    #[test]
    fn test_assign_facet_values() {
        let mut pattern = Properties::for_kind(ElementKind::Pattern);
        let value = AttributeValue::parse(AttributeKind::PatternValue, "[A-Z]{2}", xs_lookup).unwrap();
        assert!(pattern.assign(AttributeKind::PatternValue, value));
        match pattern {
            Properties::Facet(p) => assert_eq!(p.value, Some(FacetValue::Pattern("[A-Z]{2}".into()))),
            other => panic!("unexpected properties {:?}", other),
        }
    }
}
