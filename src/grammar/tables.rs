//! XML Schema 1.0 grammar tables
//!
//! One function per family of contexts. State 0 is always the initial state;
//! the numbering of the other states is local to each context.

use super::registry::RegistryBuilder;
use super::spec::SpecificationBuilder;
use super::symbols::{AttributeKind as A, ContextId as C, ElementKind as E};
use super::State;

/// Top-level definitions allowed in `schema` after the prolog
const SCHEMA_DEFINITIONS: &[(E, C)] = &[
    (E::SimpleType, C::TopLevelSimpleType),
    (E::ComplexType, C::TopLevelComplexType),
    (E::Group, C::NamedGroup),
    (E::AttributeGroup, C::TopLevelAttributeGroup),
    (E::Element, C::TopLevelElement),
    (E::Attribute, C::TopLevelAttribute),
    (E::Notation, C::Notation),
];

/// Definitions that may be redefined
const REDEFINABLE: &[(E, C)] = &[
    (E::SimpleType, C::TopLevelSimpleType),
    (E::ComplexType, C::TopLevelComplexType),
    (E::Group, C::NamedGroup),
    (E::AttributeGroup, C::TopLevelAttributeGroup),
];

/// Facet children of a restriction, with the attribute kind of their `value`
const FACETS: &[(E, C, A)] = &[
    (E::MinExclusive, C::MinExclusive, A::Value),
    (E::MinInclusive, C::MinInclusive, A::Value),
    (E::MaxExclusive, C::MaxExclusive, A::Value),
    (E::MaxInclusive, C::MaxInclusive, A::Value),
    (E::TotalDigits, C::TotalDigits, A::TotalDigitsValue),
    (E::FractionDigits, C::FractionDigits, A::LengthValue),
    (E::Length, C::Length, A::LengthValue),
    (E::MinLength, C::MinLength, A::LengthValue),
    (E::MaxLength, C::MaxLength, A::LengthValue),
    (E::Enumeration, C::Enumeration, A::Value),
    (E::WhiteSpace, C::WhiteSpace, A::WhiteSpaceValue),
    (E::Pattern, C::Pattern, A::PatternValue),
];

/// Particles of a nested model group
const NESTED_PARTICLES: &[(E, C)] = &[
    (E::Element, C::LocalElement),
    (E::Group, C::GroupRef),
    (E::Choice, C::Choice),
    (E::Sequence, C::Sequence),
    (E::Any, C::Any),
];

/// Register every context grammar
pub(super) fn register(registry: &mut RegistryBuilder) {
    registry
        .context(C::Root)
        .initial(0)
        .finals(&[1])
        .transition(0, E::Schema, 1, C::Schema);

    schema(registry);
    annotations(registry);
    simple_types(registry);
    complex_types(registry);
    declarations(registry);
    model_groups(registry);
    identity_constraints(registry);
}

/// Leading `annotation?` moving from 0 to 1; no state is accepting yet
fn leading_annotation(spec: &mut SpecificationBuilder) -> &mut SpecificationBuilder {
    spec.initial(0)
        .transition(0, E::Annotation, 1, C::Annotation)
}

/// `annotation?` with no other required children
fn annotated(spec: &mut SpecificationBuilder) -> &mut SpecificationBuilder {
    leading_annotation(spec).finals(&[0, 1])
}

/// `(group | all | choice | sequence)` from each of `from` into `to`
fn content_particle(spec: &mut SpecificationBuilder, from: &[State], to: State) {
    spec.transitions(from, E::Group, to, C::GroupRef)
        .transitions(from, E::All, to, C::All)
        .transitions(from, E::Choice, to, C::Choice)
        .transitions(from, E::Sequence, to, C::Sequence);
}

/// `(attribute | attributeGroup)*, anyAttribute?` entered from `from`.
///
/// Attribute uses loop on `uses`; the wildcard moves to `wildcard`.
fn attribute_uses(spec: &mut SpecificationBuilder, from: &[State], uses: State, wildcard: State) {
    let mut states = from.to_vec();
    if !states.contains(&uses) {
        states.push(uses);
    }
    spec.transitions(&states, E::Attribute, uses, C::LocalAttribute)
        .transitions(&states, E::AttributeGroup, uses, C::AttributeGroupRef)
        .transitions(&states, E::AnyAttribute, wildcard, C::AnyAttribute);
}

fn schema(registry: &mut RegistryBuilder) {
    let spec = registry.context(C::Schema);
    spec.initial(0)
        .finals(&[0, 1])
        .transition(0, E::Include, 0, C::Include)
        .transition(0, E::Import, 0, C::Import)
        .transition(0, E::Redefine, 0, C::Redefine)
        .transition(0, E::Annotation, 0, C::Annotation)
        .transition(1, E::Annotation, 1, C::Annotation);
    for &(symbol, child) in SCHEMA_DEFINITIONS {
        spec.transitions(&[0, 1], symbol, 1, child);
    }
    spec.attributes(&[
        A::Id,
        A::TargetNamespace,
        A::Version,
        A::FinalDefault,
        A::BlockDefault,
        A::AttributeFormDefault,
        A::ElementFormDefault,
        A::XmlLang,
    ]);

    annotated(registry.context(C::Include))
        .attribute(A::Id)
        .required(A::SchemaLocation);

    annotated(registry.context(C::Import)).attributes(&[
        A::Id,
        A::ImportNamespace,
        A::SchemaLocation,
    ]);

    let spec = registry.context(C::Redefine);
    spec.initial(0)
        .finals(&[0])
        .transition(0, E::Annotation, 0, C::Annotation)
        .attribute(A::Id)
        .required(A::SchemaLocation);
    for &(symbol, child) in REDEFINABLE {
        spec.transition(0, symbol, 0, child);
    }

    annotated(registry.context(C::Notation))
        .attribute(A::Id)
        .required(A::Name)
        .attributes(&[A::Public, A::System]);
}

fn annotations(registry: &mut RegistryBuilder) {
    registry
        .context(C::Annotation)
        .initial(0)
        .finals(&[0])
        .transition(0, E::Appinfo, 0, C::Appinfo)
        .transition(0, E::Documentation, 0, C::Documentation)
        .attribute(A::Id);

    // leaves: their content is kept verbatim
    registry.context(C::Appinfo).attribute(A::Source);
    registry
        .context(C::Documentation)
        .attributes(&[A::Source, A::XmlLang]);
}

fn simple_types(registry: &mut RegistryBuilder) {
    for context in [C::TopLevelSimpleType, C::LocalSimpleType] {
        let spec = leading_annotation(registry.context(context));
        spec.finals(&[2])
            .transitions(&[0, 1], E::Restriction, 2, C::SimpleTypeRestriction)
            .transitions(&[0, 1], E::List, 2, C::List)
            .transitions(&[0, 1], E::Union, 2, C::Union)
            .attribute(A::Id);
        if context == C::TopLevelSimpleType {
            spec.required(A::Name).attribute(A::SimpleFinal);
        }
    }

    let spec = registry.context(C::SimpleTypeRestriction);
    annotated(spec)
        .finals(&[2, 3])
        .transitions(&[0, 1], E::SimpleType, 2, C::LocalSimpleType)
        .attributes(&[A::Id, A::Base]);
    facets(spec, &[0, 1, 2, 3], 3);

    annotated(registry.context(C::List))
        .finals(&[2])
        .transitions(&[0, 1], E::SimpleType, 2, C::LocalSimpleType)
        .attributes(&[A::Id, A::ItemType]);

    annotated(registry.context(C::Union))
        .finals(&[2])
        .transitions(&[0, 1, 2], E::SimpleType, 2, C::LocalSimpleType)
        .attributes(&[A::Id, A::MemberTypes]);

    for &(_, context, value) in FACETS {
        let spec = annotated(registry.context(context));
        spec.attribute(A::Id).required(value);
        if !matches!(context, C::Enumeration | C::Pattern) {
            spec.attribute(A::FacetFixed);
        }
    }
}

/// Facets in any order and number, looping on `to`
fn facets(spec: &mut SpecificationBuilder, from: &[State], to: State) {
    for &(symbol, child, _) in FACETS {
        spec.transitions(from, symbol, to, child);
    }
}

fn complex_types(registry: &mut RegistryBuilder) {
    for context in [C::TopLevelComplexType, C::LocalComplexType] {
        let spec = annotated(registry.context(context));
        spec.finals(&[2, 3, 4, 5])
            .transitions(&[0, 1], E::SimpleContent, 5, C::SimpleContent)
            .transitions(&[0, 1], E::ComplexContent, 5, C::ComplexContent);
        content_particle(spec, &[0, 1], 2);
        attribute_uses(spec, &[0, 1, 2], 3, 4);

        spec.attribute(A::Id).attribute(A::Mixed);
        if context == C::TopLevelComplexType {
            spec.required(A::Name)
                .attributes(&[A::Abstract, A::Final, A::TypeBlock]);
        }
    }

    leading_annotation(registry.context(C::SimpleContent))
        .finals(&[2])
        .transitions(&[0, 1], E::Restriction, 2, C::SimpleContentRestriction)
        .transitions(&[0, 1], E::Extension, 2, C::SimpleContentExtension)
        .attribute(A::Id);

    leading_annotation(registry.context(C::ComplexContent))
        .finals(&[2])
        .transitions(&[0, 1], E::Restriction, 2, C::ComplexContentRestriction)
        .transitions(&[0, 1], E::Extension, 2, C::ComplexContentExtension)
        .attributes(&[A::Id, A::Mixed]);

    // simpleContent/restriction: simpleType?, facets*, attribute uses
    let spec = annotated(registry.context(C::SimpleContentRestriction));
    spec.finals(&[2, 3, 4, 5])
        .transitions(&[0, 1], E::SimpleType, 2, C::LocalSimpleType)
        .attribute(A::Id)
        .required(A::Base);
    facets(spec, &[0, 1, 2, 3], 3);
    attribute_uses(spec, &[0, 1, 2, 3], 4, 5);

    let spec = annotated(registry.context(C::SimpleContentExtension));
    spec.finals(&[2, 3]).attribute(A::Id).required(A::Base);
    attribute_uses(spec, &[0, 1], 2, 3);

    for context in [C::ComplexContentRestriction, C::ComplexContentExtension] {
        let spec = annotated(registry.context(context));
        spec.finals(&[2, 3, 4]).attribute(A::Id).required(A::Base);
        content_particle(spec, &[0, 1], 2);
        attribute_uses(spec, &[0, 1, 2], 3, 4);
    }
}

fn declarations(registry: &mut RegistryBuilder) {
    for context in [C::TopLevelElement, C::LocalElement, C::AllElement] {
        let spec = annotated(registry.context(context));
        spec.finals(&[2, 3])
            .transitions(&[0, 1], E::SimpleType, 2, C::LocalSimpleType)
            .transitions(&[0, 1], E::ComplexType, 2, C::LocalComplexType)
            .transitions(&[0, 1, 2, 3], E::Unique, 3, C::Unique)
            .transitions(&[0, 1, 2, 3], E::Key, 3, C::Key)
            .transitions(&[0, 1, 2, 3], E::Keyref, 3, C::Keyref)
            .attribute(A::Id);

        match context {
            C::TopLevelElement => spec.required(A::Name).attributes(&[
                A::Type,
                A::SubstitutionGroup,
                A::Default,
                A::Fixed,
                A::Nillable,
                A::Abstract,
                A::Final,
                A::Block,
            ]),
            C::LocalElement => spec.attributes(&[
                A::Name,
                A::Ref,
                A::Type,
                A::MinOccurs,
                A::MaxOccurs,
                A::Default,
                A::Fixed,
                A::Nillable,
                A::Block,
                A::Form,
            ]),
            _ => spec.attributes(&[
                A::Name,
                A::Ref,
                A::Type,
                A::NarrowMinOccurs,
                A::NarrowMaxOccurs,
                A::Default,
                A::Fixed,
                A::Nillable,
                A::Block,
                A::Form,
            ]),
        };
    }

    for context in [C::TopLevelAttribute, C::LocalAttribute] {
        let spec = annotated(registry.context(context));
        spec.finals(&[2])
            .transitions(&[0, 1], E::SimpleType, 2, C::LocalSimpleType)
            .attribute(A::Id);

        if context == C::TopLevelAttribute {
            spec.required(A::Name)
                .attributes(&[A::Type, A::Default, A::Fixed]);
        } else {
            spec.attributes(&[
                A::Name,
                A::Ref,
                A::Type,
                A::Use,
                A::Default,
                A::Fixed,
                A::Form,
            ]);
        }
    }

    let spec = annotated(registry.context(C::TopLevelAttributeGroup));
    spec.finals(&[2, 3]).attribute(A::Id).required(A::Name);
    attribute_uses(spec, &[0, 1], 2, 3);

    annotated(registry.context(C::AttributeGroupRef))
        .attribute(A::Id)
        .required(A::Ref);

    annotated(registry.context(C::AnyAttribute)).attributes(&[
        A::Id,
        A::WildcardNamespace,
        A::ProcessContents,
    ]);
}

fn model_groups(registry: &mut RegistryBuilder) {
    leading_annotation(registry.context(C::NamedGroup))
        .finals(&[2])
        .transitions(&[0, 1], E::All, 2, C::GroupAll)
        .transitions(&[0, 1], E::Choice, 2, C::GroupChoice)
        .transitions(&[0, 1], E::Sequence, 2, C::GroupSequence)
        .attribute(A::Id)
        .required(A::Name);

    annotated(registry.context(C::GroupRef))
        .attribute(A::Id)
        .required(A::Ref)
        .attributes(&[A::MinOccurs, A::MaxOccurs]);

    for context in [C::All, C::GroupAll] {
        let spec = annotated(registry.context(context));
        spec.finals(&[2])
            .transitions(&[0, 1, 2], E::Element, 2, C::AllElement)
            .attribute(A::Id);
        if context == C::All {
            spec.attributes(&[A::NarrowMinOccurs, A::AllMaxOccurs]);
        }
    }

    for context in [C::Choice, C::Sequence, C::GroupChoice, C::GroupSequence] {
        let spec = annotated(registry.context(context));
        spec.finals(&[2]).attribute(A::Id);
        for &(symbol, child) in NESTED_PARTICLES {
            spec.transitions(&[0, 1, 2], symbol, 2, child);
        }
        if matches!(context, C::Choice | C::Sequence) {
            spec.attributes(&[A::MinOccurs, A::MaxOccurs]);
        }
    }

    annotated(registry.context(C::Any)).attributes(&[
        A::Id,
        A::WildcardNamespace,
        A::ProcessContents,
        A::MinOccurs,
        A::MaxOccurs,
    ]);
}

fn identity_constraints(registry: &mut RegistryBuilder) {
    for context in [C::Unique, C::Key, C::Keyref] {
        let spec = leading_annotation(registry.context(context));
        spec.finals(&[3])
            .transitions(&[0, 1], E::Selector, 2, C::Selector)
            .transitions(&[2, 3], E::Field, 3, C::Field)
            .attribute(A::Id)
            .required(A::Name);
        if context == C::Keyref {
            spec.required(A::Refer);
        }
    }

    for context in [C::Selector, C::Field] {
        annotated(registry.context(context))
            .attribute(A::Id)
            .required(A::XPath);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Dfa, Registry};

    /// Feed `symbols` to the automaton of `context`; `None` if one is rejected
    fn run(context: C, symbols: &[E]) -> Option<bool> {
        let spec = Registry::global().unwrap().create(context).unwrap();
        let mut dfa = Dfa::new(spec.initial_state()?);
        for ((state, symbol), next) in spec.next_states() {
            dfa.add_transition(state, symbol, next);
        }
        for state in spec.final_states() {
            dfa.add_final_state(state);
        }
        for &symbol in symbols {
            dfa.add_symbol(symbol).ok()?;
        }
        Some(dfa.is_valid())
    }

    #[test]
    fn test_schema_prolog_then_definitions() {
        let prolog = [E::Import, E::Annotation, E::Include, E::Element, E::Annotation];
        assert_eq!(run(C::Schema, &prolog), Some(true));
        assert_eq!(run(C::Schema, &[]), Some(true));
        assert_eq!(run(C::Schema, &[E::Element, E::Import]), None);
        assert_eq!(run(C::Schema, &[E::Appinfo]), None);
    }

    #[test]
    fn test_derivation_is_required() {
        for context in [C::TopLevelSimpleType, C::SimpleContent, C::ComplexContent, C::NamedGroup] {
            assert_eq!(run(context, &[]), Some(false), "{:?}", context);
            assert_eq!(run(context, &[E::Annotation]), Some(false), "{:?}", context);
        }
        assert_eq!(run(C::SimpleContent, &[E::Extension]), Some(true));
        assert_eq!(run(C::NamedGroup, &[E::Annotation, E::Sequence]), Some(true));
        assert_eq!(run(C::NamedGroup, &[E::Group]), None);
    }

    #[test]
    fn test_complex_type_content() {
        let ct = C::TopLevelComplexType;
        assert_eq!(run(ct, &[]), Some(true));
        assert_eq!(
            run(ct, &[E::Annotation, E::Sequence, E::Attribute, E::AttributeGroup, E::AnyAttribute]),
            Some(true)
        );
        assert_eq!(run(ct, &[E::Attribute, E::Sequence]), None);
        assert_eq!(run(ct, &[E::AnyAttribute, E::Attribute]), None);
        assert_eq!(run(ct, &[E::SimpleContent, E::Attribute]), None);
    }

    #[test]
    fn test_restriction_facets_in_any_order() {
        let facets = [E::SimpleType, E::Pattern, E::MaxLength, E::Enumeration, E::Pattern];
        assert_eq!(run(C::SimpleTypeRestriction, &facets), Some(true));
        assert_eq!(run(C::SimpleTypeRestriction, &[E::Pattern, E::SimpleType]), None);
        assert_eq!(
            run(C::SimpleContentRestriction, &[E::Enumeration, E::Attribute, E::AnyAttribute]),
            Some(true)
        );
        assert_eq!(run(C::SimpleContentRestriction, &[E::Attribute, E::Enumeration]), None);
    }

    #[test]
    fn test_all_accepts_only_elements() {
        assert_eq!(run(C::All, &[E::Element, E::Element]), Some(true));
        assert_eq!(run(C::All, &[E::Sequence]), None);
        assert_eq!(run(C::Sequence, &[E::Element, E::Choice, E::Any, E::Group]), Some(true));
    }

    #[test]
    fn test_leaf_contexts_have_no_automaton() {
        assert_eq!(run(C::Documentation, &[]), None);
        assert_eq!(run(C::Appinfo, &[]), None);
    }
}
