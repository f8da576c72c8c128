//! Attribute value types
//!
//! Validated scalar wrappers for the datatypes used by schema-element
//! attributes: anyURI, language, non-negative integers, occurrence bounds,
//! enumerated tokens, derivation sets, wildcard namespace lists, pattern
//! facets and identity-constraint paths.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

use crate::error::ValueError;
use crate::names::validate_ncname;

static LANGUAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]{1,8}(-[a-zA-Z0-9]{1,8})*$").unwrap());

static URI_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

static RELATIVE_BASE: Lazy<Url> = Lazy::new(|| Url::parse("http://relative.invalid/").unwrap());

/// Collapse runs of XML whitespace into single spaces and trim the ends
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

/// An NCName value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NcName(String);

impl NcName {
    /// Parse and validate an NCName
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let value = raw.trim();
        validate_ncname(value)?;
        Ok(Self(value.to_string()))
    }

    /// Get the name as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NcName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An anyURI value (absolute URI or relative reference)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AnyUri(String);

impl AnyUri {
    /// Parse and validate a URI reference, keeping its lexical form
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let value = collapse_whitespace(raw);
        let checked = if URI_SCHEME.is_match(&value) {
            Url::parse(&value)
        } else {
            RELATIVE_BASE.join(&value)
        };

        match checked {
            Ok(_) => Ok(Self(value)),
            Err(e) => Err(ValueError::InvalidUri {
                value,
                reason: e.to_string(),
            }),
        }
    }

    /// Get the URI as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnyUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A language tag (`xml:lang`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// Parse and validate a language tag.
    ///
    /// The empty string is accepted: `xml:lang=""` undeclares the language.
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let value = raw.trim();
        if value.is_empty() || LANGUAGE.is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(ValueError::InvalidLanguage(value.to_string()))
        }
    }

    /// Get the tag as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parse an XML Schema boolean (`true`, `false`, `1`, `0`)
pub fn parse_boolean(raw: &str) -> Result<bool, ValueError> {
    match raw.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ValueError::InvalidBoolean(other.to_string())),
    }
}

/// Parse an xs:nonNegativeInteger
///
/// The lexical space is unbounded; values beyond `u64::MAX` saturate to it,
/// which callers treat as "no practical bound".
pub fn parse_non_negative_integer(raw: &str) -> Result<u64, ValueError> {
    let value = raw.trim();
    let invalid = || ValueError::InvalidInteger {
        value: value.to_string(),
        expected: "nonNegativeInteger",
    };

    let (negative, digits) = match value.as_bytes().first() {
        Some(b'+') => (false, &value[1..]),
        Some(b'-') => (true, &value[1..]),
        _ => (false, value),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if negative {
        // only "-0" (and "-000") denotes a non-negative value
        return if digits.bytes().all(|b| b == b'0') {
            Ok(0)
        } else {
            Err(invalid())
        };
    }

    // digits only, so the sole parse failure is overflow
    Ok(digits.parse::<u64>().unwrap_or(u64::MAX))
}

/// Parse an xs:positiveInteger
pub fn parse_positive_integer(raw: &str) -> Result<u64, ValueError> {
    match parse_non_negative_integer(raw) {
        Ok(0) => Err(ValueError::OutOfRange {
            value: raw.trim().to_string(),
            min: 1,
            max: u64::MAX,
        }),
        Err(ValueError::InvalidInteger { value, .. }) => Err(ValueError::InvalidInteger {
            value,
            expected: "positiveInteger",
        }),
        other => other,
    }
}

/// Parse a non-negative integer restricted to `min..=max`
pub fn parse_bounded_integer(raw: &str, min: u64, max: u64) -> Result<u64, ValueError> {
    let value = parse_non_negative_integer(raw)?;
    if value < min || value > max {
        return Err(ValueError::OutOfRange {
            value: raw.trim().to_string(),
            min,
            max,
        });
    }
    Ok(value)
}

/// Value of a `maxOccurs` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxOccurs {
    /// A finite upper bound
    Bounded(u64),
    /// `unbounded`
    Unbounded,
}

impl MaxOccurs {
    /// Parse `unbounded` or a non-negative integer
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        match raw.trim() {
            "unbounded" => Ok(MaxOccurs::Unbounded),
            other => parse_non_negative_integer(other).map(MaxOccurs::Bounded),
        }
    }

    /// Upper bound, `None` when unbounded
    pub fn bound(&self) -> Option<u64> {
        match self {
            MaxOccurs::Bounded(n) => Some(*n),
            MaxOccurs::Unbounded => None,
        }
    }
}

impl fmt::Display for MaxOccurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxOccurs::Bounded(n) => write!(f, "{}", n),
            MaxOccurs::Unbounded => f.write_str("unbounded"),
        }
    }
}

impl Serialize for MaxOccurs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Occurrence bounds for a particle (minOccurs, maxOccurs).
/// `None` for `max` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occurs {
    /// Minimum number of occurrences (default 1)
    pub min: u64,
    /// Maximum number of occurrences (None = unbounded, default 1)
    pub max: Option<u64>,
}

impl Occurs {
    /// Create new occurrence bounds
    pub fn new(min: u64, max: Option<u64>) -> Self {
        Self { min, max }
    }

    /// Default occurrence (1, 1)
    pub fn once() -> Self {
        Self {
            min: 1,
            max: Some(1),
        }
    }

    /// Resolve optional attribute values against the (1, 1) defaults
    pub fn from_attributes(min: Option<u64>, max: Option<MaxOccurs>) -> Self {
        Self {
            min: min.unwrap_or(1),
            max: max.map_or(Some(1), |m| m.bound()),
        }
    }

    /// Check if this particle can be empty (minOccurs == 0)
    pub fn is_emptiable(&self) -> bool {
        self.min == 0
    }

    /// Check if this particle is empty (maxOccurs == 0)
    pub fn is_empty(&self) -> bool {
        self.max == Some(0)
    }

    /// Check if particle has maxOccurs == 1
    pub fn is_single(&self) -> bool {
        self.max == Some(1)
    }

    /// Check if particle can have multiple occurrences
    pub fn is_multiple(&self) -> bool {
        !self.is_empty() && !self.is_single()
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Self::once()
    }
}

fn invalid_token(value: &str, allowed: &[&'static str]) -> ValueError {
    ValueError::InvalidEnumeration {
        value: value.to_string(),
        allowed: allowed.to_vec(),
    }
}

macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Lexical tokens accepted by [`Self::parse`]
            pub const TOKENS: &'static [&'static str] = &[$($token),+];

            /// Parse from an attribute value
            pub fn parse(raw: &str) -> Result<Self, ValueError> {
                match raw.trim() {
                    $( $token => Ok($name::$variant), )+
                    other => Err(invalid_token(other, Self::TOKENS)),
                }
            }

            /// Get the lexical token
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

token_enum! {
    /// Attribute use mode
    AttributeUse {
        /// Attribute is optional (default)
        Optional => "optional",
        /// Attribute is prohibited
        Prohibited => "prohibited",
        /// Attribute is required
        Required => "required",
    }
}

token_enum! {
    /// Qualification form for local declarations
    Form {
        /// Name is qualified with the target namespace
        Qualified => "qualified",
        /// Name has no namespace
        Unqualified => "unqualified",
    }
}

token_enum! {
    /// Process contents mode for wildcards
    ProcessContents {
        /// Skip validation entirely
        Skip => "skip",
        /// Validate if declaration found, otherwise accept
        Lax => "lax",
        /// Validate strictly - element/attribute must be declared
        Strict => "strict",
    }
}

token_enum! {
    /// Value of the `whiteSpace` facet
    WhiteSpace {
        /// Keep whitespace as-is
        Preserve => "preserve",
        /// Replace tabs and newlines with spaces
        Replace => "replace",
        /// Replace, then collapse runs and trim
        Collapse => "collapse",
    }
}

token_enum! {
    /// A single derivation method named in `block`/`final` attributes
    Derivation {
        /// Derivation by extension
        Extension => "extension",
        /// Derivation by restriction
        Restriction => "restriction",
        /// Derivation by list
        List => "list",
        /// Derivation by union
        Union => "union",
        /// Substitution group membership
        Substitution => "substitution",
    }
}

/// Methods allowed in `element/@block` and `schema/@blockDefault`
pub const BLOCK_SET: &[Derivation] = &[
    Derivation::Extension,
    Derivation::Restriction,
    Derivation::Substitution,
];

/// Methods allowed in `element/@final`, `complexType/@final` and `complexType/@block`
pub const DERIVATION_SET: &[Derivation] = &[Derivation::Extension, Derivation::Restriction];

/// Methods allowed in `simpleType/@final`
pub const SIMPLE_DERIVATION_SET: &[Derivation] =
    &[Derivation::List, Derivation::Union, Derivation::Restriction];

/// Methods allowed in `schema/@finalDefault`
pub const FULL_DERIVATION_SET: &[Derivation] = &[
    Derivation::Extension,
    Derivation::Restriction,
    Derivation::List,
    Derivation::Union,
];

/// `#all` or a whitespace-separated list of derivation methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivationSet {
    /// `#all`
    All,
    /// Explicit list (possibly empty)
    Methods(Vec<Derivation>),
}

impl DerivationSet {
    /// Parse a derivation set whose members must come from `allowed`
    pub fn parse(raw: &str, allowed: &[Derivation]) -> Result<Self, ValueError> {
        let value = raw.trim();
        if value == "#all" {
            return Ok(DerivationSet::All);
        }

        let mut tokens: Vec<&'static str> = vec!["#all"];
        tokens.extend(allowed.iter().map(|d| d.as_str()));

        let mut methods = Vec::new();
        for token in value.split_ascii_whitespace() {
            match Derivation::parse(token) {
                Ok(method) if allowed.contains(&method) => methods.push(method),
                _ => return Err(invalid_token(token, &tokens)),
            }
        }
        Ok(DerivationSet::Methods(methods))
    }

    /// Check if the set blocks or finalises the given method
    pub fn contains(&self, method: Derivation) -> bool {
        match self {
            DerivationSet::All => true,
            DerivationSet::Methods(methods) => methods.contains(&method),
        }
    }
}

impl fmt::Display for DerivationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivationSet::All => f.write_str("#all"),
            DerivationSet::Methods(methods) => {
                let tokens: Vec<_> = methods.iter().map(|m| m.as_str()).collect();
                f.write_str(&tokens.join(" "))
            }
        }
    }
}

impl Serialize for DerivationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One member of an explicit wildcard namespace list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceToken {
    /// `##targetNamespace`
    TargetNamespace,
    /// `##local` (no namespace)
    Local,
    /// An explicit namespace URI
    Uri(AnyUri),
}

/// Value of `any/@namespace` and `anyAttribute/@namespace`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceList {
    /// `##any`
    Any,
    /// `##other`
    Other,
    /// Explicit list of namespaces
    List(Vec<NamespaceToken>),
}

impl NamespaceList {
    /// Parse a wildcard namespace constraint
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        match raw.trim() {
            "##any" => Ok(NamespaceList::Any),
            "##other" => Ok(NamespaceList::Other),
            value => value
                .split_ascii_whitespace()
                .map(|token| match token {
                    "##targetNamespace" => Ok(NamespaceToken::TargetNamespace),
                    "##local" => Ok(NamespaceToken::Local),
                    t if t.starts_with("##") => Err(invalid_token(
                        t,
                        &["##any", "##other", "##targetNamespace", "##local"],
                    )),
                    t => AnyUri::parse(t).map(NamespaceToken::Uri),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(NamespaceList::List),
        }
    }
}

impl fmt::Display for NamespaceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespaceList::Any => f.write_str("##any"),
            NamespaceList::Other => f.write_str("##other"),
            NamespaceList::List(tokens) => {
                let parts: Vec<&str> = tokens
                    .iter()
                    .map(|t| match t {
                        NamespaceToken::TargetNamespace => "##targetNamespace",
                        NamespaceToken::Local => "##local",
                        NamespaceToken::Uri(uri) => uri.as_str(),
                    })
                    .collect();
                f.write_str(&parts.join(" "))
            }
        }
    }
}

impl Serialize for NamespaceList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Check that a `pattern` facet is a well-formed XML Schema regular expression.
///
/// XSD regexes are implicitly anchored, treat `^`/`$` as literals, and add the
/// `\i`/`\c` escapes, Unicode block escapes and character-class subtraction;
/// these are rewritten to their `regex` crate equivalents before compiling.
pub fn validate_pattern(raw: &str) -> Result<(), ValueError> {
    let translated = translate_pattern(raw);
    Regex::new(&format!("^(?:{})$", translated))
        .map(|_| ())
        .map_err(|e| ValueError::InvalidPattern {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

fn translate_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();
    let mut class_depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('i') if class_depth > 0 => out.push_str(r"_:\p{L}"),
                Some('i') => out.push_str(r"[_:\p{L}]"),
                Some('c') if class_depth > 0 => out.push_str(r"\-._:\p{L}\p{N}"),
                Some('c') => out.push_str(r"[\-._:\p{L}\p{N}]"),
                Some('I') => out.push_str(r"[^_:\p{L}]"),
                Some('C') => out.push_str(r"[^\-._:\p{L}\p{N}]"),
                Some(p @ ('p' | 'P')) if chars.peek() == Some(&'{') => {
                    let mut name = String::new();
                    for n in chars.by_ref() {
                        name.push(n);
                        if n == '}' {
                            break;
                        }
                    }
                    if name.starts_with("{Is") {
                        // Unicode block escapes have no regex crate equivalent
                        out.push_str(r"\p{Any}");
                    } else {
                        out.push('\\');
                        out.push(p);
                        out.push_str(&name);
                    }
                }
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            '[' => {
                class_depth += 1;
                out.push('[');
            }
            ']' if class_depth > 0 => {
                class_depth -= 1;
                out.push(']');
            }
            '-' if class_depth > 0 && chars.peek() == Some(&'[') => out.push_str("--"),
            '^' if class_depth == 0 => out.push_str(r"\^"),
            '$' if class_depth == 0 => out.push_str(r"\$"),
            other => out.push(other),
        }
    }
    out
}

/// Check the restricted XPath of a `selector` or `field`
pub fn validate_xpath(raw: &str) -> Result<String, ValueError> {
    let value = raw.trim();
    let malformed = value.is_empty()
        || value.starts_with('|')
        || value.ends_with('|')
        || value.split('|').any(|branch| branch.trim().is_empty());
    if malformed {
        Err(ValueError::InvalidXPath(raw.to_string()))
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_any_uri() {
        assert!(AnyUri::parse("http://www.w3.org/2001/XMLSchema").is_ok());
        assert!(AnyUri::parse("urn:example:schema").is_ok());
        assert!(AnyUri::parse("types.xsd").is_ok());
        assert!(AnyUri::parse("../common/types.xsd").is_ok());
        assert!(AnyUri::parse("").is_ok());
        assert!(matches!(
            AnyUri::parse("http://[::1"),
            Err(ValueError::InvalidUri { .. })
        ));
        assert_eq!(AnyUri::parse("  a.xsd ").unwrap().as_str(), "a.xsd");
    }

    #[test]
    fn test_language() {
        assert!(Language::parse("en").is_ok());
        assert!(Language::parse("en-GB").is_ok());
        assert!(Language::parse("x-klingon").is_ok());
        assert!(Language::parse("toolonglanguage").is_err());
        assert!(Language::parse("en_GB").is_err());
        assert_eq!(Language::parse("").unwrap().as_str(), "");
    }

    #[test]
    fn test_boolean() {
        assert_eq!(parse_boolean("true"), Ok(true));
        assert_eq!(parse_boolean(" 0 "), Ok(false));
        assert!(parse_boolean("yes").is_err());
    }

    #[test]
    fn test_non_negative_integer() {
        assert_eq!(parse_non_negative_integer("0"), Ok(0));
        assert_eq!(parse_non_negative_integer("+42"), Ok(42));
        assert_eq!(parse_non_negative_integer("-0"), Ok(0));
        assert_eq!(parse_non_negative_integer("007"), Ok(7));
        assert!(matches!(
            parse_non_negative_integer("-1"),
            Err(ValueError::InvalidInteger { .. })
        ));
        assert!(parse_non_negative_integer("1.5").is_err());
        assert!(parse_non_negative_integer("").is_err());
        assert_eq!(
            parse_non_negative_integer("100000000000000000000000"),
            Ok(u64::MAX)
        );
        assert_eq!(parse_non_negative_integer("18446744073709551615"), Ok(u64::MAX));
    }

    #[test]
    fn test_positive_and_bounded_integer() {
        assert_eq!(parse_positive_integer("3"), Ok(3));
        assert!(matches!(
            parse_positive_integer("0"),
            Err(ValueError::OutOfRange { min: 1, .. })
        ));
        assert_eq!(parse_bounded_integer("1", 0, 1), Ok(1));
        assert!(matches!(
            parse_bounded_integer("2", 0, 1),
            Err(ValueError::OutOfRange { min: 0, max: 1, .. })
        ));
        assert!(matches!(
            parse_bounded_integer("100000000000000000000000", 0, 1),
            Err(ValueError::OutOfRange { max: 1, .. })
        ));
    }

    #[test]
    fn test_max_occurs_and_occurs() {
        assert_eq!(MaxOccurs::parse("unbounded"), Ok(MaxOccurs::Unbounded));
        assert_eq!(MaxOccurs::parse("5"), Ok(MaxOccurs::Bounded(5)));
        assert!(MaxOccurs::parse("many").is_err());

        let occurs = Occurs::from_attributes(Some(0), Some(MaxOccurs::Unbounded));
        assert!(occurs.is_emptiable());
        assert!(occurs.is_multiple());
        assert_eq!(Occurs::from_attributes(None, None), Occurs::once());
    }

    #[test]
    fn test_attribute_use_tokens() {
        assert_eq!(AttributeUse::parse("required"), Ok(AttributeUse::Required));
        assert_eq!(
            AttributeUse::parse("invalid-token"),
            Err(ValueError::InvalidEnumeration {
                value: "invalid-token".to_string(),
                allowed: vec!["optional", "prohibited", "required"],
            })
        );
    }

    #[test]
    fn test_derivation_sets() {
        assert_eq!(DerivationSet::parse("#all", BLOCK_SET), Ok(DerivationSet::All));

        let set = DerivationSet::parse("extension restriction", DERIVATION_SET).unwrap();
        assert!(set.contains(Derivation::Extension));
        assert!(!set.contains(Derivation::List));
        assert_eq!(set.to_string(), "extension restriction");

        assert_eq!(
            DerivationSet::parse("", SIMPLE_DERIVATION_SET),
            Ok(DerivationSet::Methods(vec![]))
        );
        assert_eq!(
            DerivationSet::parse("substitution", DERIVATION_SET),
            Err(ValueError::InvalidEnumeration {
                value: "substitution".to_string(),
                allowed: vec!["#all", "extension", "restriction"],
            })
        );
    }

    #[test]
    fn test_namespace_list() {
        assert_eq!(NamespaceList::parse("##any"), Ok(NamespaceList::Any));
        assert_eq!(NamespaceList::parse(" ##other "), Ok(NamespaceList::Other));

        let list = NamespaceList::parse("##targetNamespace ##local http://example.com").unwrap();
        assert_eq!(list.to_string(), "##targetNamespace ##local http://example.com");
        assert!(NamespaceList::parse("##bogus").is_err());
    }

    #[test]
    fn test_patterns() {
        assert!(validate_pattern(r"\d{13}").is_ok());
        assert!(validate_pattern(r"[A-Z]{2}-\d+").is_ok());
        assert!(validate_pattern(r"\i\c*").is_ok());
        assert!(validate_pattern(r"[a-z-[aeiou]]+").is_ok());
        assert!(validate_pattern(r"\p{IsBasicLatin}+").is_ok());
        assert!(validate_pattern(r"$\d+(\.\d{2})?").is_ok());
        assert!(matches!(
            validate_pattern(r"[a-z"),
            Err(ValueError::InvalidPattern { .. })
        ));
        assert!(validate_pattern(r"(abc").is_err());
    }

    #[test]
    fn test_xpath() {
        assert_eq!(validate_xpath(" .//item "), Ok(".//item".to_string()));
        assert!(validate_xpath("@id | @ref").is_ok());
        assert!(validate_xpath("").is_err());
        assert!(validate_xpath("a||b").is_err());
    }
}
