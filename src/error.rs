//! Error types for xsdparse
//!
//! This module defines all error types used throughout the library.
//! Every failure aborts the current parse; the first violation found is the
//! one reported.

use std::fmt;
use thiserror::Error;

use crate::grammar::{ContextId, State};

/// Result type alias using xsdparse Error
pub type Result<T> = std::result::Result<T, Error>;

/// Line/column location inside the schema source (both 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number
    pub line: u32,
    /// Column number
    pub column: u32,
}

impl Position {
    /// Create a new position
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Main error type for xsdparse operations
#[derive(Error, Debug)]
pub enum Error {
    /// The input is not well-formed XML or its root is not an XML Schema element
    #[error("invalid schema source: {0}")]
    InvalidSource(String),

    /// A text, processing-instruction or other node where only elements may appear
    #[error("unexpected {kind} inside <{parent}>{}: {content:?}", location(.position))]
    UnexpectedNode {
        /// Kind of the offending node
        kind: &'static str,
        /// Local name of the enclosing element
        parent: String,
        /// Content of the offending node
        content: String,
        /// Where the node starts
        position: Option<Position>,
    },

    /// An element that the enclosing content model does not accept here
    #[error(
        "unexpected element '{}' inside <{parent}>{}; expected {}",
        qualified(.namespace, .name),
        location(.position),
        expected_list(.accepted)
    )]
    UnexpectedElement {
        /// Local name of the rejected element
        name: String,
        /// Namespace of the rejected element
        namespace: Option<String>,
        /// Local name of the enclosing element
        parent: String,
        /// Local names that would have been accepted instead
        accepted: Vec<String>,
        /// Where the element starts
        position: Option<Position>,
    },

    /// An attribute with no builder in the current context
    #[error(
        "unsupported attribute '{}' on <{element}>{}",
        qualified(.namespace, .name),
        location(.position)
    )]
    UnsupportedAttribute {
        /// Local name of the element carrying the attribute
        element: String,
        /// Local name of the attribute
        name: String,
        /// Namespace of the attribute
        namespace: Option<String>,
        /// Where the element starts
        position: Option<Position>,
    },

    /// A supported attribute whose value fails type-specific validation
    #[error("invalid value for attribute '{attribute}' on <{element}>{}: {reason}", location(.position))]
    InvalidAttributeValue {
        /// Local name of the element carrying the attribute
        element: String,
        /// Local name of the attribute
        attribute: String,
        /// Raw attribute value
        value: String,
        /// Why the value was rejected
        #[source]
        reason: ValueError,
        /// Where the element starts
        position: Option<Position>,
    },

    /// A required attribute of the element is absent
    #[error("missing required attribute '{attribute}' on <{element}>{}", location(.position))]
    MissingAttribute {
        /// Local name of the element
        element: String,
        /// Local name of the missing attribute
        attribute: &'static str,
        /// Where the element starts
        position: Option<Position>,
    },

    /// An element closed before its content model reached an accepting state
    #[error("incomplete content in <{element}>{}; expected {}", location(.position), expected_list(.expected))]
    InvalidContent {
        /// Local name of the element
        element: String,
        /// Local names that would have allowed the content to continue
        expected: Vec<String>,
        /// Where the element starts
        position: Option<Position>,
    },

    /// Misuse of the reserved `xml`/`xmlns` prefixes or namespaces
    #[error("invalid namespace binding: {0}")]
    Namespace(#[from] NamespaceError),

    /// Internal invariant breach in the document model
    #[error("structural error: {0}")]
    Structure(String),

    /// The registry holds no grammar for the context
    #[error("no grammar registered for context {0:?}")]
    UnsupportedContext(ContextId),

    /// The automaton has no transition for the symbol in its current state
    #[error("no transition from state {state} on symbol {symbol}")]
    UnsupportedTransition {
        /// Debug rendering of the automaton state
        state: String,
        /// Debug rendering of the rejected symbol
        symbol: String,
    },

    /// Grammar tables declare the same (state, symbol) pair twice
    #[error("duplicate transition in context {context:?} from state {state} on <{symbol}>")]
    DuplicateTransition {
        /// Context being registered
        context: ContextId,
        /// Source state
        state: State,
        /// Local name of the symbol
        symbol: &'static str,
    },

    /// Limit exceeded error
    #[error("limit exceeded: {message}{}", location(.position))]
    LimitExceeded {
        /// Which limit and by how much
        message: String,
        /// Element at which the limit was hit
        position: Option<Position>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Attach a source position to errors raised without one
    pub fn at(mut self, at: Position) -> Self {
        match &mut self {
            Error::UnexpectedNode { position, .. }
            | Error::UnexpectedElement { position, .. }
            | Error::UnsupportedAttribute { position, .. }
            | Error::InvalidAttributeValue { position, .. }
            | Error::MissingAttribute { position, .. }
            | Error::InvalidContent { position, .. }
            | Error::LimitExceeded { position, .. } => {
                position.get_or_insert(at);
            }
            _ => {}
        }
        self
    }

    /// Source position of the error, if known
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::UnexpectedNode { position, .. }
            | Error::UnexpectedElement { position, .. }
            | Error::UnsupportedAttribute { position, .. }
            | Error::InvalidAttributeValue { position, .. }
            | Error::MissingAttribute { position, .. }
            | Error::InvalidContent { position, .. }
            | Error::LimitExceeded { position, .. } => *position,
            _ => None,
        }
    }
}

/// Failure to interpret an attribute value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Token outside an enumeration
    #[error("'{value}' is not one of: {}", .allowed.join(", "))]
    InvalidEnumeration {
        /// Rejected token
        value: String,
        /// Accepted tokens
        allowed: Vec<&'static str>,
    },

    /// Not an NCName
    #[error("'{0}' is not a valid NCName")]
    InvalidNcName(String),

    /// Not a QName
    #[error("'{0}' is not a valid QName")]
    InvalidQName(String),

    /// QName prefix with no namespace in scope
    #[error("prefix '{0}' is not bound to a namespace")]
    UnboundPrefix(String),

    /// Not a URI reference
    #[error("'{value}' is not a valid URI: {reason}")]
    InvalidUri {
        /// Rejected value
        value: String,
        /// Parser diagnostic
        reason: String,
    },

    /// Not a language tag
    #[error("'{0}' is not a valid language tag")]
    InvalidLanguage(String),

    /// Not an XML Schema boolean
    #[error("'{0}' is not a valid boolean")]
    InvalidBoolean(String),

    /// Not an integer of the expected lexical type
    #[error("'{value}' is not a valid {expected}")]
    InvalidInteger {
        /// Rejected value
        value: String,
        /// Name of the expected datatype
        expected: &'static str,
    },

    /// Integer outside its allowed range
    #[error("'{value}' is out of range {min}..={max}")]
    OutOfRange {
        /// Rejected value
        value: String,
        /// Inclusive lower bound
        min: u64,
        /// Inclusive upper bound
        max: u64,
    },

    /// Malformed regular expression
    #[error("'{value}' is not a valid regular expression: {reason}")]
    InvalidPattern {
        /// Rejected pattern
        value: String,
        /// Regex compiler diagnostic
        reason: String,
    },

    /// Empty or malformed identity-constraint XPath
    #[error("'{0}' is not a valid XPath expression")]
    InvalidXPath(String),
}

/// Violation of the reserved namespace binding rules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    /// `xml` bound to something other than the XML namespace
    #[error("the 'xml' prefix can only be bound to {}, not '{0}'", crate::XML_NAMESPACE)]
    XmlPrefixRebound(String),

    /// Another prefix bound to the XML namespace
    #[error("prefix '{0}' cannot be bound to the XML namespace")]
    XmlNamespaceRebound(String),

    /// Explicit binding of `xmlns`
    #[error("the 'xmlns' prefix cannot be declared")]
    XmlnsPrefixBound,

    /// Any prefix bound to the XMLNS namespace
    #[error("prefix '{0}' cannot be bound to the XMLNS namespace")]
    XmlnsNamespaceBound(String),
}

fn location(position: &Option<Position>) -> String {
    match position {
        Some(position) => format!(" at {}", position),
        None => String::new(),
    }
}

fn qualified(namespace: &Option<String>, name: &str) -> String {
    match namespace {
        Some(ns) => format!("{{{}}}{}", ns, name),
        None => name.to_string(),
    }
}

fn expected_list(names: &[String]) -> String {
    if names.is_empty() {
        "no further child elements".to_string()
    } else {
        format!("one of: {}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_element_display() {
        let err = Error::UnexpectedElement {
            name: "sequence".to_string(),
            namespace: Some(crate::XSD_NAMESPACE.to_string()),
            parent: "complexType".to_string(),
            accepted: vec!["attribute".to_string(), "anyAttribute".to_string()],
            position: Some(Position::new(4, 9)),
        };

        let msg = err.to_string();
        assert!(msg.contains("sequence"));
        assert!(msg.contains("complexType"));
        assert!(msg.contains("at 4:9"));
        assert!(msg.contains("one of: attribute, anyAttribute"));
    }

    #[test]
    fn test_invalid_value_lists_tokens() {
        let err = Error::InvalidAttributeValue {
            element: "attribute".to_string(),
            attribute: "use".to_string(),
            value: "invalid-token".to_string(),
            reason: ValueError::InvalidEnumeration {
                value: "invalid-token".to_string(),
                allowed: vec!["optional", "prohibited", "required"],
            },
            position: None,
        };

        let msg = err.to_string();
        assert!(msg.contains("'use'"));
        assert!(msg.contains("optional, prohibited, required"));
    }

    #[test]
    fn test_invalid_content_display() {
        let err = Error::InvalidContent {
            element: "key".to_string(),
            expected: vec!["selector".to_string()],
            position: Some(Position::new(3, 7)),
        };
        assert_eq!(
            err.to_string(),
            "incomplete content in <key> at 3:7; expected one of: selector"
        );

        let err = Error::InvalidContent {
            element: "schema".to_string(),
            expected: Vec::new(),
            position: None,
        };
        assert!(err.to_string().ends_with("expected no further child elements"));
    }

    #[test]
    fn test_at_keeps_first_position() {
        let err = Error::InvalidContent {
            element: "key".to_string(),
            expected: vec!["field".to_string()],
            position: None,
        };

        let err = err.at(Position::new(2, 3)).at(Position::new(9, 9));
        assert_eq!(err.position(), Some(Position::new(2, 3)));
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = NamespaceError::XmlnsPrefixBound.into();
        assert!(matches!(err, Error::Namespace(_)));
        assert!(err.to_string().contains("xmlns"));
    }
}
