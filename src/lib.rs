//! # xsdparse
//!
//! A grammar-driven parser for XML Schema 1.0 documents.
//!
//! Every schema element is parsed inside a grammar *context*: a
//! deterministic automaton that accepts the children valid at that point,
//! plus a table of the attributes the element understands. The parser walks
//! the XML tree once, checks each child against its parent's automaton and
//! builds a strongly-typed [`SchemaDocument`].
//!
//! ## Features
//!
//! - Content models of all XSD 1.0 schema elements, top-level and local
//! - Typed attribute values (QNames resolved against in-scope namespaces,
//!   occurrence bounds, derivation sets, wildcard namespace lists, patterns)
//! - Source positions on every parse error
//! - Foreign-namespace attributes kept alongside the typed model
//! - Resource limits against hostile documents
//! - JSON rendering of the parsed document
//!
//! ## Example
//!
//! ```rust
//! use xsdparse::{parse_schema, ElementKind};
//!
//! let document = parse_schema(
//!     r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
//!          <xs:element name="note" type="xs:string"/>
//!        </xs:schema>"#,
//! )?;
//!
//! let note = document.find_global(ElementKind::Element, "note").unwrap();
//! assert_eq!(note.name(), Some("note"));
//! # Ok::<(), xsdparse::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Names, namespaces and attribute values
pub mod names;
pub mod namespaces;
pub mod values;

// Grammar tables and automata
pub mod grammar;

// Document model and construction
pub mod builder;
pub mod model;

// Parsing
pub mod documents;
pub mod parser;

// Re-exports for convenience
pub use builder::DocumentBuilder;
pub use error::{Error, NamespaceError, Position, Result, ValueError};
pub use grammar::{AttributeKind, ContextId, ElementKind, Registry, Specification};
pub use limits::Limits;
pub use model::{NodeId, NodeRef, Properties, SchemaDocument, SlotKind};
pub use namespaces::QName;
pub use parser::{parse_file, parse_schema, ParserContext, ParserOptions, SchemaParser};

/// Version of the xsdparse library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// XMLNS namespace
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";
