//! XML namespace handling
//!
//! This module provides qualified names (QNames) and the per-element
//! namespace binding table, including the rules that protect the reserved
//! `xml` and `xmlns` prefixes and namespaces.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::error::{NamespaceError, ValueError};
use crate::names::{split_qname, validate_qname};
use crate::{XMLNS_NAMESPACE, XML_NAMESPACE};

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

/// Resolve a lexical QName against the prefixes visible at a node.
///
/// `lookup` maps a prefix to its namespace; the empty prefix is the default
/// namespace, which applies to unprefixed names.
pub fn resolve_qname<F>(raw: &str, lookup: F) -> Result<QName, ValueError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = raw.trim();
    validate_qname(raw)?;

    match split_qname(raw) {
        (Some(prefix), local) => {
            let namespace =
                lookup(prefix).ok_or_else(|| ValueError::UnboundPrefix(prefix.to_string()))?;
            Ok(QName::namespaced(namespace, local))
        }
        (None, local) => Ok(QName::new(lookup(""), local)),
    }
}

/// Namespace declarations made on a single element.
///
/// The empty prefix stands for the default namespace; binding it to the empty
/// string undeclares the default namespace for the element's subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceBindings {
    prefixes: IndexMap<Prefix, NamespaceUri>,
}

impl NamespaceBindings {
    /// Create a new empty binding table
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a prefix to a namespace, enforcing the reserved-name rules
    pub fn bind(&mut self, prefix: &str, namespace: &str) -> Result<(), NamespaceError> {
        if prefix == "xmlns" {
            return Err(NamespaceError::XmlnsPrefixBound);
        }
        if namespace == XMLNS_NAMESPACE {
            return Err(NamespaceError::XmlnsNamespaceBound(prefix.to_string()));
        }
        if prefix == "xml" && namespace != XML_NAMESPACE {
            return Err(NamespaceError::XmlPrefixRebound(namespace.to_string()));
        }
        if prefix != "xml" && namespace == XML_NAMESPACE {
            return Err(NamespaceError::XmlNamespaceRebound(prefix.to_string()));
        }

        self.prefixes.insert(prefix.to_string(), namespace.to_string());
        Ok(())
    }

    /// Get the namespace declared for a prefix on this element.
    ///
    /// Returns `Some("")` when the prefix is explicitly undeclared here.
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Iterate over (prefix, namespace) pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Check if nothing is declared
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
