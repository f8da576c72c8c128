//! XML source documents
//!
//! Thin layer over `roxmltree` giving the parser what it needs from the
//! generic XML tree: well-formedness checking, source positions, the
//! namespace declarations made on each element and the verbatim content of
//! leaf elements.

use roxmltree::{Node, ParsingOptions};

use crate::error::{Error, Position, Result};
use crate::model::LeafContent;
use crate::XML_NAMESPACE;

/// A well-formed XML document
pub struct SourceDocument<'input> {
    tree: roxmltree::Document<'input>,
}

impl<'input> SourceDocument<'input> {
    /// Parse XML text.
    ///
    /// DTDs are refused unless `allow_dtd` is set; `max_nodes` bounds the
    /// size of the resulting tree.
    pub fn parse(text: &'input str, allow_dtd: bool, max_nodes: u32) -> Result<Self> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = allow_dtd;
        options.nodes_limit = max_nodes;
        let tree = roxmltree::Document::parse_with_options(text, options)
            .map_err(|e| Error::InvalidSource(e.to_string()))?;
        Ok(Self { tree })
    }

    /// Document element
    pub fn root_element(&self) -> Node<'_, 'input> {
        self.tree.root_element()
    }

    /// Line and column where `node` starts
    pub fn position(&self, node: Node<'_, 'input>) -> Position {
        let pos = self.tree.text_pos_at(node.range().start);
        Position::new(pos.row, pos.col)
    }

    /// Character data and raw markup between the tags of `node`
    pub fn leaf_content(&self, node: Node<'_, 'input>) -> LeafContent {
        let text = node
            .descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect();

        let markup = match (node.first_child(), node.last_child()) {
            (Some(first), Some(last)) => self
                .tree
                .input_text()
                .get(first.range().start..last.range().end)
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        };

        LeafContent { text, markup }
    }
}

/// Namespace declarations made on `element` itself, as `(prefix, uri)`.
///
/// The default namespace has the empty prefix. Undeclaring an inherited
/// default namespace (`xmlns=""`) shows up as `("", "")`. The implicit `xml`
/// binding is never reported.
pub fn declared_namespaces<'a>(element: Node<'a, '_>) -> Vec<(&'a str, &'a str)> {
    let inherited: Vec<(Option<&str>, &str)> = element
        .parent_element()
        .map(|parent| parent.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    let mut declared = Vec::new();
    let mut has_default = false;
    for ns in element.namespaces() {
        let binding = (ns.name(), ns.uri());
        has_default |= binding.0.is_none();
        if binding == (Some("xml"), XML_NAMESPACE) || inherited.contains(&binding) {
            continue;
        }
        declared.push((binding.0.unwrap_or(""), binding.1));
    }

    if !has_default && inherited.iter().any(|(prefix, _)| prefix.is_none()) {
        declared.push(("", ""));
    }
    declared
}

/// Check if a text node holds nothing but XML whitespace
pub fn is_whitespace(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(matches!(
            SourceDocument::parse("<a><b></a>", false, u32::MAX),
            Err(Error::InvalidSource(_))
        ));
    }

    #[test]
    fn test_parse_rejects_dtd_by_default() {
        let text = "<!DOCTYPE a [<!ENTITY e 'x'>]><a>&e;</a>";
        assert!(SourceDocument::parse(text, false, u32::MAX).is_err());
        assert!(SourceDocument::parse(text, true, u32::MAX).is_ok());
    }

    #[test]
    fn test_position() {
        let doc = SourceDocument::parse("<a>\n  <b/>\n</a>", false, u32::MAX).unwrap();
        let b = doc.root_element().first_element_child().unwrap();
        assert_eq!(doc.position(b), Position::new(2, 3));
    }

    #[test]
    fn test_declared_namespaces() {
        let text = r#"<a xmlns="urn:d" xmlns:p="urn:p"><b xmlns:p="urn:p" xmlns:q="urn:q"/><c xmlns=""/></a>"#;
        let doc = SourceDocument::parse(text, false, u32::MAX).unwrap();
        let root = doc.root_element();

        let mut on_root = declared_namespaces(root);
        on_root.sort();
        assert_eq!(on_root, vec![("", "urn:d"), ("p", "urn:p")]);

        let mut children = root.children().filter(|n| n.is_element());
        let b = children.next().unwrap();
        assert_eq!(declared_namespaces(b), vec![("q", "urn:q")]);
        let c = children.next().unwrap();
        assert_eq!(declared_namespaces(c), vec![("", "")]);
    }

    #[test]
    fn test_leaf_content() {
        let text = "<doc>Some <b>bold</b> text</doc>";
        let doc = SourceDocument::parse(text, false, u32::MAX).unwrap();
        let content = doc.leaf_content(doc.root_element());
        assert_eq!(content.text, "Some bold text");
        assert_eq!(content.markup, "Some <b>bold</b> text");

        let empty = SourceDocument::parse("<doc/>", false, u32::MAX).unwrap();
        assert_eq!(empty.leaf_content(empty.root_element()), LeafContent::default());
    }

    #[test]
    fn test_is_whitespace() {
        assert!(is_whitespace(" \n\t\r"));
        assert!(is_whitespace(""));
        assert!(!is_whitespace(" x "));
        assert!(!is_whitespace("\u{a0}"));
    }
}
