//! Schema document parser
//!
//! Drives a depth-first walk over the XML tree, keeping one
//! [`ParserContext`] per open element. Each child element is checked against
//! the content model of its parent, built into the document, given its
//! namespace declarations and attributes, and then descended into. The first
//! violation aborts the parse.

pub mod context;

pub use context::{CreatedElement, ParserContext};

use roxmltree::Node;
use std::path::Path;
use tracing::{debug, trace};

use crate::builder::DocumentBuilder;
use crate::documents::{declared_namespaces, is_whitespace, SourceDocument};
use crate::error::{Error, Position, Result};
use crate::grammar::{ContextId, Registry};
use crate::limits::Limits;
use crate::model::{NodeId, SchemaDocument};
use crate::namespaces::QName;
use crate::XSD_NAMESPACE;

/// Options controlling a parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Resource limits
    pub limits: Limits,
    /// Keep attributes from foreign namespaces instead of rejecting them
    pub allow_foreign_attributes: bool,
    /// Accept documents with a DTD
    pub allow_dtd: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            allow_foreign_attributes: true,
            allow_dtd: false,
        }
    }
}

impl ParserOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set resource limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Keep or reject attributes from foreign namespaces
    pub fn with_foreign_attributes(mut self, allow: bool) -> Self {
        self.allow_foreign_attributes = allow;
        self
    }

    /// Accept or refuse documents with a DTD
    pub fn with_dtd(mut self, allow: bool) -> Self {
        self.allow_dtd = allow;
        self
    }
}

/// Parser for XML Schema 1.0 documents
#[derive(Debug, Clone)]
pub struct SchemaParser<'r> {
    registry: &'r Registry,
    options: ParserOptions,
}

impl SchemaParser<'static> {
    /// Create a parser over the process-wide grammar registry
    pub fn new() -> Result<Self> {
        Ok(Self::with_registry(Registry::global()?))
    }
}

impl<'r> SchemaParser<'r> {
    /// Create a parser over a specific registry
    pub fn with_registry(registry: &'r Registry) -> Self {
        Self {
            registry,
            options: ParserOptions::default(),
        }
    }

    /// Replace the parse options
    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse schema text
    pub fn parse_str(&self, text: &str) -> Result<SchemaDocument> {
        self.options.limits.check_source_size(text.len())?;
        let source = SourceDocument::parse(
            text,
            self.options.allow_dtd,
            self.options.limits.max_nodes,
        )?;

        let root = source.root_element();
        if root.tag_name().namespace() != Some(XSD_NAMESPACE) {
            return Err(Error::InvalidSource(format!(
                "root element <{}> is not in the XML Schema namespace",
                root.tag_name().name()
            )));
        }

        debug!(bytes = text.len(), "parsing schema document");
        let run = Run {
            options: &self.options,
            registry: self.registry,
            source: &source,
            root,
            builder: DocumentBuilder::new(),
            stack: vec![Frame {
                context: ParserContext::new(self.registry.create(ContextId::Root)?),
                node: None,
                position: Position::new(1, 1),
            }],
        };
        let document = run.run()?;
        debug!(nodes = document.node_count(), "parsed schema document");
        Ok(document)
    }

    /// Read and parse a schema file
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<SchemaDocument> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading schema file");
        let text = std::fs::read_to_string(path)?;
        self.parse_str(&text)
    }
}

/// Parse schema text with default options
pub fn parse_schema(text: &str) -> Result<SchemaDocument> {
    SchemaParser::new()?.parse_str(text)
}

/// Read and parse a schema file with default options
pub fn parse_file(path: impl AsRef<Path>) -> Result<SchemaDocument> {
    SchemaParser::new()?.parse_file(path)
}

/// One open element
struct Frame {
    context: ParserContext,
    /// `None` for the document level
    node: Option<NodeId>,
    position: Position,
}

/// State of a single parse
struct Run<'p, 'a, 'input> {
    options: &'p ParserOptions,
    registry: &'p Registry,
    source: &'a SourceDocument<'input>,
    root: Node<'a, 'input>,
    builder: DocumentBuilder,
    stack: Vec<Frame>,
}

impl<'p, 'a, 'input> Run<'p, 'a, 'input> {
    fn run(mut self) -> Result<SchemaDocument> {
        let mut next = Some(self.root);
        while let Some(node) = next {
            next = if node.is_element() {
                let composite = self.enter_element(node)?;
                match node.first_child() {
                    Some(child) if composite => Some(child),
                    _ => {
                        self.leave_element()?;
                        self.advance(node)?
                    }
                }
            } else {
                self.check_content_node(node)?;
                self.advance(node)?
            };
        }

        // document level
        self.leave_element()?;
        self.builder.finish()
    }

    /// Next node after `node` once its subtree is done, closing parents on the way up
    fn advance(&mut self, mut node: Node<'a, 'input>) -> Result<Option<Node<'a, 'input>>> {
        loop {
            if node == self.root {
                return Ok(None);
            }
            if let Some(sibling) = node.next_sibling() {
                return Ok(Some(sibling));
            }
            match node.parent_element() {
                Some(parent) => {
                    self.leave_element()?;
                    node = parent;
                }
                None => return Ok(None),
            }
        }
    }

    fn frame(&self) -> Result<&Frame> {
        self.stack
            .last()
            .ok_or_else(|| Error::Structure("parser context stack is empty".to_string()))
    }

    /// Text, comments and processing instructions between schema elements
    fn check_content_node(&self, node: Node<'a, 'input>) -> Result<()> {
        let kind = if node.is_text() {
            match node.text() {
                Some(text) if !is_whitespace(text) => "text",
                _ => return Ok(()),
            }
        } else if node.is_comment() {
            return Ok(());
        } else if node.is_pi() {
            "processing instruction"
        } else {
            "node"
        };

        let content = match node.pi() {
            Some(pi) => pi.target.to_string(),
            None => node.text().unwrap_or_default().trim().to_string(),
        };
        Err(Error::UnexpectedNode {
            kind,
            parent: self.frame()?.context.element_name().to_string(),
            content,
            position: Some(self.source.position(node)),
        })
    }

    /// Open a schema element; returns whether it may have child elements
    fn enter_element(&mut self, node: Node<'a, 'input>) -> Result<bool> {
        let position = self.source.position(node);
        self.options
            .limits
            .check_depth(self.stack.len())
            .map_err(|e| e.at(position))?;

        let name = node.tag_name().name();
        let namespace = node.tag_name().namespace();
        let frame = self
            .stack
            .last_mut()
            .ok_or_else(|| Error::Structure("parser context stack is empty".to_string()))?;

        if namespace != Some(XSD_NAMESPACE) || !frame.context.is_element_accepted(name) {
            return Err(Error::UnexpectedElement {
                name: name.to_string(),
                namespace: namespace.map(String::from),
                parent: frame.context.element_name().to_string(),
                accepted: frame
                    .context
                    .accepted_elements()
                    .into_iter()
                    .map(String::from)
                    .collect(),
                position: Some(position),
            });
        }

        let created = frame
            .context
            .create_element(name, &mut self.builder, frame.node)
            .map_err(|e| e.at(position))?;
        let spec = self
            .registry
            .create(created.context)
            .map_err(|e| e.at(position))?;
        let context = ParserContext::new(spec);
        let composite = context.is_composite();
        trace!(element = name, context = ?created.context, %position, "open");
        self.stack.push(Frame {
            context,
            node: Some(created.node),
            position,
        });

        let declared = declared_namespaces(node);
        self.options
            .limits
            .check_namespaces(declared.len())
            .map_err(|e| e.at(position))?;
        for (prefix, uri) in declared {
            self.builder
                .bind_namespace(created.node, prefix, uri)
                .map_err(|e| e.at(position))?;
        }

        self.build_attributes(node, created.node, position)?;

        if !composite {
            self.builder
                .build_leaf_content(created.node, self.source.leaf_content(node))
                .map_err(|e| e.at(position))?;
        }
        Ok(composite)
    }

    fn build_attributes(&mut self, node: Node<'a, 'input>, id: NodeId, position: Position) -> Result<()> {
        self.options
            .limits
            .check_attributes(node.attributes().count())
            .map_err(|e| e.at(position))?;

        let frame = self
            .stack
            .last()
            .ok_or_else(|| Error::Structure("parser context stack is empty".to_string()))?;
        let mut seen = Vec::new();
        for attribute in node.attributes() {
            let (name, namespace) = (attribute.name(), attribute.namespace());
            if frame.context.is_attribute_supported(name, namespace) {
                let kind = frame
                    .context
                    .create_attribute(name, namespace, attribute.value(), &mut self.builder, id)
                    .map_err(|e| e.at(position))?;
                seen.push(kind);
            } else if self.options.allow_foreign_attributes
                && matches!(namespace, Some(ns) if ns != XSD_NAMESPACE)
            {
                self.builder
                    .build_foreign_attribute(id, QName::new(namespace, name), attribute.value())?;
            } else {
                return Err(Error::UnsupportedAttribute {
                    element: frame.context.element_name().to_string(),
                    name: name.to_string(),
                    namespace: namespace.map(String::from),
                    position: Some(position),
                });
            }
        }

        if let Some(missing) = frame
            .context
            .required_attributes()
            .iter()
            .find(|kind| !seen.contains(*kind))
        {
            return Err(Error::MissingAttribute {
                element: frame.context.element_name().to_string(),
                attribute: missing.local_name(),
                position: Some(position),
            });
        }
        Ok(())
    }

    /// Close the innermost element, checking that its content is complete
    fn leave_element(&mut self) -> Result<()> {
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| Error::Structure("parser context stack is empty".to_string()))?;

        if !frame.context.is_content_valid() {
            return Err(Error::InvalidContent {
                element: frame.context.element_name().to_string(),
                expected: frame
                    .context
                    .accepted_elements()
                    .into_iter()
                    .map(String::from)
                    .collect(),
                position: Some(frame.position),
            });
        }
        trace!(element = frame.context.element_name(), "close");
        Ok(())
    }
}
