//! Document type - the root container for content.

use crate::{Node, NodeKind, Properties};

/// A document: one root node plus document-level metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Root content node. Always of kind [`NodeKind::Document`].
    pub content: Node,
    /// Document-level metadata (e.g. a `<title>` found while parsing).
    pub metadata: Properties,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            content: Node::new(NodeKind::Document),
            metadata: Properties::new(),
        }
    }

    /// Set the root content node.
    pub fn with_content(mut self, content: Node) -> Self {
        self.content = content;
        self
    }

    /// Set document metadata.
    pub fn with_metadata(mut self, metadata: Properties) -> Self {
        self.metadata = metadata;
        self
    }

    /// Top-level blocks.
    pub fn blocks(&self) -> &[Node] {
        &self.content.children
    }

    /// Depth-first iterator over every node below the root.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.content.children.iter().rev().collect(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order traversal returned by [`Document::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
