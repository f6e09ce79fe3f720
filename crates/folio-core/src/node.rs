//! Node types for the document tree.

use crate::{MediaAttrs, Properties};

/// A node in the document tree.
///
/// Ownership is exclusive and top-down: a node owns its children and is
/// owned by exactly one parent, so the tree can never share or cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// What this node is. The media variant carries its typed attributes.
    pub kind: NodeKind,
    /// Extensible properties (heading level, list flags, text content, link url).
    pub props: Properties,
    /// Child nodes.
    pub children: Vec<Node>,
}

/// The closed set of node kinds a folio document can contain.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Root container. Only ever appears at the top of a tree.
    Document,
    Paragraph,
    /// A heading (`level` property, 1-6).
    Heading,
    Blockquote,
    /// Preformatted code (`language` property is optional).
    CodeBlock,
    /// A list (`ordered` property distinguishes bullet and numbered).
    List,
    ListItem,
    HorizontalRule,
    /// The embeddable image node.
    Media(MediaAttrs),
    /// A run of text (`content` property).
    Text,
    /// A hard line break inside a text block.
    LineBreak,
    /// An inline formatting wrapper around text.
    Mark(Mark),
}

/// Inline formatting marks.
///
/// The declaration order is the canonical nesting order: earlier marks wrap
/// later ones when several apply to the same run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mark {
    /// A hyperlink (`url` and optional `title` properties).
    Link,
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
}

impl Node {
    /// Create a new node with the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            props: Properties::new(),
            children: Vec::new(),
        }
    }

    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(NodeKind::Text).prop(crate::TEXT_CONTENT, content.into())
    }

    /// Create a media node from its attributes.
    pub fn media(attrs: MediaAttrs) -> Self {
        Self::new(NodeKind::Media(attrs))
    }

    /// Add a property.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.set(key, value);
        self
    }

    /// Add a child node.
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple child nodes.
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// The text of a text node, or `None` for every other kind.
    pub fn text_content(&self) -> Option<&str> {
        match self.kind {
            NodeKind::Text => Some(self.props.get_str(crate::TEXT_CONTENT).unwrap_or("")),
            _ => None,
        }
    }

    /// Concatenated text of this node and all its descendants.
    pub fn collect_text(&self) -> String {
        let mut out = String::new();
        collect_text_into(self, &mut out);
        out
    }

    /// Media attributes if this is a media node.
    pub fn as_media(&self) -> Option<&MediaAttrs> {
        match &self.kind {
            NodeKind::Media(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Mutable media attributes if this is a media node.
    pub fn as_media_mut(&mut self) -> Option<&mut MediaAttrs> {
        match &mut self.kind {
            NodeKind::Media(attrs) => Some(attrs),
            _ => None,
        }
    }
}

fn collect_text_into(node: &Node, out: &mut String) {
    if let Some(text) = node.text_content() {
        out.push_str(text);
    }
    for child in &node.children {
        collect_text_into(child, out);
    }
}

impl NodeKind {
    /// Registered name of this kind, as used by schema lookups.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::Blockquote => "blockquote",
            NodeKind::CodeBlock => "code_block",
            NodeKind::List => "list",
            NodeKind::ListItem => "list_item",
            NodeKind::HorizontalRule => "horizontal_rule",
            NodeKind::Media(_) => "media",
            NodeKind::Text => "text",
            NodeKind::LineBreak => "line_break",
            NodeKind::Mark(_) => "mark",
        }
    }
}

impl Mark {
    /// Every mark, in canonical nesting order.
    pub const ALL: [Mark; 6] = [
        Mark::Link,
        Mark::Bold,
        Mark::Italic,
        Mark::Underline,
        Mark::Strike,
        Mark::Code,
    ];

    /// Registered name of this mark.
    pub fn name(self) -> &'static str {
        match self {
            Mark::Link => "link",
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Strike => "strike",
            Mark::Code => "code",
        }
    }

    /// Look a mark up by its registered name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Mark(mark) => write!(f, "mark:{}", mark.name()),
            other => f.write_str(other.name()),
        }
    }
}

// Re-export PropValue for the prop() method
pub use crate::properties::PropValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_text() {
        let node = Node::new(NodeKind::Paragraph)
            .child(Node::text("Hello, "))
            .child(Node::new(NodeKind::Mark(Mark::Bold)).child(Node::text("world")));
        assert_eq!(node.collect_text(), "Hello, world");
    }

    #[test]
    fn test_mark_names_roundtrip() {
        for mark in Mark::ALL {
            assert_eq!(Mark::from_name(mark.name()), Some(mark));
        }
        assert_eq!(Mark::from_name("blink"), None);
    }

    #[test]
    fn test_canonical_mark_order() {
        assert!(Mark::Link < Mark::Bold);
        assert!(Mark::Strike < Mark::Code);
    }

    #[test]
    fn test_media_accessors() {
        let mut node = Node::media(MediaAttrs::new("a.png"));
        assert_eq!(node.kind.name(), "media");
        node.as_media_mut().unwrap().alignment = crate::Alignment::Left;
        assert_eq!(node.as_media().unwrap().alignment, crate::Alignment::Left);
        assert!(Node::text("x").as_media().is_none());
    }
}
