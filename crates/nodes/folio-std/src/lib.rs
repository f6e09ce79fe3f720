//! Standard node registry and property keys for folio.
//!
//! This crate provides the standard vocabulary for document representation:
//! the static table of registered node types (the built-in ones plus the
//! media extension), property key constants, node builders, and the
//! normalization pass that makes any tree conform to the schema.
//! It re-exports `folio-core` so users only need one import.

pub use folio_core::*;

mod normalize;
pub mod schema;

pub use schema::{normalize, normalize_document};

/// Standard property key constants.
pub mod prop {
    /// Heading level (1-6).
    pub const LEVEL: &str = "level";
    /// Whether a list is ordered.
    pub const ORDERED: &str = "ordered";
    /// Start number for ordered lists.
    pub const START: &str = "start";
    /// Programming language for code blocks.
    pub const LANGUAGE: &str = "language";
    /// Text content for text nodes.
    pub const CONTENT: &str = folio_core::TEXT_CONTENT;
    /// URL for links.
    pub const URL: &str = "url";
    /// Title attribute for links.
    pub const TITLE: &str = "title";
}

/// Helper functions for creating common nodes.
pub mod helpers {
    use crate::{Mark, MediaAttrs, Node, NodeKind, prop};

    /// Create a text node with the given content.
    pub fn text(content: impl Into<String>) -> Node {
        Node::text(content)
    }

    /// Create a paragraph with children.
    pub fn paragraph(children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(NodeKind::Paragraph).children(children)
    }

    /// Create a heading with the given level and children.
    pub fn heading(level: i64, children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(NodeKind::Heading)
            .prop(prop::LEVEL, level)
            .children(children)
    }

    /// Create a code block with optional language.
    pub fn code_block(code: impl Into<String>, language: Option<&str>) -> Node {
        let mut node = Node::new(NodeKind::CodeBlock).child(Node::text(code));
        if let Some(lang) = language {
            node = node.prop(prop::LANGUAGE, lang);
        }
        node
    }

    /// Create a blockquote.
    pub fn blockquote(children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(NodeKind::Blockquote).children(children)
    }

    /// Create an unordered list.
    pub fn bullet_list(items: impl IntoIterator<Item = Node>) -> Node {
        Node::new(NodeKind::List)
            .prop(prop::ORDERED, false)
            .children(items)
    }

    /// Create an ordered list.
    pub fn ordered_list(items: impl IntoIterator<Item = Node>) -> Node {
        Node::new(NodeKind::List)
            .prop(prop::ORDERED, true)
            .children(items)
    }

    /// Create a list item.
    pub fn list_item(children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(NodeKind::ListItem).children(children)
    }

    /// Wrap children in a formatting mark.
    pub fn mark(mark: Mark, children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(NodeKind::Mark(mark)).children(children)
    }

    /// Create bold text.
    pub fn bold(children: impl IntoIterator<Item = Node>) -> Node {
        mark(Mark::Bold, children)
    }

    /// Create italic text.
    pub fn italic(children: impl IntoIterator<Item = Node>) -> Node {
        mark(Mark::Italic, children)
    }

    /// Create a link with URL and children.
    pub fn link(url: impl Into<String>, children: impl IntoIterator<Item = Node>) -> Node {
        mark(Mark::Link, children).prop(prop::URL, url.into())
    }

    /// Create a media node.
    pub fn media(attrs: MediaAttrs) -> Node {
        Node::media(attrs)
    }

    /// Create a horizontal rule.
    pub fn horizontal_rule() -> Node {
        Node::new(NodeKind::HorizontalRule)
    }

    /// Create a hard line break.
    pub fn line_break() -> Node {
        Node::new(NodeKind::LineBreak)
    }

    /// Create a document root with children.
    pub fn document(children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(NodeKind::Document).children(children)
    }
}
