//! Shape of a node type registration.
//!
//! The registry itself (the static table of every node type) lives in
//! `folio-std`; extensions such as `folio-media` contribute entries.

use crate::Properties;

/// Where a node may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// Only the document root.
    Root,
    /// Direct child of the root, a blockquote or a list item.
    Block,
    /// Inside a text block.
    Inline,
}

/// What a node may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    /// Block nodes.
    Blocks,
    /// List items only.
    ListItems,
    /// Inline nodes (text, marks, line breaks).
    Inline,
    /// Nothing: a leaf.
    Empty,
}

/// A registered node type.
#[derive(Debug, Clone, Copy)]
pub struct NodeSpec {
    /// Registered name, matching [`crate::NodeKind::name`].
    pub name: &'static str,
    pub group: Group,
    pub content: Content,
    /// Attribute values reported when no node of this type is selected.
    pub default_attrs: fn() -> Properties,
}

impl NodeSpec {
    /// A block whose content is inline (paragraph, heading, code block).
    pub fn is_textblock(&self) -> bool {
        self.group == Group::Block && self.content == Content::Inline
    }

    pub fn is_leaf(&self) -> bool {
        self.content == Content::Empty
    }

    pub fn is_inline(&self) -> bool {
        self.group == Group::Inline
    }
}

/// `default_attrs` for types without attributes.
pub fn no_attrs() -> Properties {
    Properties::new()
}
