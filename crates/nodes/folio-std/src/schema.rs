//! The node registry: one static table of every node type.

use folio_core::schema::{Content, Group, NodeSpec, no_attrs};
use folio_core::{Mark, NodeKind, Properties};

use crate::prop;

pub use crate::normalize::{normalize, normalize_document};

/// Every registered node type. Built-in types first, then extensions.
pub static NODE_SPECS: [NodeSpec; 12] = [
    NodeSpec {
        name: "document",
        group: Group::Root,
        content: Content::Blocks,
        default_attrs: no_attrs,
    },
    NodeSpec {
        name: "paragraph",
        group: Group::Block,
        content: Content::Inline,
        default_attrs: no_attrs,
    },
    NodeSpec {
        name: "heading",
        group: Group::Block,
        content: Content::Inline,
        default_attrs: heading_defaults,
    },
    NodeSpec {
        name: "blockquote",
        group: Group::Block,
        content: Content::Blocks,
        default_attrs: no_attrs,
    },
    NodeSpec {
        name: "code_block",
        group: Group::Block,
        content: Content::Inline,
        default_attrs: no_attrs,
    },
    NodeSpec {
        name: "list",
        group: Group::Block,
        content: Content::ListItems,
        default_attrs: list_defaults,
    },
    NodeSpec {
        name: "list_item",
        group: Group::Block,
        content: Content::Blocks,
        default_attrs: no_attrs,
    },
    NodeSpec {
        name: "horizontal_rule",
        group: Group::Block,
        content: Content::Empty,
        default_attrs: no_attrs,
    },
    folio_media::SPEC,
    NodeSpec {
        name: "text",
        group: Group::Inline,
        content: Content::Empty,
        default_attrs: no_attrs,
    },
    NodeSpec {
        name: "line_break",
        group: Group::Inline,
        content: Content::Empty,
        default_attrs: no_attrs,
    },
    NodeSpec {
        name: "mark",
        group: Group::Inline,
        content: Content::Inline,
        default_attrs: no_attrs,
    },
];

fn heading_defaults() -> Properties {
    Properties::new().with(prop::LEVEL, 1i64)
}

fn list_defaults() -> Properties {
    Properties::new().with(prop::ORDERED, false)
}

/// Look a node type up by registered name.
pub fn spec(name: &str) -> Option<&'static NodeSpec> {
    NODE_SPECS.iter().find(|s| s.name == name)
}

/// The registry entry for a node kind.
pub fn spec_of(kind: &NodeKind) -> &'static NodeSpec {
    let index = match kind {
        NodeKind::Document => 0,
        NodeKind::Paragraph => 1,
        NodeKind::Heading => 2,
        NodeKind::Blockquote => 3,
        NodeKind::CodeBlock => 4,
        NodeKind::List => 5,
        NodeKind::ListItem => 6,
        NodeKind::HorizontalRule => 7,
        NodeKind::Media(_) => 8,
        NodeKind::Text => 9,
        NodeKind::LineBreak => 10,
        NodeKind::Mark(_) => 11,
    };
    &NODE_SPECS[index]
}

pub fn is_textblock(kind: &NodeKind) -> bool {
    spec_of(kind).is_textblock()
}

pub fn is_inline(kind: &NodeKind) -> bool {
    spec_of(kind).is_inline()
}

pub fn is_leaf(kind: &NodeKind) -> bool {
    spec_of(kind).is_leaf()
}

/// A registered mark type and the HTML tags that produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkSpec {
    pub mark: Mark,
    /// Tags read as this mark; the first one is written.
    pub tags: &'static [&'static str],
}

impl MarkSpec {
    pub fn tag(&self) -> &'static str {
        self.tags[0]
    }
}

/// Every mark, in canonical nesting order.
pub static MARK_SPECS: [MarkSpec; 6] = [
    MarkSpec {
        mark: Mark::Link,
        tags: &["a"],
    },
    MarkSpec {
        mark: Mark::Bold,
        tags: &["strong", "b"],
    },
    MarkSpec {
        mark: Mark::Italic,
        tags: &["em", "i"],
    },
    MarkSpec {
        mark: Mark::Underline,
        tags: &["u", "ins"],
    },
    MarkSpec {
        mark: Mark::Strike,
        tags: &["s", "strike", "del"],
    },
    MarkSpec {
        mark: Mark::Code,
        tags: &["code"],
    },
];

pub fn mark_spec(mark: Mark) -> &'static MarkSpec {
    let index = match mark {
        Mark::Link => 0,
        Mark::Bold => 1,
        Mark::Italic => 2,
        Mark::Underline => 3,
        Mark::Strike => 4,
        Mark::Code => 5,
    };
    &MARK_SPECS[index]
}

/// The mark an HTML tag stands for.
pub fn mark_for_tag(tag: &str) -> Option<Mark> {
    MARK_SPECS
        .iter()
        .find(|spec| spec.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
        .map(|spec| spec.mark)
}

/// What a name passed to a toolbar query refers to.
#[derive(Debug, Clone, Copy)]
pub enum Target {
    Node(&'static NodeSpec),
    Mark(Mark),
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Target::Node(a), Target::Node(b)) => a.name == b.name,
            (Target::Mark(a), Target::Mark(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Target {}

/// Resolve a node type or mark name.
///
/// Node names take precedence; `"code"` therefore means the inline code
/// mark while `"code_block"` means the block.
pub fn resolve(name: &str) -> Option<Target> {
    spec(name)
        .filter(|s| s.name != "mark")
        .map(Target::Node)
        .or_else(|| Mark::from_name(name).map(Target::Mark))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::MediaAttrs;

    #[test]
    fn test_spec_of_matches_kind_names() {
        let kinds = [
            NodeKind::Document,
            NodeKind::Paragraph,
            NodeKind::Heading,
            NodeKind::Blockquote,
            NodeKind::CodeBlock,
            NodeKind::List,
            NodeKind::ListItem,
            NodeKind::HorizontalRule,
            NodeKind::Media(MediaAttrs::new("a.png")),
            NodeKind::Text,
            NodeKind::LineBreak,
            NodeKind::Mark(Mark::Bold),
        ];
        for kind in &kinds {
            assert_eq!(spec_of(kind).name, kind.name());
        }
    }

    #[test]
    fn test_media_registered_once() {
        let count = NODE_SPECS.iter().filter(|s| s.name == "media").count();
        assert_eq!(count, 1);
        assert!(spec("media").unwrap().is_leaf());
    }

    #[test]
    fn test_textblocks() {
        assert!(is_textblock(&NodeKind::Paragraph));
        assert!(is_textblock(&NodeKind::Heading));
        assert!(is_textblock(&NodeKind::CodeBlock));
        assert!(!is_textblock(&NodeKind::ListItem));
        assert!(!is_textblock(&NodeKind::Mark(Mark::Bold)));
    }

    #[test]
    fn test_mark_specs_in_canonical_order() {
        let marks: Vec<_> = MARK_SPECS.iter().map(|s| s.mark).collect();
        assert_eq!(marks, Mark::ALL);
        for mark in Mark::ALL {
            assert_eq!(mark_spec(mark).mark, mark);
        }
    }

    #[test]
    fn test_mark_for_tag() {
        assert_eq!(mark_for_tag("b"), Some(Mark::Bold));
        assert_eq!(mark_for_tag("del"), Some(Mark::Strike));
        assert_eq!(mark_for_tag("span"), None);
        assert_eq!(mark_spec(Mark::Italic).tag(), "em");
    }

    #[test]
    fn test_resolve_names() {
        assert_eq!(resolve("bold"), Some(Target::Mark(Mark::Bold)));
        assert!(matches!(resolve("media"), Some(Target::Node(s)) if s.name == "media"));
        assert_eq!(resolve("mark"), None);
        assert_eq!(resolve("marquee"), None);
    }
}
