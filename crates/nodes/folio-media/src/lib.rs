//! Embeddable image node for folio.
//!
//! The media node is a block-level leaf whose attributes overlay placement
//! semantics (alignment, text wrap, size) onto an image. This crate holds the
//! node's registry entry, the partial-attribute record used on insertion, the
//! commands that edit a selected node's attributes, and the conversion of raw
//! image bytes into a self-contained data URI.
//!
//! The attribute record and its markup codec live in `folio_core::media`.

mod command;
mod data_uri;
mod patch;

pub use command::MediaCommand;
pub use data_uri::to_data_uri;
pub use folio_core::media::{
    Alignment, DEFAULT_WRAP_MARGIN, Length, MediaAttrs, WrapStyle, attr, codec,
};
pub use patch::MediaAttrsPatch;

use folio_core::schema::{Content, Group, NodeSpec};
use folio_core::{Node, NodeKind};

/// Registered name of the media node type.
pub const NAME: &str = "media";

/// Registry entry for the media node type.
pub const SPEC: NodeSpec = NodeSpec {
    name: NAME,
    group: Group::Block,
    content: Content::Empty,
    default_attrs: MediaAttrs::default_props,
};

/// Build a media node for `source`, defaults overridden by `patch`.
pub fn media_node(source: impl Into<String>, patch: &MediaAttrsPatch) -> Node {
    let mut attrs = MediaAttrs::new(source);
    patch.apply_to(&mut attrs);
    Node::new(NodeKind::Media(attrs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_matches_kind_name() {
        let node = media_node("a.png", &MediaAttrsPatch::default());
        assert_eq!(node.kind.name(), SPEC.name);
        assert!(SPEC.is_leaf());
        assert!(!SPEC.is_inline());
    }

    #[test]
    fn test_media_node_applies_patch() {
        let patch = MediaAttrsPatch::default().alignment(Alignment::Right);
        let node = media_node("a.png", &patch);
        let attrs = node.as_media().unwrap();
        assert_eq!(attrs.alignment, Alignment::Right);
        assert_eq!(attrs.wrap_style, WrapStyle::Square);
        assert_eq!(attrs.source, "a.png");
    }

    #[test]
    fn test_default_attrs_are_the_documented_defaults() {
        let props = (SPEC.default_attrs)();
        assert_eq!(props.get_str(attr::ALIGNMENT), Some("center"));
        assert_eq!(props.get_str(attr::WRAP_STYLE), Some("square"));
        assert_eq!(props.get_str(attr::WRAP_MARGIN), Some(DEFAULT_WRAP_MARGIN));
    }
}
