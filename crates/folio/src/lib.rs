//! Folio - rich-text documents with an embeddable media node
//!
//! Folio is a document model for composing formatted content that
//! round-trips to and from stored HTML, with:
//! - A closed set of node kinds plus one custom media (image) node
//! - Alignment, text wrap and sizing attributes on media, with a lossless
//!   HTML attribute codec
//! - An editing session with selection, atomic transactions and change
//!   notification
//! - A word-count readout and a word-limit policy
//!
//! # Quick Start
//!
//! ```rust
//! use folio::prelude::*;
//!
//! let mut editor = Editor::new(
//!     EditorConfig::new()
//!         .with_initial_content("<p>Hello world</p>")
//!         .with_word_limit(100),
//! );
//! editor.insert_media("data:image/png;base64,AAAA", MediaAttrsPatch::default());
//! editor.set_alignment(Alignment::Right);
//!
//! assert!(editor.get_content().contains(r#"data-align="right""#));
//! assert_eq!(editor.word_count(), 2);
//! ```
//!
//! # Features
//!
//! - `std` - Node registry, builders and normalization (default)
//! - `media` - Media node registration, commands and data URIs
//! - `html` - HTML reader/writer (default)
//! - `plaintext` - Plain text writer
//! - `transforms` - Word counting and document transforms
//! - `editor` - Editing sessions (default)
//! - `serde` - Serialize and deserialize media attributes
//! - `all` - Everything

// Re-export core types
pub use folio_core::*;

/// Node registry, property keys and builders.
#[cfg(feature = "std")]
pub mod std {
    pub use folio_std::*;
}

/// The embeddable media node.
#[cfg(feature = "media")]
pub mod media_node {
    pub use folio_media::*;
}

/// HTML format support.
#[cfg(feature = "html")]
pub mod html {
    pub use folio_read_html::parse;
    pub use folio_read_html::parse_with_options;

    pub use folio_write_html::emit;
    pub use folio_write_html::emit_full_document;
    pub use folio_write_html::emit_with_options;
    pub use folio_write_html::to_html;
}

/// Plain text format support.
#[cfg(feature = "plaintext")]
pub mod plaintext {
    pub use folio_write_plaintext::emit;
    pub use folio_write_plaintext::emit_with_options;
    pub use folio_write_plaintext::to_plain_text;
}

/// Word counting and document transforms.
#[cfg(feature = "transforms")]
pub mod transforms {
    pub use folio_transforms::*;
}

/// Editing sessions.
#[cfg(feature = "editor")]
pub mod editor {
    pub use folio_editor::*;
}

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        Alignment, ConversionResult, Document, Length, Mark, MediaAttrs, Node, NodeKind,
        PropValue, Properties, WrapStyle,
    };

    #[cfg(feature = "std")]
    pub use crate::std::{helpers, prop};

    #[cfg(feature = "media")]
    pub use crate::media_node::{MediaAttrsPatch, MediaCommand};

    #[cfg(feature = "editor")]
    pub use crate::editor::{Editor, EditorConfig, Selection, StepResult};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(all(feature = "html", feature = "std"))]
    fn test_html_roundtrip() {
        let doc = html::parse("<h1>Hello</h1><p>World!</p>").unwrap().value;
        let out = String::from_utf8(html::emit(&doc).unwrap().value).unwrap();
        assert_eq!(out, "<h1>Hello</h1><p>World!</p>");
    }

    #[test]
    #[cfg(feature = "editor")]
    fn test_prelude_editor() {
        use crate::prelude::*;

        let mut editor = Editor::new(EditorConfig::default());
        assert_eq!(editor.insert_text("hi"), StepResult::Applied);
        assert_eq!(editor.get_content(), "<p>hi</p>");
    }
}
