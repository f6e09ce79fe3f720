//! Document transformers for folio.
//!
//! This crate provides:
//! - Word counting over the plain-text projection
//! - Word-limit truncation
//! - Empty node removal and text merging
//! - A pipeline to chain transformers

use folio_core::{Document, TransformError, Transformer};
use folio_std::{Node, NodeKind, helpers, prop};
use folio_write_plaintext::to_plain_text;

/// Count whitespace-separated words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Word count of a content tree's plain-text projection.
pub fn count_node_words(node: &Node) -> usize {
    count_words(&to_plain_text(node))
}

/// The first `limit` words of `text`, joined by single spaces.
pub fn first_words(text: &str, limit: usize) -> String {
    text.split_whitespace()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate a document to its first `limit` words.
///
/// Truncation keeps plain text only: when the limit is exceeded the whole
/// content is replaced by a single paragraph. Headings, lists, marks and
/// media present before truncation are not preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordLimit {
    pub limit: usize,
}

impl WordLimit {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// The replacement content root if `content` is over the limit.
    pub fn apply(&self, content: &Node) -> Option<Node> {
        let text = to_plain_text(content);
        let count = count_words(&text);
        if count <= self.limit {
            return None;
        }
        tracing::debug!(count, limit = self.limit, "truncating to word limit");

        let kept = first_words(&text, self.limit);
        let paragraph = if kept.is_empty() {
            helpers::paragraph([])
        } else {
            helpers::paragraph([helpers::text(kept)])
        };
        Some(helpers::document([paragraph]))
    }
}

impl Transformer for WordLimit {
    fn name(&self) -> &str {
        "word_limit"
    }

    fn transform(&self, doc: Document) -> Result<Document, TransformError> {
        match self.apply(&doc.content) {
            Some(content) => Ok(Document {
                content,
                metadata: doc.metadata,
            }),
            None => Ok(doc),
        }
    }
}

/// Remove whitespace-only text nodes and paragraphs with no content.
///
/// The document keeps at least one paragraph.
pub struct StripEmpty;

impl StripEmpty {
    fn is_empty_node(node: &Node) -> bool {
        match node.kind {
            NodeKind::Text => node
                .props
                .get_str(prop::CONTENT)
                .map(|s| s.trim().is_empty())
                .unwrap_or(true),
            NodeKind::Paragraph | NodeKind::Mark(_) => node.children.is_empty(),
            _ => false,
        }
    }

    fn transform_node(mut node: Node) -> Node {
        node.children = node
            .children
            .into_iter()
            .map(Self::transform_node)
            .filter(|c| !Self::is_empty_node(c))
            .collect();
        node
    }
}

impl Transformer for StripEmpty {
    fn name(&self) -> &str {
        "strip_empty"
    }

    fn transform(&self, doc: Document) -> Result<Document, TransformError> {
        let mut content = Self::transform_node(doc.content);
        if content.children.is_empty() {
            content.children.push(helpers::paragraph([]));
        }
        Ok(Document {
            content,
            metadata: doc.metadata,
        })
    }
}

/// Merge adjacent text nodes.
pub struct MergeText;

impl MergeText {
    fn transform_node(mut node: Node) -> Node {
        node.children = node
            .children
            .into_iter()
            .map(Self::transform_node)
            .collect();

        let mut merged: Vec<Node> = Vec::new();
        for child in node.children {
            if child.kind == NodeKind::Text
                && let Some(last) = merged.last_mut()
                && last.kind == NodeKind::Text
            {
                let prev_content = last.props.get_str(prop::CONTENT).unwrap_or("").to_string();
                let this_content = child.props.get_str(prop::CONTENT).unwrap_or("");
                last.props.set(prop::CONTENT, prev_content + this_content);
                continue;
            }
            merged.push(child);
        }

        node.children = merged;
        node
    }
}

impl Transformer for MergeText {
    fn name(&self) -> &str {
        "merge_text"
    }

    fn transform(&self, doc: Document) -> Result<Document, TransformError> {
        Ok(Document {
            content: Self::transform_node(doc.content),
            metadata: doc.metadata,
        })
    }
}

/// A transform pipeline that applies multiple transforms in sequence.
pub struct Pipeline {
    transforms: Vec<Box<dyn Transformer>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Add a transform to the pipeline.
    pub fn then<T: Transformer + 'static>(mut self, transform: T) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for Pipeline {
    fn name(&self) -> &str {
        "pipeline"
    }

    fn transform(&self, mut doc: Document) -> Result<Document, TransformError> {
        for transform in &self.transforms {
            tracing::trace!(transform = transform.name(), "applying");
            doc = transform.transform(doc)?;
        }
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::MediaAttrs;
    use folio_std::helpers::*;

    fn doc(children: Vec<Node>) -> Document {
        Document::new().with_content(document(children))
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t "), 0);
        assert_eq!(count_words("one"), 1);
        assert_eq!(count_words("  one two\n\nthree\tfour "), 4);
    }

    #[test]
    fn test_count_node_words_across_blocks() {
        let content = document([
            heading(1, [text("Title")]),
            paragraph([text("two "), bold([text("words")])]),
            media(MediaAttrs::new("a.png")),
        ]);
        assert_eq!(count_node_words(&content), 3);
    }

    #[test]
    fn test_blocks_never_fuse_words() {
        let content = document([paragraph([text("end")]), paragraph([text("start")])]);
        assert_eq!(count_node_words(&content), 2);
    }

    #[test]
    fn test_word_limit_truncates() {
        let d = doc(vec![paragraph([text("one two three four five")])]);
        let out = WordLimit::new(3).transform(d).unwrap();
        assert_eq!(
            out.content,
            document([paragraph([text("one two three")])])
        );
    }

    #[test]
    fn test_word_limit_drops_structure() {
        let d = doc(vec![
            heading(1, [text("a b")]),
            media(MediaAttrs::new("x.png")),
            bullet_list([list_item([paragraph([italic([text("c d")])])])]),
        ]);
        let out = WordLimit::new(3).transform(d).unwrap();
        assert_eq!(out.content, document([paragraph([text("a b c")])]));
    }

    #[test]
    fn test_word_limit_under_or_at_limit_untouched() {
        let d = doc(vec![heading(2, [text("one two")])]);
        let out = WordLimit::new(2).transform(d.clone()).unwrap();
        assert_eq!(out.content, d.content);
        assert!(WordLimit::new(5).apply(&d.content).is_none());
    }

    #[test]
    fn test_word_limit_zero() {
        let d = doc(vec![paragraph([text("x")])]);
        let out = WordLimit::new(0).transform(d).unwrap();
        assert_eq!(out.content, document([paragraph([])]));
    }

    #[test]
    fn test_strip_empty() {
        let d = doc(vec![
            paragraph([]),
            paragraph([text("  ")]),
            paragraph([text("kept")]),
        ]);
        let out = StripEmpty.transform(d).unwrap();
        assert_eq!(out.content.children, vec![paragraph([text("kept")])]);
    }

    #[test]
    fn test_strip_empty_keeps_one_paragraph() {
        let out = StripEmpty.transform(doc(vec![paragraph([])])).unwrap();
        assert_eq!(out.content.children, vec![paragraph([])]);
    }

    #[test]
    fn test_merge_text() {
        let d = doc(vec![paragraph([text("Hello"), text(", "), text("world")])]);
        let out = MergeText.transform(d).unwrap();
        assert_eq!(out.content.children[0].children, vec![text("Hello, world")]);
    }

    #[test]
    fn test_pipeline() {
        let d = doc(vec![
            paragraph([text("a"), text("b")]),
            paragraph([text(" ")]),
        ]);
        let pipeline = Pipeline::new().then(StripEmpty).then(MergeText);
        let out = pipeline.transform(d).unwrap();
        assert_eq!(out.content.children, vec![paragraph([text("ab")])]);
    }
}
