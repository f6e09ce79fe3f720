//! Plain text writer for folio.
//!
//! Strips all formatting. Text blocks are separated by a blank line, hard
//! breaks become newlines, and media and rules contribute no text. This is
//! the projection word counting runs on.

use folio_core::{ConversionResult, Document, EmitError, EmitOptions, Node, NodeKind};

/// Emit a document as plain text.
pub fn emit(doc: &Document) -> Result<ConversionResult<Vec<u8>>, EmitError> {
    emit_with_options(doc, &EmitOptions::default())
}

/// Emit a document as plain text with custom options.
///
/// Output ends in a single newline unless the document has no text.
pub fn emit_with_options(
    doc: &Document,
    _options: &EmitOptions,
) -> Result<ConversionResult<Vec<u8>>, EmitError> {
    let mut output = to_plain_text(&doc.content);
    if !output.is_empty() {
        output.push('\n');
    }
    Ok(ConversionResult::ok(output.into_bytes()))
}

/// The plain-text projection of a content tree.
pub fn to_plain_text(node: &Node) -> String {
    let mut blocks = Vec::new();
    collect_blocks(node, &mut blocks);
    blocks.join("\n\n")
}

fn collect_blocks(node: &Node, blocks: &mut Vec<String>) {
    match node.kind {
        NodeKind::Paragraph | NodeKind::Heading | NodeKind::CodeBlock => {
            let mut text = String::new();
            collect_inline(&node.children, &mut text);
            blocks.push(text);
        }
        NodeKind::Media(_) | NodeKind::HorizontalRule => {}
        NodeKind::Text | NodeKind::LineBreak | NodeKind::Mark(_) => {
            let mut text = String::new();
            collect_inline(std::slice::from_ref(node), &mut text);
            blocks.push(text);
        }
        NodeKind::Document | NodeKind::Blockquote | NodeKind::List | NodeKind::ListItem => {
            for child in &node.children {
                collect_blocks(child, blocks);
            }
        }
    }
}

fn collect_inline(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node.kind {
            NodeKind::Text => out.push_str(node.text_content().unwrap_or_default()),
            NodeKind::LineBreak => out.push('\n'),
            _ => collect_inline(&node.children, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::MediaAttrs;
    use folio_std::helpers::*;

    fn emit_str(children: Vec<Node>) -> String {
        let doc = Document::new().with_content(document(children));
        String::from_utf8(emit(&doc).unwrap().value).unwrap()
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let text = to_plain_text(&document([
            heading(1, [text("Title")]),
            paragraph([text("Hello "), bold([text("world")])]),
        ]));
        assert_eq!(text, "Title\n\nHello world");
    }

    #[test]
    fn test_line_break_is_newline() {
        let text = to_plain_text(&document([paragraph([text("a"), line_break(), text("b")])]));
        assert_eq!(text, "a\nb");
    }

    #[test]
    fn test_media_contributes_nothing() {
        let text = to_plain_text(&document([
            paragraph([text("one")]),
            media(MediaAttrs::new("a.png")),
            horizontal_rule(),
            paragraph([text("two")]),
        ]));
        assert_eq!(text, "one\n\ntwo");
    }

    #[test]
    fn test_nested_blocks() {
        let text = to_plain_text(&document([
            bullet_list([
                list_item([paragraph([text("x")])]),
                list_item([paragraph([text("y")])]),
            ]),
            blockquote([paragraph([text("z")])]),
        ]));
        assert_eq!(text, "x\n\ny\n\nz");
    }

    #[test]
    fn test_emit_trailing_newline() {
        assert_eq!(emit_str(vec![paragraph([text("hi")])]), "hi\n");
        assert_eq!(emit_str(vec![]), "");
    }
}
