//! Make an arbitrary tree conform to the node registry.
//!
//! Readers and the editor both build trees loosely (inline runs at block
//! level, images inside paragraphs, bare text inside lists) and run them
//! through [`normalize`] afterwards. The pass is idempotent.

use std::mem::take;

use folio_core::{Document, Node, NodeKind, Properties};

use crate::prop;
use crate::schema::is_inline;

/// Normalize a document root. A non-document node is treated as the only
/// block of a new root.
pub fn normalize(root: Node) -> Node {
    let (props, children) = if root.kind == NodeKind::Document {
        (root.props, root.children)
    } else {
        (Properties::new(), vec![root])
    };
    let mut blocks = normalize_blocks(children);
    if blocks.is_empty() {
        blocks.push(Node::new(NodeKind::Paragraph));
    }
    Node {
        kind: NodeKind::Document,
        props,
        children: blocks,
    }
}

/// Normalize a document's content tree, keeping its metadata.
pub fn normalize_document(doc: Document) -> Document {
    Document {
        content: normalize(doc.content),
        metadata: doc.metadata,
    }
}

fn normalize_blocks(children: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::new();
    let mut run = Vec::new();
    for child in children {
        if is_inline(&child.kind) {
            run.push(child);
        } else {
            flush_run(&mut run, &mut out);
            normalize_block(child, &mut out);
        }
    }
    flush_run(&mut run, &mut out);
    out
}

/// Wrap a run of stray inline nodes in a paragraph, unless it is only
/// whitespace left over from markup indentation.
fn flush_run(run: &mut Vec<Node>, out: &mut Vec<Node>) {
    let inline = take(run);
    if inline.iter().all(is_blank) {
        return;
    }
    normalize_textblock(Node::new(NodeKind::Paragraph).children(inline), out);
}

fn is_blank(node: &Node) -> bool {
    match node.text_content() {
        Some(text) => text.trim().is_empty(),
        None => matches!(node.kind, NodeKind::Mark(_)) && node.children.iter().all(is_blank),
    }
}

fn normalize_block(mut node: Node, out: &mut Vec<Node>) {
    match node.kind {
        NodeKind::Document => out.extend(normalize_blocks(node.children)),
        NodeKind::Paragraph | NodeKind::CodeBlock => normalize_textblock(node, out),
        NodeKind::Heading => {
            let level = node.props.get_int(prop::LEVEL).unwrap_or(1).clamp(1, 6);
            node.props.set(prop::LEVEL, level);
            normalize_textblock(node, out);
        }
        NodeKind::Blockquote => {
            node.children = non_empty(normalize_blocks(take(&mut node.children)));
            out.push(node);
        }
        NodeKind::List => {
            node.children = normalize_items(take(&mut node.children));
            if !node.children.is_empty() {
                out.push(node);
            }
        }
        // A list item outside a list.
        NodeKind::ListItem => {
            let list = Node::new(NodeKind::List)
                .prop(prop::ORDERED, false)
                .child(node);
            normalize_block(list, out);
        }
        NodeKind::HorizontalRule | NodeKind::Media(_) => {
            node.children.clear();
            out.push(node);
        }
        NodeKind::Text | NodeKind::LineBreak | NodeKind::Mark(_) => {
            normalize_textblock(Node::new(NodeKind::Paragraph).child(node), out);
        }
    }
}

fn non_empty(mut blocks: Vec<Node>) -> Vec<Node> {
    if blocks.is_empty() {
        blocks.push(Node::new(NodeKind::Paragraph));
    }
    blocks
}

fn normalize_items(children: Vec<Node>) -> Vec<Node> {
    let mut items = Vec::new();
    let mut loose = Vec::new();
    for child in children {
        if child.kind == NodeKind::ListItem {
            flush_loose(&mut loose, &mut items);
            let mut item = child;
            item.children = non_empty(normalize_blocks(take(&mut item.children)));
            items.push(item);
        } else {
            loose.push(child);
        }
    }
    flush_loose(&mut loose, &mut items);
    items
}

fn flush_loose(loose: &mut Vec<Node>, items: &mut Vec<Node>) {
    let nodes = take(loose);
    if nodes.iter().all(is_blank) {
        return;
    }
    let blocks = non_empty(normalize_blocks(nodes));
    items.push(Node::new(NodeKind::ListItem).children(blocks));
}

enum Piece {
    Inline(Node),
    Block(Node),
}

/// Flatten a text block's children into inline runs and the blocks that
/// interrupt them. Marks around a block are split in two.
fn split_inline(children: Vec<Node>) -> Vec<Piece> {
    let mut pieces = Vec::new();
    for child in children {
        if matches!(child.kind, NodeKind::Mark(_)) {
            let Node {
                kind,
                props,
                children,
            } = child;
            let mut inner = Vec::new();
            for piece in split_inline(children) {
                match piece {
                    Piece::Inline(node) => inner.push(node),
                    Piece::Block(block) => {
                        if !inner.is_empty() {
                            pieces.push(Piece::Inline(Node {
                                kind: kind.clone(),
                                props: props.clone(),
                                children: take(&mut inner),
                            }));
                        }
                        pieces.push(Piece::Block(block));
                    }
                }
            }
            if !inner.is_empty() {
                pieces.push(Piece::Inline(Node {
                    kind,
                    props,
                    children: inner,
                }));
            }
        } else if is_inline(&child.kind) {
            pieces.push(Piece::Inline(child));
        } else {
            pieces.push(Piece::Block(child));
        }
    }
    pieces
}

fn normalize_textblock(node: Node, out: &mut Vec<Node>) {
    let Node {
        kind,
        props,
        children,
    } = node;
    let pieces = split_inline(children);

    if !pieces.iter().any(|p| matches!(p, Piece::Block(_))) {
        let inline = pieces
            .into_iter()
            .filter_map(|p| match p {
                Piece::Inline(node) => Some(node),
                Piece::Block(_) => None,
            })
            .collect();
        let children = textblock_content(&kind, inline);
        out.push(Node {
            kind,
            props,
            children,
        });
        return;
    }

    // Lifting blocks out splits the text block; whitespace-only halves go.
    let mut run = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Inline(node) => run.push(node),
            Piece::Block(block) => {
                push_segment(&kind, &props, take(&mut run), out);
                normalize_block(block, out);
            }
        }
    }
    push_segment(&kind, &props, run, out);
}

fn push_segment(kind: &NodeKind, props: &Properties, run: Vec<Node>, out: &mut Vec<Node>) {
    if run.iter().all(is_blank) {
        return;
    }
    out.push(Node {
        kind: kind.clone(),
        props: props.clone(),
        children: textblock_content(kind, run),
    });
}

fn textblock_content(kind: &NodeKind, inline: Vec<Node>) -> Vec<Node> {
    if *kind == NodeKind::CodeBlock {
        let mut code = String::new();
        plain_code(&inline, &mut code);
        return if code.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(code)]
        };
    }
    clean_inline(inline)
}

/// Code blocks hold one unformatted text run.
fn plain_code(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match &node.kind {
            NodeKind::Text => out.push_str(node.text_content().unwrap_or_default()),
            NodeKind::LineBreak => out.push('\n'),
            _ => plain_code(&node.children, out),
        }
    }
}

/// Merge adjacent text and identical marks; drop empty text and empty marks.
fn clean_inline(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::new();
    for mut node in nodes {
        match node.kind {
            NodeKind::Mark(_) => {
                node.children = clean_inline(take(&mut node.children));
                if node.children.is_empty() {
                    continue;
                }
                if let Some(prev) = out.last_mut()
                    && prev.kind == node.kind
                    && prev.props == node.props
                {
                    prev.children.append(&mut node.children);
                    prev.children = clean_inline(take(&mut prev.children));
                    continue;
                }
            }
            NodeKind::Text => {
                node.children.clear();
                let content = node.text_content().unwrap_or_default();
                if content.is_empty() {
                    continue;
                }
                if let Some(prev) = out.last_mut()
                    && prev.kind == NodeKind::Text
                {
                    let merged = format!("{}{}", prev.text_content().unwrap_or_default(), content);
                    prev.props.set(prop::CONTENT, merged);
                    continue;
                }
            }
            _ => node.children.clear(),
        }
        out.push(node);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::*;
    use folio_core::{Mark, MediaAttrs};

    fn img() -> Node {
        media(MediaAttrs::new("a.png"))
    }

    #[test]
    fn test_empty_document_gets_paragraph() {
        let doc = normalize(document([]));
        assert_eq!(doc.children, vec![paragraph([])]);
    }

    #[test]
    fn test_stray_inline_wrapped() {
        let doc = normalize(document([text("hi"), bold([text("!")])]));
        assert_eq!(doc.children, vec![paragraph([text("hi"), bold([text("!")])])]);
    }

    #[test]
    fn test_whitespace_between_blocks_dropped() {
        let doc = normalize(document([
            text("\n  "),
            paragraph([text("a")]),
            text("\n"),
        ]));
        assert_eq!(doc.children, vec![paragraph([text("a")])]);
    }

    #[test]
    fn test_media_lifted_out_of_paragraph() {
        let doc = normalize(document([paragraph([text("a "), img(), text(" b")])]));
        assert_eq!(
            doc.children,
            vec![paragraph([text("a ")]), img(), paragraph([text(" b")])]
        );
    }

    #[test]
    fn test_media_alone_in_paragraph() {
        let doc = normalize(document([paragraph([text(" "), img()])]));
        assert_eq!(doc.children, vec![img()]);
    }

    #[test]
    fn test_mark_split_around_block() {
        let doc = normalize(document([paragraph([bold([text("x"), img(), text("y")])])]));
        assert_eq!(
            doc.children,
            vec![
                paragraph([bold([text("x")])]),
                img(),
                paragraph([bold([text("y")])]),
            ]
        );
    }

    #[test]
    fn test_adjacent_text_merged() {
        let doc = normalize(document([paragraph([
            text("a"),
            text(""),
            text("b"),
            bold([text("c")]),
            bold([text("d")]),
        ])]));
        assert_eq!(
            doc.children,
            vec![paragraph([text("ab"), bold([text("cd")])])]
        );
    }

    #[test]
    fn test_different_links_not_merged() {
        let p = paragraph([link("a", [text("1")]), link("b", [text("2")])]);
        let doc = normalize(document([p.clone()]));
        assert_eq!(doc.children, vec![p]);
    }

    #[test]
    fn test_list_children_wrapped() {
        let doc = normalize(document([bullet_list([text(" "), text("loose"), list_item([])])]));
        assert_eq!(
            doc.children,
            vec![bullet_list([
                list_item([paragraph([text(" loose")])]),
                list_item([paragraph([])]),
            ])]
        );
    }

    #[test]
    fn test_empty_list_dropped() {
        let doc = normalize(document([bullet_list([]), paragraph([text("a")])]));
        assert_eq!(doc.children, vec![paragraph([text("a")])]);
    }

    #[test]
    fn test_heading_level_clamped() {
        let doc = normalize(document([heading(9, [text("h")])]));
        assert_eq!(doc.children[0].props.get_int(prop::LEVEL), Some(6));
    }

    #[test]
    fn test_code_block_flattened() {
        let block = Node::new(NodeKind::CodeBlock).children([
            text("a"),
            line_break(),
            mark(Mark::Bold, [text("b")]),
        ]);
        let doc = normalize(document([block]));
        assert_eq!(doc.children, vec![code_block("a\nb", None)]);
    }

    #[test]
    fn test_idempotent() {
        let doc = normalize(document([
            text("lead"),
            blockquote([]),
            paragraph([italic([text("a"), img()]), text("b")]),
            ordered_list([paragraph([text("x")])]),
        ]));
        assert_eq!(normalize(doc.clone()), doc);
    }
}
