//! The flat token view of a content tree.
//!
//! Positions address the gaps between tokens: position `p` sits before token
//! `p`. The root is not tokenized. Every non-leaf node contributes an open and
//! a close token, every character one token, every leaf node one token; marks
//! ride on the characters they cover and take no positions.
//!
//! Edits splice token vectors and then [`rebuild`] a normalized tree, which
//! tolerates the unbalanced sequences splicing produces.

use folio_core::{Mark, Node, NodeKind, Properties};
use folio_std::normalize;
use folio_std::schema::{is_inline, is_leaf, is_textblock};

/// A mark applied to one character, with its attributes (links carry a url).
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedMark {
    pub mark: Mark,
    pub props: Properties,
}

impl AppliedMark {
    pub fn new(mark: Mark) -> Self {
        Self {
            mark,
            props: Properties::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Open { kind: NodeKind, props: Properties },
    Close,
    Char { ch: char, marks: Vec<AppliedMark> },
    /// A childless node. Only inline leaves carry marks.
    Leaf { node: Node, marks: Vec<AppliedMark> },
}

impl Token {
    pub fn is_inline(&self) -> bool {
        match self {
            Token::Char { .. } => true,
            Token::Leaf { node, .. } => is_inline(&node.kind),
            Token::Open { .. } | Token::Close => false,
        }
    }

    pub fn is_block_leaf(&self) -> bool {
        matches!(self, Token::Leaf { node, .. } if !is_inline(&node.kind))
    }

    pub fn opens_textblock(&self) -> bool {
        matches!(self, Token::Open { kind, .. } if is_textblock(kind))
    }

    pub fn as_media(&self) -> Option<&folio_core::MediaAttrs> {
        match self {
            Token::Leaf { node, .. } => node.as_media(),
            _ => None,
        }
    }

    pub fn marks(&self) -> Option<&[AppliedMark]> {
        match self {
            Token::Char { marks, .. } => Some(marks.as_slice()),
            Token::Leaf { node, marks } if is_inline(&node.kind) => Some(marks.as_slice()),
            _ => None,
        }
    }

    pub fn marks_mut(&mut self) -> Option<&mut Vec<AppliedMark>> {
        match self {
            Token::Char { marks, .. } => Some(marks),
            Token::Leaf { node, marks } if is_inline(&node.kind) => Some(marks),
            _ => None,
        }
    }
}

pub(crate) fn flatten(root: &Node) -> Vec<Token> {
    let mut out = Vec::new();
    let mut marks = Vec::new();
    for child in &root.children {
        flatten_into(child, &mut marks, &mut out);
    }
    out
}

fn flatten_into(node: &Node, marks: &mut Vec<AppliedMark>, out: &mut Vec<Token>) {
    match &node.kind {
        NodeKind::Text => {
            let text = node.text_content().unwrap_or_default();
            out.extend(text.chars().map(|ch| Token::Char {
                ch,
                marks: marks.clone(),
            }));
        }
        NodeKind::Mark(mark) => {
            // An inner repeat of an active mark adds nothing.
            let pushed = !marks.iter().any(|m| m.mark == *mark);
            if pushed {
                marks.push(AppliedMark {
                    mark: *mark,
                    props: node.props.clone(),
                });
                marks.sort_by_key(|m| m.mark);
            }
            for child in &node.children {
                flatten_into(child, marks, out);
            }
            if pushed {
                marks.retain(|m| m.mark != *mark);
            }
        }
        kind if is_leaf(kind) => out.push(Token::Leaf {
            node: Node {
                kind: kind.clone(),
                props: node.props.clone(),
                children: Vec::new(),
            },
            marks: if is_inline(kind) {
                marks.clone()
            } else {
                Vec::new()
            },
        }),
        kind => {
            out.push(Token::Open {
                kind: kind.clone(),
                props: node.props.clone(),
            });
            for child in &node.children {
                flatten_into(child, marks, out);
            }
            out.push(Token::Close);
        }
    }
}

enum Inline {
    Char(char),
    Leaf(Node),
}

struct Frame {
    kind: NodeKind,
    props: Properties,
    children: Vec<Node>,
    inline: Vec<(Inline, Vec<AppliedMark>)>,
    /// Opens seen inside this text block; their content joins it.
    merged: usize,
    /// Opened by the builder around stray inline content.
    implicit: bool,
    /// Second half of a text block split by a block leaf; dropped if empty.
    split: bool,
}

impl Frame {
    fn new(kind: NodeKind, props: Properties) -> Self {
        Self {
            kind,
            props,
            children: Vec::new(),
            inline: Vec::new(),
            merged: 0,
            implicit: false,
            split: false,
        }
    }

    fn is_textblock(&self) -> bool {
        is_textblock(&self.kind)
    }

    fn finish(self) -> Node {
        let children = if self.is_textblock() {
            build_inline(&self.inline, 0)
        } else {
            self.children
        };
        Node {
            kind: self.kind,
            props: self.props,
            children,
        }
    }
}

struct Builder {
    root: Frame,
    open: Vec<Frame>,
}

impl Builder {
    fn top(&mut self) -> &mut Frame {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    fn close_top(&mut self) {
        if let Some(frame) = self.open.pop() {
            if frame.split && frame.inline.is_empty() {
                return;
            }
            let node = frame.finish();
            self.top().children.push(node);
        }
    }
}

/// Build a normalized content root from a (possibly unbalanced) token run.
///
/// Stray closes are ignored and unclosed nodes are closed at the end. Inline
/// content outside a text block gets a paragraph; a block leaf inside a text
/// block splits it; a block opened inside a text block is joined into it.
pub(crate) fn rebuild(tokens: &[Token]) -> Node {
    let mut b = Builder {
        root: Frame::new(NodeKind::Document, Properties::new()),
        open: Vec::new(),
    };

    for token in tokens {
        if !token.is_inline() && b.top().implicit {
            b.close_top();
        }
        match token {
            Token::Open { kind, props } => {
                let top = b.top();
                if top.is_textblock() {
                    top.merged += 1;
                } else {
                    b.open.push(Frame::new(kind.clone(), props.clone()));
                }
            }
            Token::Close => {
                let top = b.top();
                if top.merged > 0 {
                    top.merged -= 1;
                } else {
                    b.close_top();
                }
            }
            Token::Char { ch, marks } => push_inline(&mut b, Inline::Char(*ch), marks),
            Token::Leaf { node, marks } if is_inline(&node.kind) => {
                push_inline(&mut b, Inline::Leaf(node.clone()), marks)
            }
            Token::Leaf { node, .. } => {
                let top = b.top();
                if top.is_textblock() {
                    let (kind, props, merged) = (top.kind.clone(), top.props.clone(), top.merged);
                    top.split = true;
                    b.close_top();
                    b.top().children.push(node.clone());
                    let mut rest = Frame::new(kind, props);
                    rest.merged = merged;
                    rest.split = true;
                    b.open.push(rest);
                } else {
                    top.children.push(node.clone());
                }
            }
        }
    }

    while !b.open.is_empty() {
        b.close_top();
    }
    normalize(b.root.finish())
}

fn push_inline(b: &mut Builder, item: Inline, marks: &[AppliedMark]) {
    if !b.top().is_textblock() {
        let mut frame = Frame::new(NodeKind::Paragraph, Properties::new());
        frame.implicit = true;
        b.open.push(frame);
    }
    b.top().inline.push((item, marks.to_vec()));
}

/// Group a run of marked items into nested mark wrappers, outermost mark
/// first. Marks are kept in canonical order, so nesting is canonical too.
fn build_inline(items: &[(Inline, Vec<AppliedMark>)], depth: usize) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::new();
    let mut i = 0;
    while i < items.len() {
        let (item, marks) = &items[i];
        let Some(mark) = marks.get(depth) else {
            match item {
                Inline::Char(ch) => {
                    if let Some(last) = out.last_mut()
                        && last.kind == NodeKind::Text
                    {
                        let mut text = last.text_content().unwrap_or_default().to_string();
                        text.push(*ch);
                        last.props.set(folio_core::TEXT_CONTENT, text);
                    } else {
                        out.push(Node::text(ch.to_string()));
                    }
                }
                Inline::Leaf(node) => out.push(node.clone()),
            }
            i += 1;
            continue;
        };

        let mut j = i + 1;
        while j < items.len() && items[j].1.get(depth) == Some(mark) {
            j += 1;
        }
        let mut wrapper = Node::new(NodeKind::Mark(mark.mark));
        wrapper.props = mark.props.clone();
        wrapper.children = build_inline(&items[i..j], depth + 1);
        out.push(wrapper);
        i = j;
    }
    out
}

/// Partner index of every open and close token.
fn pairs(tokens: &[Token]) -> Vec<Option<usize>> {
    let mut out = vec![None; tokens.len()];
    let mut stack = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Open { .. } => stack.push(i),
            Token::Close => {
                if let Some(open) = stack.pop() {
                    out[open] = Some(i);
                    out[i] = Some(open);
                }
            }
            _ => {}
        }
    }
    out
}

/// Indices of the open tokens of the nodes enclosing `pos`, outermost first.
pub(crate) fn ancestors(tokens: &[Token], pos: usize) -> Vec<usize> {
    let mut stack = Vec::new();
    for (i, token) in tokens.iter().enumerate().take(pos) {
        match token {
            Token::Open { .. } => stack.push(i),
            Token::Close => {
                stack.pop();
            }
            _ => {}
        }
    }
    stack
}

/// The open token of the text block containing `pos`.
pub(crate) fn textblock_at(tokens: &[Token], pos: usize) -> Option<usize> {
    ancestors(tokens, pos)
        .last()
        .copied()
        .filter(|&i| tokens[i].opens_textblock())
}

pub(crate) fn matching_close(tokens: &[Token], open: usize) -> usize {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::Open { .. } => depth += 1,
            Token::Close => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    tokens.len()
}

/// Move a block-level position into an adjacent text block: the start of
/// the following one, else the end of the preceding one.
pub(crate) fn snap_into_textblock(tokens: &[Token], pos: usize) -> usize {
    let pos = pos.min(tokens.len());
    if textblock_at(tokens, pos).is_some() {
        return pos;
    }
    if tokens.get(pos).is_some_and(Token::opens_textblock) {
        return pos + 1;
    }
    if pos > 0
        && matches!(tokens.get(pos - 1), Some(Token::Close))
        && textblock_at(tokens, pos - 1).is_some()
    {
        return pos - 1;
    }
    pos
}

/// Delete `[from, to)` and return where `from` ended up.
///
/// Nodes wholly inside the range go. Nodes cut by either bound stay, and when
/// both bounds sit in different text blocks the remainder of the second is
/// joined onto the first. Containers emptied by the deletion are removed,
/// which can shift `from` left.
pub(crate) fn delete_range(tokens: &mut Vec<Token>, from: usize, to: usize) -> usize {
    let to = to.min(tokens.len());
    if from >= to {
        return from.min(tokens.len());
    }
    let pairs = pairs(tokens);
    let join = match (textblock_at(tokens, from), textblock_at(tokens, to)) {
        (Some(a), Some(b)) if a != b => Some(b),
        _ => None,
    };

    let mut result: Vec<Token> = tokens[..from].to_vec();
    let mut resume = to;
    if let Some(open) = join {
        let close = pairs[open].unwrap_or(tokens.len());
        result.extend(tokens[to..close].iter().cloned());
        resume = (close + 1).min(tokens.len());
    }
    for i in from..to {
        let straddles = match tokens[i] {
            Token::Open { .. } | Token::Close => {
                pairs[i].is_none_or(|partner| partner < from || partner >= to)
            }
            _ => false,
        };
        if straddles && Some(i) != join {
            result.push(tokens[i].clone());
        }
    }
    result.extend(tokens[resume..].iter().cloned());

    let caret = prune_empty_containers(&mut result, from);
    *tokens = result;
    caret
}

/// Remove containers (lists, items, quotes) left with nothing inside,
/// carrying `caret` along.
fn prune_empty_containers(tokens: &mut Vec<Token>, mut caret: usize) -> usize {
    loop {
        let found = tokens.windows(2).position(|w| {
            matches!(&w[0], Token::Open { .. })
                && !w[0].opens_textblock()
                && matches!(w[1], Token::Close)
        });
        match found {
            Some(i) => {
                tokens.drain(i..i + 2);
                if caret > i {
                    caret -= (caret - i).min(2);
                }
            }
            None => break,
        }
    }
    caret.min(tokens.len())
}

/// Insert inline tokens at `pos`, opening a paragraph if `pos` is not in a
/// text block. Returns the position just after the inserted content.
pub(crate) fn insert_inline(tokens: &mut Vec<Token>, pos: usize, items: Vec<Token>) -> usize {
    let pos = snap_into_textblock(tokens, pos.min(tokens.len()));
    let len = items.len();
    if textblock_at(tokens, pos).is_some() {
        tokens.splice(pos..pos, items);
        pos + len
    } else {
        let mut wrapped = Vec::with_capacity(len + 2);
        wrapped.push(Token::Open {
            kind: NodeKind::Paragraph,
            props: Properties::new(),
        });
        wrapped.extend(items);
        wrapped.push(Token::Close);
        tokens.splice(pos..pos, wrapped);
        pos + 1 + len
    }
}

/// Insert whole blocks at `pos`. A text block at `pos` is replaced when
/// empty, left intact when `pos` is at either of its edges, and split
/// otherwise. Returns the first index of the inserted blocks and the
/// position just after them.
pub(crate) fn insert_blocks(tokens: &mut Vec<Token>, pos: usize, blocks: Vec<Token>) -> (usize, usize) {
    let pos = pos.min(tokens.len());
    let len = blocks.len();
    let Some(open) = textblock_at(tokens, pos) else {
        tokens.splice(pos..pos, blocks);
        return (pos, pos + len);
    };
    let close = matching_close(tokens, open);

    if close == open + 1 {
        tokens.splice(open..=close, blocks);
        (open, open + len)
    } else if pos == open + 1 {
        tokens.splice(open..open, blocks);
        (open, open + len)
    } else if pos == close {
        tokens.splice(close + 1..close + 1, blocks);
        (close + 1, close + 1 + len)
    } else {
        let reopen = match &tokens[open] {
            Token::Open { kind, props } => Token::Open {
                kind: kind.clone(),
                props: props.clone(),
            },
            _ => Token::Open {
                kind: NodeKind::Paragraph,
                props: Properties::new(),
            },
        };
        let mut split = Vec::with_capacity(len + 2);
        split.push(Token::Close);
        split.extend(blocks);
        split.push(reopen);
        tokens.splice(pos..pos, split);
        (pos + 1, pos + 2 + len)
    }
}

/// Marks a character typed at `pos` inherits.
pub(crate) fn marks_at(tokens: &[Token], pos: usize) -> Vec<AppliedMark> {
    let before = pos.checked_sub(1).and_then(|i| tokens.get(i));
    before
        .and_then(Token::marks)
        .or_else(|| tokens.get(pos).and_then(Token::marks))
        .map(<[AppliedMark]>::to_vec)
        .unwrap_or_default()
}

/// Indices of the inline tokens in `[from, to)` that can carry marks.
/// Code block content never does.
pub(crate) fn markable(tokens: &[Token], from: usize, to: usize) -> Vec<usize> {
    let mut in_code = false;
    let mut out = Vec::new();
    for (i, token) in tokens.iter().enumerate().take(to) {
        match token {
            Token::Open { kind, .. } => in_code = *kind == NodeKind::CodeBlock,
            Token::Close => in_code = false,
            _ if i >= from && !in_code && token.is_inline() => out.push(i),
            _ => {}
        }
    }
    out
}

fn link_of(token: &Token) -> Option<&AppliedMark> {
    token.marks()?.iter().find(|m| m.mark == Mark::Link)
}

/// The extent of the link around a caret at `pos`.
pub(crate) fn link_run(tokens: &[Token], pos: usize) -> Option<(usize, usize)> {
    let anchor = pos
        .checked_sub(1)
        .filter(|&i| tokens.get(i).and_then(link_of).is_some())
        .or_else(|| tokens.get(pos).and_then(link_of).is_some().then_some(pos))?;
    let link = link_of(&tokens[anchor])?;
    let same = |i: usize| tokens.get(i).and_then(link_of) == Some(link);

    let mut start = anchor;
    while start > 0 && same(start - 1) {
        start -= 1;
    }
    let mut end = anchor + 1;
    while same(end) {
        end += 1;
    }
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::MediaAttrs;
    use folio_std::helpers::*;

    fn chars(s: &str) -> Vec<Token> {
        s.chars()
            .map(|ch| Token::Char {
                ch,
                marks: Vec::new(),
            })
            .collect()
    }

    fn img() -> Node {
        media(MediaAttrs::new("a.png"))
    }

    fn roundtrip(root: &Node) -> Node {
        rebuild(&flatten(root))
    }

    #[test]
    fn test_positions() {
        let root = document([paragraph([text("ab")]), img(), paragraph([])]);
        let tokens = flatten(&root);
        // <p> a b </p> <img> <p> </p>
        assert_eq!(tokens.len(), 7);
        assert!(tokens[0].opens_textblock());
        assert!(tokens[4].is_block_leaf());
        assert_eq!(textblock_at(&tokens, 1), Some(0));
        assert_eq!(textblock_at(&tokens, 3), Some(0));
        assert_eq!(textblock_at(&tokens, 4), None);
        assert_eq!(textblock_at(&tokens, 6), Some(5));
    }

    #[test]
    fn test_marks_take_no_positions() {
        let root = document([paragraph([text("a"), bold([italic([text("bc")])])])]);
        let tokens = flatten(&root);
        assert_eq!(tokens.len(), 5);
        let marks = tokens[2].marks().unwrap();
        assert_eq!(
            marks.iter().map(|m| m.mark).collect::<Vec<_>>(),
            vec![Mark::Bold, Mark::Italic]
        );
    }

    #[test]
    fn test_rebuild_roundtrip() {
        let root = document([
            heading(2, [text("Title")]),
            paragraph([
                text("a "),
                link("https://x", [bold([text("b")])]),
                line_break(),
                italic([text("c")]),
            ]),
            img(),
            bullet_list([list_item([paragraph([text("item")])])]),
            blockquote([paragraph([text("q")])]),
            code_block("x = 1", Some("py")),
        ]);
        assert_eq!(roundtrip(&root), root);
    }

    #[test]
    fn test_rebuild_canonical_mark_nesting() {
        let root = document([paragraph([italic([bold([text("x")])])])]);
        assert_eq!(
            roundtrip(&root),
            document([paragraph([bold([italic([text("x")])])])])
        );
    }

    #[test]
    fn test_rebuild_recovers_unbalanced() {
        let mut tokens = vec![Token::Close];
        tokens.extend(chars("hi"));
        tokens.push(Token::Open {
            kind: NodeKind::Blockquote,
            props: Properties::new(),
        });
        assert_eq!(
            rebuild(&tokens),
            document([paragraph([text("hi")]), blockquote([paragraph([])])])
        );
    }

    #[test]
    fn test_block_leaf_splits_textblock() {
        let mut tokens = flatten(&document([paragraph([text("ab")])]));
        tokens.insert(2, Token::Leaf {
            node: img(),
            marks: Vec::new(),
        });
        assert_eq!(
            rebuild(&tokens),
            document([paragraph([text("a")]), img(), paragraph([text("b")])])
        );
    }

    #[test]
    fn test_delete_within_block() {
        let mut tokens = flatten(&document([paragraph([text("hello")])]));
        delete_range(&mut tokens, 2, 5);
        assert_eq!(rebuild(&tokens), document([paragraph([text("ho")])]));
    }

    #[test]
    fn test_delete_joins_blocks() {
        let mut tokens = flatten(&document([
            heading(1, [text("abc")]),
            img(),
            paragraph([text("def")]),
        ]));
        // from after "a" to after "d"
        delete_range(&mut tokens, 2, 8);
        assert_eq!(rebuild(&tokens), document([heading(1, [text("aef")])]));
    }

    #[test]
    fn test_delete_into_list_prunes_empty_containers() {
        let mut tokens = flatten(&document([
            paragraph([text("ab")]),
            bullet_list([list_item([paragraph([text("cd")])])]),
            paragraph([text("z")]),
        ]));
        // from after "a" (2) to after "c" (8)
        assert_eq!(delete_range(&mut tokens, 2, 8), 2);
        assert_eq!(
            rebuild(&tokens),
            document([paragraph([text("ad")]), paragraph([text("z")])])
        );
    }

    #[test]
    fn test_delete_moves_caret_past_pruned_containers() {
        let mut tokens = flatten(&document([
            bullet_list([list_item([paragraph([text("x")])])]),
            paragraph([text("y")]),
        ]));
        // from inside the list (1) to just after it (6)
        assert_eq!(delete_range(&mut tokens, 1, 6), 0);
        assert_eq!(rebuild(&tokens), document([paragraph([text("y")])]));
    }

    #[test]
    fn test_snap_clamps_past_end() {
        let tokens = flatten(&document([paragraph([text("a")])]));
        assert_eq!(snap_into_textblock(&tokens, 10), 2);
        assert_eq!(snap_into_textblock(&[], 3), 0);
    }

    #[test]
    fn test_delete_everything() {
        let mut tokens = flatten(&document([paragraph([text("a")]), img()]));
        let len = tokens.len();
        delete_range(&mut tokens, 0, len);
        assert!(tokens.is_empty());
        assert_eq!(rebuild(&tokens), document([paragraph([])]));
    }

    #[test]
    fn test_insert_blocks_cases() {
        let leaf = || {
            vec![Token::Leaf {
                node: img(),
                marks: Vec::new(),
            }]
        };

        let mut empty = flatten(&document([paragraph([])]));
        assert_eq!(insert_blocks(&mut empty, 1, leaf()), (0, 1));
        assert_eq!(rebuild(&empty), document([img()]));

        let mut at_start = flatten(&document([paragraph([text("ab")])]));
        assert_eq!(insert_blocks(&mut at_start, 1, leaf()), (0, 1));
        assert_eq!(rebuild(&at_start), document([img(), paragraph([text("ab")])]));

        let mut at_end = flatten(&document([paragraph([text("ab")])]));
        assert_eq!(insert_blocks(&mut at_end, 3, leaf()), (4, 5));
        assert_eq!(rebuild(&at_end), document([paragraph([text("ab")]), img()]));

        let mut middle = flatten(&document([paragraph([text("ab")])]));
        assert_eq!(insert_blocks(&mut middle, 2, leaf()), (3, 5));
        assert!(middle[3].is_block_leaf());
        assert_eq!(
            rebuild(&middle),
            document([paragraph([text("a")]), img(), paragraph([text("b")])])
        );
    }

    #[test]
    fn test_insert_inline_snaps_into_textblock() {
        let mut tokens = flatten(&document([paragraph([text("a")])]));
        assert_eq!(insert_inline(&mut tokens, 0, chars("x")), 2);
        assert_eq!(rebuild(&tokens), document([paragraph([text("xa")])]));

        let mut tokens = flatten(&document([img()]));
        assert_eq!(insert_inline(&mut tokens, 1, chars("y")), 3);
        assert_eq!(rebuild(&tokens), document([img(), paragraph([text("y")])]));
    }

    #[test]
    fn test_marks_at_prefers_preceding_char() {
        let tokens = flatten(&document([paragraph([bold([text("a")]), text("b")])]));
        assert_eq!(marks_at(&tokens, 2).len(), 1);
        assert!(marks_at(&tokens, 3).is_empty());
        assert_eq!(marks_at(&tokens, 1)[0].mark, Mark::Bold);
    }

    #[test]
    fn test_markable_skips_code_blocks() {
        let tokens = flatten(&document([
            paragraph([text("ab")]),
            code_block("cd", None),
            media(MediaAttrs::new("x.png")),
        ]));
        let len = tokens.len();
        assert_eq!(markable(&tokens, 0, len), vec![1, 2]);
        assert_eq!(markable(&tokens, 2, len), vec![2]);
    }

    #[test]
    fn test_link_run_around_caret() {
        let tokens = flatten(&document([paragraph([
            text("a"),
            link("https://x", [text("bc")]),
            text("d"),
        ])]));
        assert_eq!(link_run(&tokens, 3), Some((2, 4)));
        assert_eq!(link_run(&tokens, 2), Some((2, 4)));
        assert_eq!(link_run(&tokens, 1), None);
        assert_eq!(link_run(&tokens, 5), None);
    }
}
