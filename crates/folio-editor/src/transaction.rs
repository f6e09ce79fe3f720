//! Atomic batches of editing steps.
//!
//! A [`Transaction`] collects steps and applies them with [`Transaction::commit`].
//! Steps run in order against a private draft; the editor only sees the
//! final state, so a commit produces at most one update notification no
//! matter how many steps it carries.

use folio_core::{Length, Mark, MediaAttrs, Node, NodeKind, Properties};
use folio_media::{Alignment, MediaAttrsPatch, MediaCommand, WrapStyle, media_node};
use folio_std::helpers;
use folio_std::prop;

use crate::editor::{Editor, parse_or_empty, start_of};
use crate::flat::{self, AppliedMark, Token};
use crate::selection::Selection;

/// Target type for [`Step::SetBlockType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    /// Levels outside 1-6 are clamped.
    Heading(u8),
    CodeBlock,
}

impl BlockType {
    fn kind_and_props(self) -> (NodeKind, Properties) {
        match self {
            BlockType::Paragraph => (NodeKind::Paragraph, Properties::new()),
            BlockType::Heading(level) => (
                NodeKind::Heading,
                Properties::new().with(prop::LEVEL, i64::from(level.clamp(1, 6))),
            ),
            BlockType::CodeBlock => (NodeKind::CodeBlock, Properties::new()),
        }
    }
}

/// One mutation in a transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Replace the selection with text. `\n` becomes a hard break.
    InsertText(String),
    DeleteSelection,
    /// Backspace: delete the selection, or the token before the caret, or
    /// join with the previous block at a block start.
    DeleteBackward,
    /// Insert a media node at the selection and select it.
    InsertMedia {
        source: String,
        patch: MediaAttrsPatch,
    },
    /// Edit every selected media node.
    Media(MediaCommand),
    /// Replace the whole document by parsing HTML.
    SetContent(String),
    /// Insert an HTML fragment at the selection.
    InsertContent(String),
    /// Insert already-built nodes at the selection.
    InsertNodes(Vec<Node>),
    SetSelection {
        anchor: i64,
        head: i64,
    },
    SetBlockType(BlockType),
    /// Add a mark to the selected text, or remove it if all of it has it.
    /// Links can only be removed this way.
    ToggleMark(Mark),
    SetLink {
        url: String,
        title: Option<String>,
    },
    /// Remove the link from the selection, or from the link around the caret.
    UnsetLink,
    Focus,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::InsertText(_) => "insert_text",
            Step::DeleteSelection => "delete_selection",
            Step::DeleteBackward => "delete_backward",
            Step::InsertMedia { .. } => "insert_media",
            Step::Media(command) => command.name(),
            Step::SetContent(_) => "set_content",
            Step::InsertContent(_) => "insert_content",
            Step::InsertNodes(_) => "insert_nodes",
            Step::SetSelection { .. } => "set_selection",
            Step::SetBlockType(_) => "set_block_type",
            Step::ToggleMark(_) => "toggle_mark",
            Step::SetLink { .. } => "set_link",
            Step::UnsetLink => "unset_link",
            Step::Focus => "focus",
        }
    }
}

/// Outcome of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Applied,
    /// The step had no target (for example a media command with no media
    /// node selected) and did nothing.
    NotApplicable,
}

impl StepResult {
    pub fn is_applied(self) -> bool {
        self == StepResult::Applied
    }

    fn from_bool(applied: bool) -> Self {
        if applied {
            StepResult::Applied
        } else {
            StepResult::NotApplicable
        }
    }
}

/// What a commit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// One result per step, in order.
    pub results: Vec<StepResult>,
    /// Whether the document differs from before the commit.
    pub content_changed: bool,
}

impl CommitOutcome {
    /// `Applied` if any step applied.
    pub fn result(&self) -> StepResult {
        StepResult::from_bool(self.results.iter().any(|r| r.is_applied()))
    }
}

/// A batch of steps against one editor.
#[must_use = "a transaction does nothing until committed"]
pub struct Transaction<'e> {
    editor: &'e mut Editor,
    steps: Vec<Step>,
}

impl<'e> Transaction<'e> {
    pub(crate) fn new(editor: &'e mut Editor) -> Self {
        Self {
            editor,
            steps: Vec::new(),
        }
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn insert_text(self, text: impl Into<String>) -> Self {
        self.step(Step::InsertText(text.into()))
    }

    pub fn delete_selection(self) -> Self {
        self.step(Step::DeleteSelection)
    }

    pub fn delete_backward(self) -> Self {
        self.step(Step::DeleteBackward)
    }

    pub fn insert_media(self, source: impl Into<String>, patch: MediaAttrsPatch) -> Self {
        self.step(Step::InsertMedia {
            source: source.into(),
            patch,
        })
    }

    pub fn set_alignment(self, alignment: Alignment) -> Self {
        self.step(Step::Media(MediaCommand::SetAlignment(alignment)))
    }

    pub fn set_wrap_style(self, wrap_style: WrapStyle) -> Self {
        self.step(Step::Media(MediaCommand::SetWrapStyle(wrap_style)))
    }

    pub fn set_wrap_margin(self, margin: Length) -> Self {
        self.step(Step::Media(MediaCommand::SetWrapMargin(margin)))
    }

    /// A `None` height keeps the current height.
    pub fn set_size(self, width: Length, height: Option<Length>) -> Self {
        self.step(Step::Media(MediaCommand::SetSize { width, height }))
    }

    pub fn clear_size(self) -> Self {
        self.step(Step::Media(MediaCommand::ClearSize))
    }

    pub fn set_content(self, html: impl Into<String>) -> Self {
        self.step(Step::SetContent(html.into()))
    }

    pub fn insert_content(self, html: impl Into<String>) -> Self {
        self.step(Step::InsertContent(html.into()))
    }

    pub fn insert_nodes(self, nodes: Vec<Node>) -> Self {
        self.step(Step::InsertNodes(nodes))
    }

    pub fn set_selection(self, anchor: i64, head: i64) -> Self {
        self.step(Step::SetSelection { anchor, head })
    }

    pub fn set_block_type(self, block: BlockType) -> Self {
        self.step(Step::SetBlockType(block))
    }

    pub fn toggle_mark(self, mark: Mark) -> Self {
        self.step(Step::ToggleMark(mark))
    }

    pub fn set_link(self, url: impl Into<String>, title: Option<String>) -> Self {
        self.step(Step::SetLink {
            url: url.into(),
            title,
        })
    }

    pub fn unset_link(self) -> Self {
        self.step(Step::UnsetLink)
    }

    pub fn focus(self) -> Self {
        self.step(Step::Focus)
    }

    /// Apply every step, then install the result in the editor as one change.
    pub fn commit(self) -> CommitOutcome {
        let Transaction { editor, steps } = self;
        let mut draft = Draft {
            tokens: flat::flatten(&editor.content),
            selection: editor.selection,
            focused: editor.focused,
        };

        let results: Vec<StepResult> = steps
            .iter()
            .map(|step| {
                let result = draft.apply(step);
                tracing::trace!(step = step.name(), ?result, "applied step");
                result
            })
            .collect();

        let content = flat::rebuild(&draft.tokens);
        let content_changed = content != editor.content;
        tracing::debug!(steps = steps.len(), content_changed, "commit");

        editor.focused = draft.focused;
        if content_changed {
            editor.install(content, draft.selection);
        } else {
            editor.selection = draft.selection.clamp_to(draft.tokens.len());
        }

        CommitOutcome {
            results,
            content_changed,
        }
    }
}

/// Working state of a commit in progress.
struct Draft {
    tokens: Vec<Token>,
    selection: Selection,
    focused: bool,
}

impl Draft {
    fn apply(&mut self, step: &Step) -> StepResult {
        let result = match step {
            Step::InsertText(text) => self.insert_text(text),
            Step::DeleteSelection => self.delete_selection(),
            Step::DeleteBackward => self.delete_backward(),
            Step::InsertMedia { source, patch } => self.insert_media(source, patch),
            Step::Media(command) => self.media(command),
            Step::SetContent(html) => self.set_content(html),
            Step::InsertContent(html) => self.insert_nodes(parse_or_empty(html).children),
            Step::InsertNodes(nodes) => self.insert_nodes(nodes.clone()),
            Step::SetSelection { anchor, head } => {
                self.selection = Selection::clamped(*anchor, *head, self.tokens.len());
                StepResult::Applied
            }
            Step::SetBlockType(block) => self.set_block_type(*block),
            Step::ToggleMark(mark) => self.toggle_mark(*mark),
            Step::SetLink { url, title } => self.set_link(url, title.as_deref()),
            Step::UnsetLink => self.unset_link(),
            Step::Focus => {
                self.focused = true;
                StepResult::Applied
            }
        };
        self.settle();
        result
    }

    /// Bring the tokens back to the canonical form of their tree.
    fn settle(&mut self) {
        self.tokens = flat::flatten(&flat::rebuild(&self.tokens));
        self.selection = self.selection.clamp_to(self.tokens.len());
    }

    /// Remove a non-empty selection, leaving the caret at its start.
    fn remove_selection(&mut self) {
        if !self.selection.is_collapsed() {
            let caret = flat::delete_range(&mut self.tokens, self.selection.from(), self.selection.to());
            self.selection = Selection::caret(caret);
        }
    }

    fn insert_text(&mut self, text: &str) -> StepResult {
        if text.is_empty() {
            return StepResult::NotApplicable;
        }
        self.remove_selection();
        let pos = flat::snap_into_textblock(&self.tokens, self.selection.head);
        let marks = flat::marks_at(&self.tokens, pos);
        let items = text
            .chars()
            .filter(|&ch| ch != '\r')
            .map(|ch| match ch {
                '\n' => Token::Leaf {
                    node: helpers::line_break(),
                    marks: marks.clone(),
                },
                ch => Token::Char {
                    ch,
                    marks: marks.clone(),
                },
            })
            .collect();
        let end = flat::insert_inline(&mut self.tokens, pos, items);
        self.selection = Selection::caret(end);
        StepResult::Applied
    }

    fn delete_selection(&mut self) -> StepResult {
        if self.selection.is_collapsed() {
            return StepResult::NotApplicable;
        }
        self.remove_selection();
        StepResult::Applied
    }

    fn delete_backward(&mut self) -> StepResult {
        if !self.selection.is_collapsed() {
            return self.delete_selection();
        }
        let pos = self.selection.head;
        if pos == 0 {
            return StepResult::NotApplicable;
        }

        match &self.tokens[pos - 1] {
            Token::Char { .. } | Token::Leaf { .. } => {
                self.tokens.remove(pos - 1);
                self.selection = Selection::caret(pos - 1);
                StepResult::Applied
            }
            Token::Open { .. } => self.delete_before_block(pos),
            Token::Close => self.delete_into_block(pos),
        }
    }

    /// Backspace at the start of a block: join with the previous text block,
    /// or remove a block leaf standing before it.
    fn delete_before_block(&mut self, pos: usize) -> StepResult {
        let mut k = pos - 1;
        while k > 0 {
            k -= 1;
            match &self.tokens[k] {
                Token::Close if flat::textblock_at(&self.tokens, k).is_some() => {
                    let caret = flat::delete_range(&mut self.tokens, k, pos);
                    self.selection = Selection::caret(caret);
                    return StepResult::Applied;
                }
                token if token.is_block_leaf() => {
                    self.tokens.remove(k);
                    self.selection = Selection::caret(pos - 1);
                    return StepResult::Applied;
                }
                Token::Open { .. } | Token::Close => continue,
                _ => break,
            }
        }
        StepResult::NotApplicable
    }

    /// Backspace with the caret between blocks: delete the last character
    /// of the previous block, or the block itself when it is empty.
    fn delete_into_block(&mut self, pos: usize) -> StepResult {
        let mut k = pos - 1;
        while k > 0 && matches!(self.tokens[k], Token::Close) {
            k -= 1;
        }
        match &self.tokens[k] {
            Token::Char { .. } | Token::Leaf { .. } => {
                self.tokens.remove(k);
                self.selection = Selection::caret(k);
            }
            _ => {
                let caret = flat::delete_range(&mut self.tokens, k, pos);
                self.selection = Selection::caret(caret);
            }
        }
        StepResult::Applied
    }

    fn insert_media(&mut self, source: &str, patch: &MediaAttrsPatch) -> StepResult {
        if source.trim().is_empty() {
            return StepResult::NotApplicable;
        }
        self.remove_selection();
        let node = media_node(source, patch);
        let Some(attrs) = node.as_media().cloned() else {
            return StepResult::NotApplicable;
        };
        let leaf = Token::Leaf {
            node,
            marks: Vec::new(),
        };
        let (start, _) = flat::insert_blocks(&mut self.tokens, self.selection.head, vec![leaf]);
        self.settle();

        let at = locate_media(&self.tokens, start, &attrs).unwrap_or(start);
        self.selection = Selection::new(at, at + 1);
        self.focused = true;
        StepResult::Applied
    }

    fn media(&mut self, command: &MediaCommand) -> StepResult {
        let (from, to) = (self.selection.from(), self.selection.to());
        let mut found = false;
        for token in self.tokens.iter_mut().take(to).skip(from) {
            if let Token::Leaf { node, .. } = token
                && let Some(attrs) = node.as_media_mut()
            {
                command.apply(attrs);
                found = true;
            }
        }
        if found {
            self.focused = true;
        }
        StepResult::from_bool(found)
    }

    fn set_content(&mut self, html: &str) -> StepResult {
        let content = parse_or_empty(html);
        self.tokens = flat::flatten(&content);
        self.selection = Selection::caret(start_of(&self.tokens));
        StepResult::Applied
    }

    fn insert_nodes(&mut self, nodes: Vec<Node>) -> StepResult {
        let fragment = folio_std::normalize(helpers::document(nodes));
        let blocks = &fragment.children;
        if blocks.len() == 1 && blocks[0].kind == NodeKind::Paragraph {
            if blocks[0].children.is_empty() {
                return StepResult::NotApplicable;
            }
            self.remove_selection();
            let items = flat::flatten(&blocks[0]);
            let end = flat::insert_inline(&mut self.tokens, self.selection.head, items);
            self.selection = Selection::caret(end);
        } else {
            self.remove_selection();
            let items = flat::flatten(&fragment);
            let (_, end) = flat::insert_blocks(&mut self.tokens, self.selection.head, items);
            self.selection = Selection::caret(end);
        }
        StepResult::Applied
    }

    /// Text blocks overlapping the selection, by open index.
    fn selected_textblocks(&self) -> Vec<usize> {
        let (from, to) = (self.selection.from(), self.selection.to());
        let end = to.max(from + 1);
        self.tokens
            .iter()
            .enumerate()
            .take(end)
            .filter(|(i, token)| {
                token.opens_textblock() && flat::matching_close(&self.tokens, *i) >= from
            })
            .map(|(i, _)| i)
            .collect()
    }

    fn set_block_type(&mut self, block: BlockType) -> StepResult {
        let targets = self.selected_textblocks();
        if targets.is_empty() {
            return StepResult::NotApplicable;
        }
        let (kind, props) = block.kind_and_props();
        for open in targets {
            let close = flat::matching_close(&self.tokens, open);
            let was_code = matches!(
                &self.tokens[open],
                Token::Open { kind: NodeKind::CodeBlock, .. }
            );
            self.tokens[open] = Token::Open {
                kind: kind.clone(),
                props: props.clone(),
            };
            if was_code && kind != NodeKind::CodeBlock {
                for token in &mut self.tokens[open + 1..close] {
                    if let Token::Char { ch: '\n', .. } = token {
                        *token = Token::Leaf {
                            node: helpers::line_break(),
                            marks: Vec::new(),
                        };
                    }
                }
            }
        }
        StepResult::Applied
    }

    fn toggle_mark(&mut self, mark: Mark) -> StepResult {
        if self.selection.is_collapsed() {
            return StepResult::NotApplicable;
        }
        let targets = flat::markable(&self.tokens, self.selection.from(), self.selection.to());
        if targets.is_empty() {
            return StepResult::NotApplicable;
        }
        let has = |token: &Token| {
            token
                .marks()
                .is_some_and(|marks| marks.iter().any(|m| m.mark == mark))
        };
        let all = targets.iter().all(|&i| has(&self.tokens[i]));

        if mark == Mark::Link && !targets.iter().any(|&i| has(&self.tokens[i])) {
            return StepResult::NotApplicable;
        }
        for i in targets {
            if let Some(marks) = self.tokens[i].marks_mut() {
                if all || mark == Mark::Link {
                    marks.retain(|m| m.mark != mark);
                } else if !marks.iter().any(|m| m.mark == mark) {
                    marks.push(AppliedMark::new(mark));
                    marks.sort_by_key(|m| m.mark);
                }
            }
        }
        StepResult::Applied
    }

    fn set_link(&mut self, url: &str, title: Option<&str>) -> StepResult {
        if url.trim().is_empty() || self.selection.is_collapsed() {
            return StepResult::NotApplicable;
        }
        let targets = flat::markable(&self.tokens, self.selection.from(), self.selection.to());
        if targets.is_empty() {
            return StepResult::NotApplicable;
        }
        let mut props = Properties::new().with(prop::URL, url.trim());
        if let Some(title) = title {
            props.set(prop::TITLE, title);
        }
        let link = AppliedMark {
            mark: Mark::Link,
            props,
        };
        for i in targets {
            if let Some(marks) = self.tokens[i].marks_mut() {
                marks.retain(|m| m.mark != Mark::Link);
                marks.insert(0, link.clone());
            }
        }
        StepResult::Applied
    }

    fn unset_link(&mut self) -> StepResult {
        let (from, to) = if self.selection.is_collapsed() {
            match flat::link_run(&self.tokens, self.selection.head) {
                Some(run) => run,
                None => return StepResult::NotApplicable,
            }
        } else {
            (self.selection.from(), self.selection.to())
        };
        let mut removed = false;
        for i in flat::markable(&self.tokens, from, to) {
            if let Some(marks) = self.tokens[i].marks_mut() {
                let before = marks.len();
                marks.retain(|m| m.mark != Mark::Link);
                removed |= marks.len() != before;
            }
        }
        StepResult::from_bool(removed)
    }
}

/// Find the media leaf just inserted near `start`.
fn locate_media(tokens: &[Token], start: usize, attrs: &MediaAttrs) -> Option<usize> {
    if tokens.get(start).and_then(Token::as_media) == Some(attrs) {
        return Some(start);
    }
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.as_media() == Some(attrs))
        .min_by_key(|(i, _)| i.abs_diff(start))
        .map(|(i, _)| i)
}
