//! The editing session.

use folio_core::{Document, Length, MediaAttrs, Node, NodeKind, Properties, Resource};
use folio_media::{Alignment, MediaAttrsPatch, WrapStyle, to_data_uri};
use folio_std::helpers;
use folio_std::schema::{Target, resolve, spec_of};
use folio_transforms::{WordLimit, count_node_words, count_words};

use crate::config::EditorConfig;
use crate::events::{LimitWarning, Update};
use crate::flat::{self, Token};
use crate::selection::Selection;
use crate::sync::{SyncCell, SyncState};
use crate::transaction::{CommitOutcome, Step, StepResult, Transaction};

type UpdateListener = Box<dyn FnMut(&Update)>;
type WarningListener = Box<dyn FnMut(&LimitWarning)>;

/// One editing session over one document.
///
/// All mutation goes through [`Editor::transaction`] (the convenience
/// methods below each build and commit a one-step transaction). Every commit
/// that changes the document recounts words, enforces the word limit and
/// notifies update listeners exactly once.
pub struct Editor {
    pub(crate) content: Node,
    pub(crate) selection: Selection,
    pub(crate) focused: bool,
    config: EditorConfig,
    word_count: usize,
    sync: SyncCell,
    update_listeners: Vec<UpdateListener>,
    warning_listeners: Vec<WarningListener>,
}

impl Editor {
    /// Start a session from `config.initial_content`.
    ///
    /// Initial content is loaded as is: the word limit applies from the
    /// first edit on.
    pub fn new(config: EditorConfig) -> Self {
        let content = parse_or_empty(&config.initial_content);
        let word_count = count_node_words(&content);
        let selection = Selection::caret(start_of(&flat::flatten(&content)));
        tracing::debug!(word_count, "editor created");
        Self {
            content,
            selection,
            focused: false,
            config,
            word_count,
            sync: SyncCell::default(),
            update_listeners: Vec::new(),
            warning_listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Serialize the document to HTML.
    pub fn get_content(&self) -> String {
        folio_write_html::to_html(&self.content)
    }

    /// Replace the document. Unparseable markup yields an empty paragraph.
    pub fn set_content(&mut self, html: &str) -> CommitOutcome {
        self.transaction().set_content(html).commit()
    }

    /// The content tree (a document root).
    pub fn content(&self) -> &Node {
        &self.content
    }

    pub fn document(&self) -> Document {
        Document::new().with_content(self.content.clone())
    }

    /// The plain-text projection words are counted on.
    pub fn text(&self) -> String {
        folio_write_plaintext::to_plain_text(&self.content)
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn word_limit(&self) -> Option<usize> {
        self.config.word_limit
    }

    pub fn placeholder(&self) -> &str {
        &self.config.placeholder_text
    }

    /// True when the document is a single empty paragraph.
    pub fn is_empty(&self) -> bool {
        matches!(
            self.content.children.as_slice(),
            [only] if only.kind == NodeKind::Paragraph && only.children.is_empty()
        )
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Select `[from, to]`, clamping both bounds into the document.
    pub fn set_selection(&mut self, from: i64, to: i64) {
        self.transaction().set_selection(from, to).commit();
    }

    /// Number of positions in the document.
    pub fn document_size(&self) -> usize {
        flat::flatten(&self.content).len()
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync.get()
    }

    pub fn transaction(&mut self) -> Transaction<'_> {
        Transaction::new(self)
    }

    /// Whether a node type or mark applies to the selection.
    ///
    /// Node types match when the selection starts inside such a node or
    /// selects one; marks match when every selected character carries the
    /// mark, or for a caret, when the character before it does. `filter`
    /// entries must all be present in the node's (or mark's) attributes.
    pub fn is_active(&self, name: &str, filter: Option<&Properties>) -> bool {
        let empty = Properties::new();
        let filter = filter.unwrap_or(&empty);
        let tokens = flat::flatten(&self.content);
        match resolve(name) {
            Some(Target::Node(spec)) => self
                .nodes_at_selection(&tokens)
                .into_iter()
                .any(|(kind, props)| spec_of(&kind).name == spec.name && props.matches(filter)),
            Some(Target::Mark(mark)) => {
                let (from, to) = (self.selection.from(), self.selection.to());
                let has = |marks: &[flat::AppliedMark]| {
                    marks
                        .iter()
                        .any(|m| m.mark == mark && m.props.matches(filter))
                };
                if from == to {
                    return has(flat::marks_at(&tokens, from).as_slice());
                }
                let targets = flat::markable(&tokens, from, to);
                !targets.is_empty()
                    && targets
                        .iter()
                        .all(|&i| tokens[i].marks().is_some_and(|marks| has(marks)))
            }
            None => false,
        }
    }

    /// Attributes of the selected node of type `name`, or the type's
    /// defaults when none is selected. For a mark, the attributes it carries
    /// at the selection start (empty if absent).
    pub fn get_attributes(&self, name: &str) -> Properties {
        let tokens = flat::flatten(&self.content);
        match resolve(name) {
            Some(Target::Node(spec)) => self
                .nodes_at_selection(&tokens)
                .into_iter()
                .find(|(kind, _)| spec_of(kind).name == spec.name)
                .map(|(_, props)| props)
                .unwrap_or_else(spec.default_attrs),
            Some(Target::Mark(mark)) => {
                let from = self.selection.from();
                let marks = if self.selection.is_collapsed() {
                    flat::marks_at(&tokens, from)
                } else {
                    flat::markable(&tokens, from, self.selection.to())
                        .first()
                        .and_then(|&i| tokens[i].marks())
                        .map(<[flat::AppliedMark]>::to_vec)
                        .unwrap_or_default()
                };
                marks
                    .into_iter()
                    .find(|m| m.mark == mark)
                    .map(|m| m.props)
                    .unwrap_or_default()
            }
            None => Properties::new(),
        }
    }

    /// Nodes the selection is in or selects, innermost first, with their
    /// attributes (media attributes in their property view).
    fn nodes_at_selection(&self, tokens: &[Token]) -> Vec<(NodeKind, Properties)> {
        let (from, to) = (self.selection.from(), self.selection.to());
        let mut out = Vec::new();
        for token in tokens.iter().take(to).skip(from) {
            if let Token::Leaf { node, .. } = token {
                let props = node
                    .as_media()
                    .map_or_else(|| node.props.clone(), MediaAttrs::to_props);
                out.push((node.kind.clone(), props));
            }
        }
        for &open in flat::ancestors(tokens, from).iter().rev() {
            if let Token::Open { kind, props } = &tokens[open] {
                out.push((kind.clone(), props.clone()));
            }
        }
        out
    }

    /// Attributes of the first selected media node.
    pub fn selected_media(&self) -> Option<MediaAttrs> {
        let (from, to) = (self.selection.from(), self.selection.to());
        flat::flatten(&self.content)
            .iter()
            .take(to)
            .skip(from)
            .find_map(Token::as_media)
            .cloned()
    }

    pub fn insert_text(&mut self, text: &str) -> StepResult {
        self.transaction().insert_text(text).commit().result()
    }

    pub fn delete_backward(&mut self) -> StepResult {
        self.transaction().delete_backward().commit().result()
    }

    /// Insert a media node at the selection and select it.
    pub fn insert_media(&mut self, source: &str, patch: MediaAttrsPatch) -> StepResult {
        self.transaction().insert_media(source, patch).commit().result()
    }

    /// Insert raw image bytes as a self-contained data URI.
    pub fn insert_media_bytes(&mut self, resource: &Resource, patch: MediaAttrsPatch) -> StepResult {
        tracing::debug!(
            mime = %resource.mime_type,
            bytes = resource.data.len(),
            "embedding image bytes"
        );
        self.insert_media(&to_data_uri(resource), patch)
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> StepResult {
        self.transaction().set_alignment(alignment).commit().result()
    }

    pub fn set_wrap_style(&mut self, wrap_style: WrapStyle) -> StepResult {
        self.transaction().set_wrap_style(wrap_style).commit().result()
    }

    pub fn set_wrap_margin(&mut self, margin: Length) -> StepResult {
        self.transaction().set_wrap_margin(margin).commit().result()
    }

    /// A `None` height leaves the current height untouched.
    pub fn set_size(&mut self, width: Length, height: Option<Length>) -> StepResult {
        self.transaction().set_size(width, height).commit().result()
    }

    pub fn clear_size(&mut self) -> StepResult {
        self.transaction().clear_size().commit().result()
    }

    /// Paste an HTML fragment at the selection, unless it would take the
    /// document over the word limit.
    pub fn paste_html(&mut self, html: &str) -> StepResult {
        let fragment = parse_or_empty(html);
        let words = count_node_words(&fragment);
        self.paste(words, fragment.children)
    }

    /// Paste plain text. Blank lines separate paragraphs; single newlines
    /// become hard breaks.
    pub fn paste_text(&mut self, text: &str) -> StepResult {
        let words = count_words(text);
        self.paste(words, text_blocks(text))
    }

    fn paste(&mut self, words: usize, nodes: Vec<Node>) -> StepResult {
        if let Some(limit) = self.config.word_limit
            && self.word_count + words > limit
        {
            let remaining = limit.saturating_sub(self.word_count);
            tracing::warn!(
                limit,
                current = self.word_count,
                pasted = words,
                "paste rejected by word limit"
            );
            self.emit_warning(LimitWarning::PasteRejected { limit, remaining });
            return StepResult::NotApplicable;
        }
        self.transaction().step(Step::InsertNodes(nodes)).commit().result()
    }

    pub fn focus(&mut self) {
        self.transaction().focus().commit();
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Call `listener` after every commit that changes the document.
    pub fn on_update(&mut self, listener: impl FnMut(&Update) + 'static) {
        self.update_listeners.push(Box::new(listener));
    }

    /// Call `listener` when the word limit truncates content or rejects a paste.
    pub fn on_warning(&mut self, listener: impl FnMut(&LimitWarning) + 'static) {
        self.warning_listeners.push(Box::new(listener));
    }

    /// Replace the document with content pushed by the host.
    ///
    /// Nothing happens when `html` is what [`Editor::get_content`] already
    /// returns. Otherwise the document is replaced without notifying update
    /// listeners and without applying the word limit. Returns whether the
    /// document changed.
    pub fn sync_external_content(&mut self, html: &str) -> bool {
        if html == self.get_content() {
            return false;
        }
        let _guard = self.sync.enter_external();
        tracing::debug!(bytes = html.len(), "applying external content");
        self.transaction().set_content(html).commit().content_changed
    }

    /// Install committed content: recount, enforce the limit, notify.
    pub(crate) fn install(&mut self, content: Node, selection: Selection) {
        self.content = content;
        self.selection = selection.clamp_to(self.document_size());
        self.word_count = count_node_words(&self.content);

        let mut warnings = Vec::new();
        if self.sync.get() == SyncState::Idle
            && let Some(limit) = self.config.word_limit
            && let Some(truncated) = WordLimit::new(limit).apply(&self.content)
        {
            tracing::warn!(limit, words = self.word_count, "content truncated to word limit");
            self.content = truncated;
            self.word_count = count_node_words(&self.content);
            self.selection = self.selection.clamp_to(self.document_size());
            warnings.push(LimitWarning::Truncated { limit });
        }

        if self.sync.get() == SyncState::Idle {
            let update = Update {
                html: self.get_content(),
                word_count: self.word_count,
            };
            for listener in &mut self.update_listeners {
                listener(&update);
            }
        }
        for warning in warnings {
            self.emit_warning(warning);
        }
    }

    fn emit_warning(&mut self, warning: LimitWarning) {
        for listener in &mut self.warning_listeners {
            listener(&warning);
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("content", &self.content)
            .field("selection", &self.selection)
            .field("focused", &self.focused)
            .field("word_count", &self.word_count)
            .field("sync", &self.sync.get())
            .finish_non_exhaustive()
    }
}

/// Parse HTML into a normalized content root; failures give an empty
/// paragraph document.
pub(crate) fn parse_or_empty(html: &str) -> Node {
    match folio_read_html::parse(html) {
        Ok(result) => {
            if result.has_warnings() {
                tracing::debug!(warnings = result.warnings.len(), "content parsed with losses");
            }
            result.value.content
        }
        Err(err) => {
            tracing::debug!(%err, "unparseable content replaced by an empty paragraph");
            helpers::document([helpers::paragraph([])])
        }
    }
}

/// The first caret position: inside the first block if it holds text.
pub(crate) fn start_of(tokens: &[Token]) -> usize {
    usize::from(tokens.first().is_some_and(Token::opens_textblock))
}

fn text_blocks(text: &str) -> Vec<Node> {
    let text = text.replace("\r\n", "\n");
    text.split("\n\n")
        .filter(|para| !para.trim().is_empty())
        .map(|para| {
            let mut children = Vec::new();
            for (i, line) in para.split('\n').enumerate() {
                if i > 0 {
                    children.push(helpers::line_break());
                }
                if !line.is_empty() {
                    children.push(helpers::text(line));
                }
            }
            helpers::paragraph(children)
        })
        .collect()
}
