//! End-to-end behavior through the facade: stored HTML in, editing, stored
//! HTML out.

use std::cell::RefCell;
use std::rc::Rc;

use folio::editor::{LimitWarning, Update};
use folio::media::codec;
use folio::prelude::*;

fn parse(input: &str) -> Document {
    folio::html::parse(input).unwrap().value
}

fn emit(doc: &Document) -> String {
    String::from_utf8(folio::html::emit(doc).unwrap().value).unwrap()
}

fn first_media(doc: &Document) -> MediaAttrs {
    doc.descendants()
        .find_map(|node| node.as_media().cloned())
        .expect("document has a media node")
}

fn limited(html: &str, limit: usize) -> Editor {
    Editor::new(
        EditorConfig::new()
            .with_initial_content(html)
            .with_word_limit(limit),
    )
}

mod codec_law {
    use super::*;

    #[test]
    fn every_alignment_and_wrap_survives_storage() {
        for alignment in Alignment::ALL {
            for wrap in WrapStyle::ALL {
                let attrs = MediaAttrs::new("data:image/png;base64,AAAA")
                    .with_alignment(alignment)
                    .with_wrap_style(wrap)
                    .with_size(Length::parse("40%"), Length::parse("120"));
                let doc = Document::new().with_content(
                    Node::new(NodeKind::Document).child(Node::media(attrs.clone())),
                );
                let stored = emit(&doc);
                assert_eq!(first_media(&parse(&stored)), attrs, "stored as {stored}");
            }
        }
    }

    #[test]
    fn codec_decodes_what_it_encodes() {
        let attrs = MediaAttrs::new("a.png")
            .with_alignment(Alignment::Left)
            .with_wrap_margin(Length::parse("2em").unwrap())
            .with_alt("a cat");
        assert_eq!(codec::decode(&codec::encode(&attrs).to_attr_list()), Some(attrs));
    }

    #[test]
    fn legacy_float_is_read_as_alignment() {
        let doc = parse(r#"<img src="x.png" style="float: right; width: 30%">"#);
        let attrs = first_media(&doc);
        assert_eq!(attrs.alignment, Alignment::Right);
        assert_eq!(attrs.wrap_style, WrapStyle::default());
        assert_eq!(attrs.width.as_ref().map(Length::as_str), Some("30%"));
        assert!(emit(&doc).contains(r#"data-align="right""#));
    }

    #[test]
    fn explicit_alignment_wins_over_float() {
        let doc = parse(r#"<img src="x.png" data-align="left" style="float: right">"#);
        assert_eq!(first_media(&doc).alignment, Alignment::Left);
    }

    #[test]
    fn wrap_is_irrelevant_when_centered() {
        let tight = MediaAttrs::new("x.png").with_wrap_style(WrapStyle::Tight);
        let square = MediaAttrs::new("x.png").with_wrap_style(WrapStyle::Square);
        assert_eq!(tight.effective_wrap(), None);
        assert_eq!(square.effective_wrap(), None);

        let encoded_tight = codec::encode(&tight);
        let encoded_square = codec::encode(&square);
        assert_eq!(encoded_tight.style, encoded_square.style);
    }

    #[test]
    fn image_without_source_is_dropped() {
        let doc = parse(r#"<p>a</p><img alt="nothing"><p>b</p>"#);
        assert!(doc.descendants().all(|node| node.as_media().is_none()));
    }
}

mod editing {
    use super::*;

    #[test]
    fn selection_is_clamped_to_document() {
        let mut editor = Editor::new(EditorConfig::new().with_initial_content("<p>abc</p>"));
        editor.set_selection(-3, 1_000);
        let selection = editor.selection();
        assert_eq!(selection.from(), 0);
        assert_eq!(selection.to(), editor.document_size());
    }

    #[test]
    fn chained_commands_commit_once() {
        let mut editor = Editor::new(EditorConfig::new().with_initial_content(r#"<img src="a.png">"#));
        let updates: Rc<RefCell<Vec<Update>>> = Rc::default();
        let sink = Rc::clone(&updates);
        editor.on_update(move |update| sink.borrow_mut().push(update.clone()));

        let outcome = editor
            .transaction()
            .set_selection(0, 1)
            .set_alignment(Alignment::Right)
            .set_wrap_style(WrapStyle::Through)
            .set_wrap_margin(Length::parse("1rem").unwrap())
            .commit();

        assert!(outcome.content_changed);
        assert_eq!(outcome.result(), StepResult::Applied);
        let updates = updates.borrow();
        assert_eq!(updates.len(), 1);
        assert!(updates[0].html.contains(r#"data-align="right""#));
        assert!(updates[0].html.contains(r#"data-wrap="through""#));
        assert!(updates[0].html.contains(r#"data-wrap-margin="1rem""#));
    }

    #[test]
    fn insert_then_query_reports_defaults() {
        let mut editor = Editor::default();
        editor.insert_media("data:image/png;base64,AAAA", MediaAttrsPatch::default());
        assert!(editor.is_active("media", None));

        let attrs = editor.get_attributes("media");
        assert_eq!(attrs, MediaAttrs::new("data:image/png;base64,AAAA").to_props());
        assert!(!attrs.contains("width"));
    }

    #[test]
    fn media_command_without_media_is_a_no_op() {
        let mut editor = Editor::new(EditorConfig::new().with_initial_content("<p>words</p>"));
        let before = editor.get_content();
        assert_eq!(editor.set_wrap_style(WrapStyle::Behind), StepResult::NotApplicable);
        assert_eq!(editor.clear_size(), StepResult::NotApplicable);
        assert_eq!(editor.get_content(), before);
    }

    #[test]
    fn serialization_is_idempotent() {
        let mut editor = Editor::new(EditorConfig::new().with_initial_content(
            r#"<h2>Notes</h2><p>see <a href="https://example.com">this</a></p><img src="x.png" style="float:left"><blockquote><p>q</p></blockquote>"#,
        ));
        let once = editor.get_content();
        editor.set_content(&once);
        assert_eq!(editor.get_content(), once);
    }
}

mod word_limit {
    use super::*;

    #[test]
    fn overflowing_edit_is_truncated() {
        let mut editor = limited("<p>alpha beta</p>", 3);
        let warnings: Rc<RefCell<Vec<LimitWarning>>> = Rc::default();
        let sink = Rc::clone(&warnings);
        editor.on_warning(move |warning| sink.borrow_mut().push(*warning));

        let end = editor.document_size() as i64 - 1;
        editor.set_selection(end, end);
        editor.insert_text(" gamma delta epsilon");

        assert_eq!(editor.word_count(), 3);
        assert_eq!(editor.get_content(), "<p>alpha beta gamma</p>");
        assert_eq!(*warnings.borrow(), vec![LimitWarning::Truncated { limit: 3 }]);
    }

    #[test]
    fn oversized_paste_is_rejected() {
        let mut editor = limited("<p>one two three</p>", 5);
        let warnings: Rc<RefCell<Vec<LimitWarning>>> = Rc::default();
        let sink = Rc::clone(&warnings);
        editor.on_warning(move |warning| sink.borrow_mut().push(*warning));

        assert_eq!(editor.paste_text("four five six"), StepResult::NotApplicable);
        assert_eq!(editor.get_content(), "<p>one two three</p>");
        assert_eq!(
            *warnings.borrow(),
            vec![LimitWarning::PasteRejected {
                limit: 5,
                remaining: 2
            }]
        );
    }

    #[test]
    fn media_does_not_count_as_words() {
        let editor = limited(r#"<p>one</p><img src="a.png" alt="two three"><p>four</p>"#, 10);
        assert_eq!(editor.word_count(), 2);
    }
}
