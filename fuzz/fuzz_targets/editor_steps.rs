#![no_main]

use arbitrary::Arbitrary;
use folio_editor::{BlockType, Editor, EditorConfig};
use folio_media::{Alignment, MediaAttrsPatch, WrapStyle};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Select(i64, i64),
    Type(String),
    Backspace,
    Delete,
    Media(u8),
    Align(u8),
    Wrap(u8),
    Paste(String),
    Heading(u8),
    Paragraph,
}

#[derive(Debug, Arbitrary)]
struct Input {
    initial: String,
    limit: Option<u8>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let mut config = EditorConfig::new().with_initial_content(input.initial);
    if let Some(limit) = input.limit {
        config = config.with_word_limit(usize::from(limit));
    }
    let mut editor = Editor::new(config);

    for op in input.ops.into_iter().take(64) {
        match op {
            Op::Select(a, b) => editor.set_selection(a, b),
            Op::Type(text) => {
                editor.insert_text(&text);
            }
            Op::Backspace => {
                editor.delete_backward();
            }
            Op::Delete => {
                editor.transaction().delete_selection().commit();
            }
            Op::Media(n) => {
                editor.insert_media(&format!("img{n}.png"), MediaAttrsPatch::default());
            }
            Op::Align(n) => {
                editor.set_alignment(Alignment::ALL[usize::from(n) % Alignment::ALL.len()]);
            }
            Op::Wrap(n) => {
                editor.set_wrap_style(WrapStyle::ALL[usize::from(n) % WrapStyle::ALL.len()]);
            }
            Op::Paste(html) => {
                editor.paste_html(&html);
            }
            Op::Heading(level) => {
                editor.transaction().set_block_type(BlockType::Heading(level % 6 + 1)).commit();
            }
            Op::Paragraph => {
                editor.transaction().set_block_type(BlockType::Paragraph).commit();
            }
        }

        let selection = editor.selection();
        assert!(selection.to() <= editor.document_size());
    }
});
