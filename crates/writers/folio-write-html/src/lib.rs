//! HTML writer for folio.
//!
//! Emits a folio document as an HTML5 fragment. Media nodes are written
//! through the attribute codec so that reading the output back yields the
//! same attributes.

use folio_core::media::codec;
use folio_core::{ConversionResult, Document, EmitError, EmitOptions, MediaAttrs, Node, NodeKind};
use folio_std::prop;
use folio_std::schema::mark_spec;

/// Emit a document as HTML.
pub fn emit(doc: &Document) -> Result<ConversionResult<Vec<u8>>, EmitError> {
    emit_with_options(doc, &EmitOptions::default())
}

/// Emit a document as HTML with custom options.
pub fn emit_with_options(
    doc: &Document,
    options: &EmitOptions,
) -> Result<ConversionResult<Vec<u8>>, EmitError> {
    let mut ctx = EmitContext::new(options.pretty);
    emit_blocks(&doc.content.children, &mut ctx);
    tracing::debug!(bytes = ctx.output.len(), "emitted html");
    Ok(ConversionResult::ok(ctx.output.into_bytes()))
}

/// Emit a document as a complete HTML page with doctype.
pub fn emit_full_document(doc: &Document) -> Result<ConversionResult<Vec<u8>>, EmitError> {
    let mut ctx = EmitContext::new(true);

    ctx.write("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    if let Some(title) = doc.metadata.get_str("title") {
        ctx.write("<title>");
        ctx.write(&escape_html(title));
        ctx.write("</title>\n");
    }
    ctx.write("</head>\n<body>\n");
    emit_blocks(&doc.content.children, &mut ctx);
    ctx.write("\n</body>\n</html>\n");

    Ok(ConversionResult::ok(ctx.output.into_bytes()))
}

/// Serialize a content tree (a document root or any single node) compactly.
pub fn to_html(node: &Node) -> String {
    let mut ctx = EmitContext::new(false);
    emit_node(node, &mut ctx);
    ctx.output
}

struct EmitContext {
    output: String,
    /// Newline between top-level blocks.
    pretty: bool,
}

impl EmitContext {
    fn new(pretty: bool) -> Self {
        Self {
            output: String::new(),
            pretty,
        }
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }
}

fn emit_blocks(blocks: &[Node], ctx: &mut EmitContext) {
    for (i, block) in blocks.iter().enumerate() {
        if ctx.pretty && i > 0 {
            ctx.write("\n");
        }
        emit_node(block, ctx);
    }
}

fn emit_nodes(nodes: &[Node], ctx: &mut EmitContext) {
    for node in nodes {
        emit_node(node, ctx);
    }
}

fn emit_node(node: &Node, ctx: &mut EmitContext) {
    match &node.kind {
        NodeKind::Document => emit_blocks(&node.children, ctx),
        NodeKind::Paragraph => emit_tag("p", node, ctx),
        NodeKind::Heading => emit_heading(node, ctx),
        NodeKind::Blockquote => emit_tag("blockquote", node, ctx),
        NodeKind::CodeBlock => emit_code_block(node, ctx),
        NodeKind::List => emit_list(node, ctx),
        NodeKind::ListItem => emit_tag("li", node, ctx),
        NodeKind::HorizontalRule => ctx.write("<hr>"),
        NodeKind::Media(attrs) => emit_media(attrs, ctx),
        NodeKind::Text => {
            let text = node.text_content().unwrap_or_default();
            ctx.write(&escape_html(text));
        }
        NodeKind::LineBreak => ctx.write("<br>"),
        NodeKind::Mark(folio_core::Mark::Link) => emit_link(node, ctx),
        NodeKind::Mark(mark) => emit_tag(mark_spec(*mark).tag(), node, ctx),
    }
}

/// Emit a simple tag with children.
fn emit_tag(tag: &str, node: &Node, ctx: &mut EmitContext) {
    ctx.write("<");
    ctx.write(tag);
    ctx.write(">");
    emit_nodes(&node.children, ctx);
    ctx.write("</");
    ctx.write(tag);
    ctx.write(">");
}

fn emit_heading(node: &Node, ctx: &mut EmitContext) {
    let level = node.props.get_int(prop::LEVEL).unwrap_or(1).clamp(1, 6);
    emit_tag(&format!("h{level}"), node, ctx);
}

fn emit_code_block(node: &Node, ctx: &mut EmitContext) {
    ctx.write("<pre><code");
    if let Some(lang) = node.props.get_str(prop::LANGUAGE) {
        ctx.write(" class=\"language-");
        ctx.write(&escape_attr(lang));
        ctx.write("\"");
    }
    ctx.write(">");
    ctx.write(&escape_html(&node.collect_text()));
    ctx.write("</code></pre>");
}

fn emit_list(node: &Node, ctx: &mut EmitContext) {
    let ordered = node.props.get_bool(prop::ORDERED).unwrap_or(false);
    if ordered {
        ctx.write("<ol");
        if let Some(start) = node.props.get_int(prop::START)
            && start != 1
        {
            ctx.write(&format!(" start=\"{start}\""));
        }
        ctx.write(">");
        emit_nodes(&node.children, ctx);
        ctx.write("</ol>");
    } else {
        emit_tag("ul", node, ctx);
    }
}

fn emit_link(node: &Node, ctx: &mut EmitContext) {
    ctx.write("<a href=\"");
    ctx.write(&escape_attr(node.props.get_str(prop::URL).unwrap_or_default()));
    ctx.write("\"");
    if let Some(title) = node.props.get_str(prop::TITLE) {
        ctx.write(" title=\"");
        ctx.write(&escape_attr(title));
        ctx.write("\"");
    }
    ctx.write(">");
    emit_nodes(&node.children, ctx);
    ctx.write("</a>");
}

fn emit_media(attrs: &MediaAttrs, ctx: &mut EmitContext) {
    ctx.write("<img");
    for (name, value) in codec::encode(attrs).to_attr_list().iter() {
        ctx.write(" ");
        ctx.write(name);
        ctx.write("=\"");
        ctx.write(&escape_attr(value));
        ctx.write("\"");
    }
    ctx.write(">");
}

fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute values.
fn escape_attr(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
