//! DOM to document tree conversion using html5ever.

use html5ever::tendril::TendrilSink;
use html5ever::{Attribute, QualName, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use folio_core::media::codec::{self, AttrList};
use folio_core::{
    ConversionResult, Document, FidelityWarning, ParseError, ParseOptions, Properties, Severity,
    WarningKind,
};
use folio_std::schema::{mark_for_tag, normalize};
use folio_std::{Mark, Node, NodeKind, prop};

struct Reader<'a> {
    options: &'a ParseOptions,
    warnings: Vec<FidelityWarning>,
}

pub fn parse_with_options(
    input: &str,
    options: &ParseOptions,
) -> Result<ConversionResult<Document>, ParseError> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut input.as_bytes())
        .map_err(|e| ParseError::Invalid(format!("HTML parse error: {e}")))?;

    let mut metadata = Properties::new();
    extract_metadata(&dom.document, &mut metadata);

    let mut reader = Reader {
        options,
        warnings: Vec::new(),
    };
    let children = reader.convert_children(&dom.document);

    let mut root = normalize(Node::new(NodeKind::Document).children(children));
    if !options.preserve_whitespace {
        trim_textblocks(&mut root);
        root = normalize(root);
    }

    let doc = Document::new().with_content(root).with_metadata(metadata);
    Ok(ConversionResult::with_warnings(doc, reader.warnings))
}

fn extract_metadata(handle: &Handle, metadata: &mut Properties) {
    if let NodeData::Element { name, attrs, .. } = &handle.data {
        match name.local.as_ref() {
            "title" => {
                let title = element_text(handle);
                let title = title.trim();
                if !title.is_empty() {
                    metadata.set("title", title);
                }
            }
            "meta" => {
                let attrs = attrs.borrow();
                if let Some(name) = get_attr(&attrs, "name")
                    && let Some(content) = get_attr(&attrs, "content")
                {
                    metadata.set(name, content);
                }
            }
            _ => {}
        }
    }

    for child in handle.children.borrow().iter() {
        extract_metadata(child, metadata);
    }
}

/// Raw text of an element and its descendants, whitespace untouched.
fn element_text(handle: &Handle) -> String {
    let mut text = String::new();
    for child in handle.children.borrow().iter() {
        if let NodeData::Text { contents } = &child.data {
            text.push_str(&contents.borrow());
        }
        text.push_str(&element_text(child));
    }
    text
}

impl Reader<'_> {
    fn convert_children(&mut self, handle: &Handle) -> Vec<Node> {
        let mut nodes = Vec::new();
        for child in handle.children.borrow().iter() {
            nodes.extend(self.convert_node(child));
        }
        nodes
    }

    fn convert_node(&mut self, handle: &Handle) -> Vec<Node> {
        match &handle.data {
            NodeData::Document => self.convert_children(handle),

            NodeData::Text { contents } => {
                let contents = contents.borrow();
                let text = if self.options.preserve_whitespace {
                    contents.to_string()
                } else {
                    collapse_whitespace(&contents)
                };
                if text.is_empty() {
                    return vec![];
                }
                vec![Node::text(text)]
            }

            NodeData::Element { name, attrs, .. } => {
                let attrs = attrs.borrow();
                self.convert_element(name, &attrs, handle)
            }

            NodeData::Comment { .. } => vec![],
            NodeData::Doctype { .. } => vec![],
            NodeData::ProcessingInstruction { .. } => vec![],
        }
    }

    fn convert_element(
        &mut self,
        name: &QualName,
        attrs: &[Attribute],
        handle: &Handle,
    ) -> Vec<Node> {
        let tag = name.local.as_ref();

        let node = match tag {
            "head" | "script" | "style" | "meta" | "link" | "title" | "template" | "noscript" => {
                return vec![];
            }

            // Structural containers carry nothing the document model keeps.
            "html" | "body" | "div" | "section" | "article" | "main" | "aside" | "nav"
            | "header" | "footer" | "figure" | "span" => return self.convert_children(handle),

            "pre" => return vec![code_block(handle)],
            "img" => return self.convert_image(attrs).into_iter().collect(),
            "hr" => return vec![Node::new(NodeKind::HorizontalRule)],
            "br" => return vec![Node::new(NodeKind::LineBreak)],

            _ => {
                let children = self.convert_children(handle);
                match tag {
                    "p" | "figcaption" => Node::new(NodeKind::Paragraph).children(children),

                    "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                        let level = i64::from(tag.as_bytes()[1] - b'0');
                        Node::new(NodeKind::Heading)
                            .prop(prop::LEVEL, level)
                            .children(children)
                    }

                    "blockquote" => Node::new(NodeKind::Blockquote).children(children),

                    "ul" => Node::new(NodeKind::List)
                        .prop(prop::ORDERED, false)
                        .children(children),

                    "ol" => {
                        let mut list = Node::new(NodeKind::List).prop(prop::ORDERED, true);
                        if let Some(start) = get_attr(attrs, "start")
                            && let Ok(n) = start.trim().parse::<i64>()
                        {
                            list = list.prop(prop::START, n);
                        }
                        list.children(children)
                    }

                    "li" => Node::new(NodeKind::ListItem).children(children),

                    "a" => {
                        let Some(href) = get_attr(attrs, "href") else {
                            return children;
                        };
                        let mut link = mark(Mark::Link, children).prop(prop::URL, href);
                        if let Some(title) = get_attr(attrs, "title") {
                            link = link.prop(prop::TITLE, title);
                        }
                        link
                    }

                    _ => match mark_for_tag(tag) {
                        Some(inline) => mark(inline, children),
                        None => {
                            self.warnings.push(FidelityWarning::unsupported_node(tag));
                            return children;
                        }
                    },
                }
            }
        };

        vec![node]
    }

    fn convert_image(&mut self, attrs: &[Attribute]) -> Option<Node> {
        let list: AttrList = attrs
            .iter()
            .map(|a| (a.name.local.to_string(), a.value.to_string()))
            .collect();

        match codec::decode(&list) {
            Some(media) => {
                for (attr, value) in codec::rejected(&list) {
                    self.warnings
                        .push(FidelityWarning::unsupported_property("img", attr, &value));
                }
                Some(Node::media(media))
            }
            None => {
                self.warnings.push(FidelityWarning::new(
                    Severity::Major,
                    WarningKind::FeatureLost("html:img".to_string()),
                    "Image without a source dropped",
                ));
                None
            }
        }
    }
}

fn mark(mark: Mark, children: Vec<Node>) -> Node {
    Node::new(NodeKind::Mark(mark)).children(children)
}

/// `<pre>`, optionally wrapping `<code class="language-x">`.
fn code_block(handle: &Handle) -> Node {
    let mut block = Node::new(NodeKind::CodeBlock);
    if let Some(language) = code_language(handle) {
        block = block.prop(prop::LANGUAGE, language);
    }
    let code = element_text(handle);
    if code.is_empty() {
        block
    } else {
        block.child(Node::text(code))
    }
}

fn code_language(handle: &Handle) -> Option<String> {
    for child in handle.children.borrow().iter() {
        if let NodeData::Element { name, attrs, .. } = &child.data
            && name.local.as_ref() == "code"
            && let Some(classes) = get_attr(&attrs.borrow(), "class")
        {
            return classes
                .split_whitespace()
                .find_map(|class| class.strip_prefix("language-"))
                .map(str::to_string);
        }
    }
    None
}

fn get_attr(attrs: &[Attribute], name: &str) -> Option<String> {
    attrs
        .iter()
        .find(|a| a.name.local.as_ref() == name)
        .map(|a| a.value.to_string())
}

/// Collapse each run of ASCII whitespace to a single space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Strip leading and trailing whitespace inside paragraphs and headings.
fn trim_textblocks(node: &mut Node) {
    match node.kind {
        NodeKind::Paragraph | NodeKind::Heading => {
            trim_start(&mut node.children);
            trim_end(&mut node.children);
        }
        NodeKind::CodeBlock => {}
        _ => node.children.iter_mut().for_each(trim_textblocks),
    }
}

/// Returns true once non-whitespace content has been reached.
fn trim_start(children: &mut [Node]) -> bool {
    for child in children.iter_mut() {
        let reached = match child.kind {
            NodeKind::Text => {
                let trimmed = child
                    .text_content()
                    .unwrap_or_default()
                    .trim_start_matches(|c: char| c.is_ascii_whitespace())
                    .to_string();
                let reached = !trimmed.is_empty();
                child.props.set(prop::CONTENT, trimmed);
                reached
            }
            NodeKind::Mark(_) => trim_start(&mut child.children),
            _ => true,
        };
        if reached {
            return true;
        }
    }
    false
}

fn trim_end(children: &mut [Node]) -> bool {
    for child in children.iter_mut().rev() {
        let reached = match child.kind {
            NodeKind::Text => {
                let trimmed = child
                    .text_content()
                    .unwrap_or_default()
                    .trim_end_matches(|c: char| c.is_ascii_whitespace())
                    .to_string();
                let reached = !trimmed.is_empty();
                child.props.set(prop::CONTENT, trimmed);
                reached
            }
            NodeKind::Mark(_) => trim_end(&mut child.children),
            _ => true,
        };
        if reached {
            return true;
        }
    }
    false
}
