//! MDX document parser producing component content trees.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use inlay_components::{ElementNode, Node, PropValue, TagRef};

use crate::frontmatter::{self, Frontmatter, FrontmatterError};
use crate::inline::{scan_components, Piece};

/// A parsed MDX document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Parsed frontmatter, defaulted when the file has none.
    pub frontmatter: Frontmatter,
    /// The content tree, ready for rendering.
    pub nodes: Vec<Node>,
    /// Table of contents collected from headings.
    pub toc: Vec<TocEntry>,
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Errors that can occur when parsing MDX.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("frontmatter: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Parse an MDX document into frontmatter, a content tree, and a TOC.
///
/// Markdown structure becomes plain lowercase elements (`p`, `h2`, `ul`,
/// …) so a theme registry can take any of them over; inline code spans
/// become `inlineCode` elements; `:::kind` container blocks become
/// `admonition` elements with their body parsed as nested markdown; and
/// capitalized tags in raw HTML become component elements. Unbalanced
/// component tags degrade to whatever content was collected, with a
/// warning, never a parse failure.
pub fn parse_mdx(source: &str) -> Result<Document, ParseError> {
    let (frontmatter, body, frontmatter_lines) = frontmatter::extract(source)?;
    let mut toc = Vec::new();
    let nodes = parse_blocks(body, frontmatter_lines, &mut toc);
    Ok(Document {
        frontmatter,
        nodes,
        toc,
    })
}

/// Parse a body, splitting out `:::` admonition blocks before handing the
/// rest to the markdown parser. `line_offset` is the number of file lines
/// preceding `body`.
fn parse_blocks(body: &str, line_offset: usize, toc: &mut Vec<TocEntry>) -> Vec<Node> {
    let mut nodes = Vec::new();
    for segment in split_admonitions(body) {
        match segment {
            Segment::Markdown { text, start_line } => {
                nodes.extend(parse_markdown(&text, line_offset + start_line, toc));
            }
            Segment::Admonition {
                kind,
                title,
                body,
                start_line,
            } => {
                let mut element = ElementNode::new("admonition")
                    .attr("kind", kind)
                    .at_line(line_offset + start_line + 1);
                if let Some(title) = title {
                    element = element.attr("title", title);
                }
                element = element.children(parse_blocks(&body, line_offset + start_line + 1, toc));
                nodes.push(element.into());
            }
        }
    }
    nodes
}

enum Segment {
    Markdown {
        text: String,
        /// 0-based first line of the segment within the body.
        start_line: usize,
    },
    Admonition {
        kind: String,
        title: Option<String>,
        body: String,
        /// 0-based line of the opening `:::` marker.
        start_line: usize,
    },
}

/// Recognize a `:::kind optional title` opener. A bare `:::` is a closer.
fn admonition_open(line: &str) -> Option<(String, Option<String>)> {
    let rest = line.trim().strip_prefix(":::")?.trim();
    let (kind, title) = match rest.split_once(char::is_whitespace) {
        Some((kind, title)) => (kind, Some(title.trim().to_string()).filter(|t| !t.is_empty())),
        None => (rest, None),
    };
    if kind.is_empty() || !kind.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }
    Some((kind.to_ascii_lowercase(), title))
}

fn admonition_close(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == ':')
}

fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

fn split_admonitions(body: &str) -> Vec<Segment> {
    let lines: Vec<&str> = body.lines().collect();
    let mut segments = Vec::new();
    let mut plain: Vec<&str> = Vec::new();
    let mut plain_start = 0;
    let mut in_fence = false;
    let mut i = 0;

    let flush = |segments: &mut Vec<Segment>, plain: &mut Vec<&str>, start: usize| {
        if plain.iter().any(|l| !l.trim().is_empty()) {
            segments.push(Segment::Markdown {
                text: plain.join("\n"),
                start_line: start,
            });
        }
        plain.clear();
    };

    while i < lines.len() {
        let line = lines[i];
        if is_fence(line) {
            in_fence = !in_fence;
        }
        if in_fence || is_fence(line) {
            if plain.is_empty() {
                plain_start = i;
            }
            plain.push(line);
            i += 1;
            continue;
        }
        if let Some((kind, title)) = admonition_open(line) {
            if let Some(close) = find_admonition_close(&lines, i + 1) {
                flush(&mut segments, &mut plain, plain_start);
                segments.push(Segment::Admonition {
                    kind,
                    title,
                    body: lines[i + 1..close].join("\n"),
                    start_line: i,
                });
                i = close + 1;
                continue;
            }
            tracing::warn!(line = i + 1, "unclosed `:::` block treated as plain text");
        }
        if plain.is_empty() {
            plain_start = i;
        }
        plain.push(line);
        i += 1;
    }
    flush(&mut segments, &mut plain, plain_start);
    segments
}

/// Find the line index of the `:::` closing the block opened before
/// `from`, honoring nested openers and skipping fenced code.
fn find_admonition_close(lines: &[&str], from: usize) -> Option<usize> {
    let mut depth = 1;
    let mut in_fence = false;
    for (i, line) in lines.iter().enumerate().skip(from) {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if admonition_open(line).is_some() {
            depth += 1;
        } else if admonition_close(line) {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Parse one markdown segment into nodes. `line_offset` is the number of
/// file lines preceding the segment.
fn parse_markdown(text: &str, line_offset: usize, toc: &mut Vec<TocEntry>) -> Vec<Node> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    // Byte offset of each line start, for locating component tags.
    let mut line_starts = vec![0usize];
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            line_starts.push(i + 1);
        }
    }
    let file_line = |offset: usize| {
        let idx = line_starts.partition_point(|&start| start <= offset);
        line_offset + idx
    };

    let mut builder = TreeBuilder::default();
    let mut in_table_head = false;

    for (event, range) in Parser::new_ext(text, options).into_offset_iter() {
        match event {
            Event::Start(tag) => match tag {
                Tag::Paragraph => builder.open("p"),
                Tag::Heading { level, id, .. } => {
                    let mut element = ElementNode::new(format!("h{}", level as u8));
                    if let Some(id) = id {
                        element = element.attr("id", id.to_string());
                    }
                    builder.open_element(element, FrameKind::Markdown);
                }
                Tag::BlockQuote(_) => builder.open("blockquote"),
                Tag::CodeBlock(kind) => {
                    builder.open("pre");
                    let mut code = ElementNode::new("code");
                    if let CodeBlockKind::Fenced(info) = &kind {
                        if let Some(lang) = info.split_whitespace().next() {
                            if !lang.is_empty() {
                                code = code.attr("class", format!("language-{lang}"));
                            }
                        }
                    }
                    builder.open_element(code, FrameKind::Markdown);
                }
                Tag::List(Some(start)) => {
                    let mut element = ElementNode::new("ol");
                    if start != 1 {
                        element = element.attr("start", start.to_string());
                    }
                    builder.open_element(element, FrameKind::Markdown);
                }
                Tag::List(None) => builder.open("ul"),
                Tag::Item => builder.open("li"),
                Tag::Emphasis => builder.open("em"),
                Tag::Strong => builder.open("strong"),
                Tag::Strikethrough => builder.open("del"),
                Tag::Link {
                    dest_url, title, ..
                } => {
                    let mut element = ElementNode::new("a").attr("href", dest_url.to_string());
                    if !title.is_empty() {
                        element = element.attr("title", title.to_string());
                    }
                    builder.open_element(element, FrameKind::Markdown);
                }
                Tag::Image {
                    dest_url, title, ..
                } => {
                    let mut element = ElementNode::new("img").attr("src", dest_url.to_string());
                    if !title.is_empty() {
                        element = element.attr("title", title.to_string());
                    }
                    builder.open_element(element, FrameKind::Image);
                }
                Tag::Table(_) => builder.open("table"),
                Tag::TableHead => {
                    builder.open("thead");
                    builder.open("tr");
                    in_table_head = true;
                }
                Tag::TableRow => builder.open("tr"),
                Tag::TableCell => builder.open(if in_table_head { "th" } else { "td" }),
                Tag::FootnoteDefinition(name) => {
                    builder.open_element(
                        ElementNode::new("div")
                            .attr("class", "footnote")
                            .attr("id", format!("fn-{name}")),
                        FrameKind::Markdown,
                    );
                }
                Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
                _ => {}
            },
            Event::End(end) => match end {
                TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
                TagEnd::Heading(_) => builder.close_heading(toc),
                TagEnd::CodeBlock => {
                    builder.close_and_push(); // code
                    builder.close_and_push(); // pre
                }
                TagEnd::Image => builder.close_image(),
                TagEnd::TableHead => {
                    builder.close_and_push(); // tr
                    builder.close_and_push(); // thead
                    builder.open("tbody");
                    in_table_head = false;
                }
                TagEnd::Table => {
                    builder.close_and_push(); // tbody
                    builder.close_and_push(); // table
                }
                _ => builder.close_and_push(),
            },
            Event::Text(text) => builder.push(Node::text(text.to_string())),
            Event::Code(code) => builder.push(
                ElementNode::new("inlineCode")
                    .child(Node::text(code.to_string()))
                    .into(),
            ),
            Event::Html(html) | Event::InlineHtml(html) => {
                builder.push_html(&html, file_line(range.start));
            }
            Event::SoftBreak => builder.push(Node::text("\n")),
            Event::HardBreak => builder.push(ElementNode::new("br").into()),
            Event::Rule => builder.push(ElementNode::new("hr").into()),
            Event::FootnoteReference(name) => {
                builder.push(
                    ElementNode::new("sup")
                        .attr("class", "footnote-ref")
                        .child(
                            ElementNode::new("a")
                                .attr("href", format!("#fn-{name}"))
                                .child(Node::text(name.to_string())),
                        )
                        .into(),
                );
            }
            Event::TaskListMarker(checked) => {
                let mut element = ElementNode::new("input")
                    .attr("type", "checkbox")
                    .prop("disabled", PropValue::Bool(true));
                if checked {
                    element = element.prop("checked", PropValue::Bool(true));
                }
                builder.push(element.into());
            }
            _ => {}
        }
    }

    builder.finish()
}

#[derive(PartialEq)]
enum FrameKind {
    /// Opened by a markdown event, closed by its matching end event.
    Markdown,
    /// Opened by a component tag, closed by its closing tag.
    Component,
    /// An image: children fold into the `alt` attribute on close.
    Image,
}

struct Frame {
    element: ElementNode,
    kind: FrameKind,
}

#[derive(Default)]
struct TreeBuilder {
    roots: Vec<Node>,
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn push(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(frame) => frame.element.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn open(&mut self, tag: &str) {
        self.open_element(ElementNode::new(tag), FrameKind::Markdown);
    }

    fn open_element(&mut self, element: ElementNode, kind: FrameKind) {
        self.stack.push(Frame { element, kind });
    }

    /// Pop the innermost markdown frame and return it. Component frames
    /// left open above it were never closed in source; they are flattened
    /// into place with a warning.
    fn close(&mut self) -> Option<ElementNode> {
        while let Some(frame) = self.stack.pop() {
            if frame.kind == FrameKind::Component {
                tracing::warn!(
                    tag = %frame.element.tag,
                    line = ?frame.element.line,
                    "component tag never closed",
                );
                self.push(Node::Element(frame.element));
                continue;
            }
            return Some(frame.element);
        }
        None
    }

    fn close_and_push(&mut self) {
        if let Some(element) = self.close() {
            self.push(Node::Element(element));
        }
    }

    fn close_heading(&mut self, toc: &mut Vec<TocEntry>) {
        let Some(mut element) = self.close() else {
            return;
        };
        let title = collect_text(&element.children);
        let id = match element.props.get_str("id") {
            Some(explicit) => explicit.to_string(),
            None => {
                let slug = slugify(&title);
                element.props.set("id", PropValue::String(slug.clone()));
                slug
            }
        };
        let level = match &element.tag {
            TagRef::Name(name) => name.strip_prefix('h').and_then(|n| n.parse().ok()),
            _ => None,
        };
        toc.push(TocEntry {
            title,
            id,
            level: level.unwrap_or(1),
        });
        self.push(Node::Element(element));
    }

    fn close_image(&mut self) {
        let Some(mut element) = self.close() else {
            return;
        };
        let alt = collect_text(&element.children);
        element.children.clear();
        if !alt.is_empty() {
            element.props.set("alt", PropValue::String(alt));
        }
        self.push(Node::Element(element));
    }

    fn push_html(&mut self, html: &str, first_line: usize) {
        for scanned in scan_components(html) {
            match scanned.piece {
                Piece::Raw(raw) => self.push(Node::raw(raw)),
                Piece::SelfClosing(mut element) => {
                    element.line = Some(first_line + scanned.line);
                    self.push(Node::Element(element));
                }
                Piece::Open(mut element) => {
                    element.line = Some(first_line + scanned.line);
                    self.open_element(element, FrameKind::Component);
                }
                Piece::Close(name) => self.close_component(&name),
            }
        }
    }

    fn close_component(&mut self, name: &str) {
        match self.stack.last() {
            Some(frame)
                if frame.kind == FrameKind::Component
                    && frame.element.tag.to_string() == name =>
            {
                let frame = self.stack.pop().expect("frame just observed");
                self.push(Node::Element(frame.element));
            }
            _ => {
                tracing::warn!(tag = name, "closing tag without a matching open tag");
            }
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while let Some(frame) = self.stack.pop() {
            if frame.kind == FrameKind::Component {
                tracing::warn!(
                    tag = %frame.element.tag,
                    line = ?frame.element.line,
                    "component tag never closed",
                );
            }
            self.push(Node::Element(frame.element));
        }
        self.roots
    }
}

fn collect_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => out.push_str(&collect_text(&element.children)),
            Node::Scope(scope) => out.push_str(&collect_text(&scope.children)),
            Node::Raw(_) => {}
        }
    }
    out
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
