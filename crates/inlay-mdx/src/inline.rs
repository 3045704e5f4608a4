//! Scanning raw HTML chunks for inline component tags.
//!
//! Markdown passes HTML through untouched, so component invocations like
//! `<Badge kind="new" />` or a paired `<Columns>…</Columns>` arrive as raw
//! HTML events. This module splits such a chunk into plain HTML and
//! component tag pieces; only capitalized tags (optionally dotted, like
//! `Chart.Line`) are treated as components, lowercase HTML is left alone.

use std::sync::LazyLock;

use regex::Regex;

use inlay_components::{ElementNode, PropValue, Props};

/// One piece of a scanned HTML chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    /// HTML without component tags, passed through verbatim.
    Raw(String),
    /// A self-closing component invocation, complete with props.
    SelfClosing(ElementNode),
    /// An opening component tag; children follow until [`Piece::Close`].
    Open(ElementNode),
    /// A closing component tag, by name.
    Close(String),
}

/// A [`Piece`] plus the 0-based line within the chunk it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Scanned {
    pub piece: Piece,
    pub line: usize,
}

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)</?([A-Z][A-Za-z0-9]*(?:\.[A-Za-z0-9]+)*)((?:"[^"]*"|'[^']*'|\{[^}]*\}|[^>])*)>"#,
    )
    .expect("invalid component tag regex")
});

static PROP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z][a-zA-Z0-9_-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|\{([^}]*)\}))?"#)
        .expect("invalid prop regex")
});

/// Split an HTML chunk into raw HTML and component tag pieces.
pub fn scan_components(html: &str) -> Vec<Scanned> {
    let mut pieces = Vec::new();
    let mut cursor = 0;

    for caps in TAG_RE.captures_iter(html) {
        let whole = caps.get(0).expect("regex match has a whole capture");
        if whole.start() > cursor {
            push_raw(&mut pieces, html, cursor, whole.start());
        }

        let line = line_of(html, whole.start());
        let name = &caps[1];
        if whole.as_str().starts_with("</") {
            pieces.push(Scanned {
                piece: Piece::Close(name.to_string()),
                line,
            });
        } else {
            let mut attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let self_closing = attrs.trim_end().ends_with('/');
            if self_closing {
                attrs = attrs.trim_end().trim_end_matches('/');
            }

            let mut element = ElementNode::new(name);
            let (props, key) = parse_props(attrs);
            element.props = props;
            element.key = key;

            pieces.push(Scanned {
                piece: if self_closing {
                    Piece::SelfClosing(element)
                } else {
                    Piece::Open(element)
                },
                line,
            });
        }
        cursor = whole.end();
    }

    if cursor < html.len() {
        push_raw(&mut pieces, html, cursor, html.len());
    }

    pieces
}

fn push_raw(pieces: &mut Vec<Scanned>, html: &str, start: usize, end: usize) {
    let raw = &html[start..end];
    if raw.trim().is_empty() {
        return;
    }
    pieces.push(Scanned {
        piece: Piece::Raw(raw.to_string()),
        line: line_of(html, start),
    });
}

fn line_of(html: &str, offset: usize) -> usize {
    html[..offset].matches('\n').count()
}

/// Parse an attribute string into props, splitting out the `key` hint.
///
/// `key` identifies the element to the host and is never forwarded to the
/// implementation, so it moves from the attribute list to the node's own
/// field.
fn parse_props(attrs: &str) -> (Props, Option<String>) {
    let mut props = Props::new();
    let attrs = attrs.trim();
    if !attrs.is_empty() {
        for caps in PROP_RE.captures_iter(attrs) {
            let name = caps.get(1).expect("prop regex has a name capture").as_str();
            let value = if let Some(m) = caps.get(2) {
                PropValue::String(m.as_str().to_string())
            } else if let Some(m) = caps.get(3) {
                PropValue::String(m.as_str().to_string())
            } else if let Some(m) = caps.get(4) {
                PropValue::Expression(m.as_str().trim().to_string())
            } else {
                PropValue::Bool(true)
            };
            props.set(name, value);
        }
    }

    let key = match props.remove("key") {
        Some(PropValue::String(k)) | Some(PropValue::Expression(k)) => Some(k),
        Some(PropValue::Bool(_)) | None => None,
    };

    (props, key)
}
